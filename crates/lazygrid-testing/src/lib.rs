//! Testing utilities and harness for lazygrid.
//!
//! - [`RecordingFactory`] - an instantiation backend that records every
//!   lifecycle call and can be told to fail
//! - [`GridTestRule`] - drives a grid against an in-memory viewport and
//!   checks the pool/active-set invariants
//! - [`fixtures`] - item list builders

pub mod fixtures;
pub mod recording;
pub mod test_rule;

pub use recording::*;
pub use test_rule::*;

pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::recording::*;
    pub use crate::test_rule::*;
    pub use lazygrid_foundation::*;
}
