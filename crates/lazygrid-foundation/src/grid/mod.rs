//! Virtualized grid core.
//!
//! Only items inside (or near) the viewport hold a visual instance; all
//! other items are plain records with a computed position.
//!
//! # Architecture
//!
//! - [`layout_items`] - assigns content positions under the four
//!   axis/arrangement combinations and returns the content extent
//! - [`CullingWindow`] - the viewport widened by a prefetch margin, and the
//!   overlap test that decides which items should render
//! - [`InstancePool`] / [`ActiveSet`] - idle instances by template key, and
//!   the instances currently bound to items
//! - [`DataGrid`] - the session that ties them together and runs once per
//!   frame
//!
//! The rendering backend plugs in through [`InstanceFactory`] and
//! [`GridItemVisual`]; [`TemplateRegistry`] is a ready-made factory that
//! picks a visual builder by template key.

mod active_set;
mod config;
mod culling;
mod data_grid;
mod error;
mod instance_pool;
mod item;
mod layout;
mod registry;
mod stats;
mod visual;

pub use active_set::*;
pub use config::*;
pub use culling::*;
pub use data_grid::*;
pub use error::*;
pub use instance_pool::*;
pub use item::*;
pub use layout::*;
pub use registry::*;
pub use stats::*;
pub use visual::*;
