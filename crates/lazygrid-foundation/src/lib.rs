//! Foundation for virtualized lists and grids.
//!
//! Given a large ordered collection of items with known sizes, this crate
//! lays the items out, decides which of them fall inside (or near) a
//! scrolling viewport, and keeps a bounded set of pooled visual instances
//! bound to exactly those items. Rendering cost stays proportional to the
//! viewport, not to the collection.
//!
//! The host owns scrolling and the rendering backend. It plugs in through
//! [`Viewport`](scroll::Viewport) and [`InstanceFactory`](grid::InstanceFactory)
//! and calls [`DataGrid::tick`](grid::DataGrid::tick) once per frame.
//!
//! ```rust,ignore
//! let mut grid = DataGrid::attach(GridConfig::vertical(), registry)?;
//! grid.set_items(items);
//! let mut viewport = ScrollState::new(600.0);
//! viewport.set_content_extent(grid.content_extent());
//!
//! // every frame
//! viewport.scroll_by(delta);
//! grid.tick(&viewport);
//! ```

pub mod collections;
pub mod geometry;
pub mod grid;
pub mod scroll;

pub use geometry::*;
pub use grid::*;
pub use scroll::*;
