//! Viewport culling.
//!
//! Computes the content-space window that should be populated for the
//! current scroll offset and classifies items against it. The window is the
//! viewport widened by a prefetch margin on both sides, so items are bound
//! to instances a little before they scroll into view and released a little
//! after they scroll out.
//!
//! Both scroll axes use the same span-overlap test: an item is visible when
//! any part of its extent along the scroll axis touches the window.

use super::config::{CullingConfig, ScrollAxis};
use super::item::DataItem;

/// Content-space interval along the scroll axis that should be rendered.
///
/// Bounds are distances from the content origin, `leading <= trailing`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CullingWindow {
    pub leading: f32,
    pub trailing: f32,
}

impl CullingWindow {
    /// Computes the window for a scroll offset and viewport extent.
    ///
    /// Negative offsets (overscroll before the start) are treated as zero.
    pub fn compute(scroll_offset: f32, viewport_extent: f32, config: &CullingConfig) -> Self {
        let offset = scroll_offset.max(0.0);
        let margin = config.margin_for(viewport_extent);
        Self {
            leading: offset - margin,
            trailing: offset + viewport_extent + margin,
        }
    }

    /// Returns true if `[start, end]` overlaps the window. Touching counts.
    pub fn overlaps(&self, start: f32, end: f32) -> bool {
        start <= self.trailing && end >= self.leading
    }

    /// Returns true if the item should be rendered.
    pub fn is_visible<T>(&self, item: &DataItem<T>, axis: ScrollAxis) -> bool {
        let (start, end) = item.main_axis_span(axis);
        self.overlaps(start, end)
    }

    pub fn extent(&self) -> f32 {
        self.trailing - self.leading
    }
}
