//! Host viewport contract and a simple in-memory scroll state.
//!
//! The grid only reads the scroll offset and viewport extent. The one place
//! it writes the offset is [`DataGrid::move_to_start`] / [`DataGrid::move_to_end`].
//!
//! [`DataGrid::move_to_start`]: crate::grid::DataGrid::move_to_start
//! [`DataGrid::move_to_end`]: crate::grid::DataGrid::move_to_end

/// The scrolling host the grid is attached to.
///
/// Offsets are distances along the scroll axis from the start of the
/// content; zero means scrolled to the start.
pub trait Viewport {
    /// Current scroll offset.
    fn scroll_offset(&self) -> f32;

    /// Visible extent along the scroll axis.
    fn viewport_extent(&self) -> f32;

    /// Moves the content to `offset`.
    fn set_scroll_offset(&mut self, offset: f32);

    /// Informs the host of the total content extent after layout.
    fn set_content_extent(&mut self, _extent: f32) {}
}

/// In-memory [`Viewport`] with clamped scrolling.
///
/// Tracks the offset, the viewport extent and the maximum offset
/// (content extent minus viewport extent, never negative).
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollState {
    offset: f32,
    viewport_extent: f32,
    content_extent: f32,
    max_value: f32,
}

impl ScrollState {
    /// Creates a scroll state at offset zero. Until a content extent is
    /// set, scrolling is unbounded past the start.
    pub fn new(viewport_extent: f32) -> Self {
        Self {
            offset: 0.0,
            viewport_extent,
            content_extent: f32::INFINITY,
            max_value: f32::INFINITY,
        }
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Maximum reachable offset.
    pub fn max_value(&self) -> f32 {
        self.max_value
    }

    pub fn content_extent(&self) -> f32 {
        self.content_extent
    }

    /// Resizes the viewport, keeping the offset within the new bounds.
    pub fn set_viewport_extent(&mut self, extent: f32) {
        self.viewport_extent = extent;
        self.update_max_value();
    }

    /// Scrolls to `target`, clamped to `[0, max_value]`.
    pub fn scroll_to(&mut self, target: f32) {
        self.offset = target.clamp(0.0, self.max_value);
    }

    /// Scrolls by `delta` and returns the amount actually consumed.
    pub fn scroll_by(&mut self, delta: f32) -> f32 {
        let previous = self.offset;
        self.scroll_to(previous + delta);
        self.offset - previous
    }

    pub fn is_at_start(&self) -> bool {
        self.offset <= 0.0
    }

    pub fn is_at_end(&self) -> bool {
        self.offset >= self.max_value
    }

    fn update_max_value(&mut self) {
        self.max_value = (self.content_extent - self.viewport_extent).max(0.0);
        if self.offset > self.max_value {
            self.offset = self.max_value;
        }
    }
}

impl Viewport for ScrollState {
    fn scroll_offset(&self) -> f32 {
        self.offset
    }

    fn viewport_extent(&self) -> f32 {
        self.viewport_extent
    }

    fn set_scroll_offset(&mut self, offset: f32) {
        self.scroll_to(offset);
    }

    fn set_content_extent(&mut self, extent: f32) {
        self.content_extent = extent;
        self.update_max_value();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = ScrollState::new(200.0);
        assert_eq!(state.scroll_offset(), 0.0);
        assert_eq!(state.viewport_extent(), 200.0);
        assert!(state.is_at_start());
    }

    #[test]
    fn test_scroll_clamped_to_content() {
        let mut state = ScrollState::new(200.0);
        state.set_content_extent(500.0);
        assert_eq!(state.max_value(), 300.0);

        assert_eq!(state.scroll_by(250.0), 250.0);
        assert_eq!(state.scroll_by(100.0), 50.0);
        assert!(state.is_at_end());

        state.scroll_to(-20.0);
        assert_eq!(state.offset(), 0.0);
    }

    #[test]
    fn test_shrinking_content_pulls_offset_back() {
        let mut state = ScrollState::new(100.0);
        state.set_content_extent(1000.0);
        state.scroll_to(800.0);

        state.set_content_extent(400.0);
        assert_eq!(state.offset(), 300.0);
    }

    #[test]
    fn test_short_content_cannot_scroll() {
        let mut state = ScrollState::new(300.0);
        state.set_content_extent(120.0);
        assert_eq!(state.max_value(), 0.0);
        assert_eq!(state.scroll_by(40.0), 0.0);
    }
}
