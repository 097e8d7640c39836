//! Layout engine for grid items.
//!
//! Assigns a content-space position to every item and returns the total
//! content extent along the scroll axis. Layout is a pure pass over the
//! item list; it never touches the render flags.
//!
//! Two strategies cover the four supported configurations:
//! - **Strip**: a single row (horizontal scroll) or column (vertical scroll).
//!   Each item starts where the previous one ended.
//! - **Wrap**: items fill a strip across the scroll axis up to the fixed
//!   cross extent, then a new strip starts further along the scroll axis.
//!   Strips are columns when scrolling horizontally and rows when scrolling
//!   vertically. A strip is as thick as its thickest item.

use smallvec::SmallVec;

use super::config::{Arrangement, ScrollAxis};
use super::item::DataItem;

/// Result of a layout pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutResult {
    /// Content extent along the scroll axis.
    pub total_extent: f32,

    /// Indices of items too large for the cross extent. Each was given a
    /// strip of its own.
    pub oversized: SmallVec<[usize; 4]>,
}

impl LayoutResult {
    pub fn has_oversized(&self) -> bool {
        !self.oversized.is_empty()
    }
}

/// Lays out `items` in place.
///
/// `cross_extent` is only read for [`Arrangement::Both`]. Any other
/// arrangement lays the items out as a single strip along `axis`;
/// contradictory axis/arrangement pairs are rejected earlier by
/// [`GridConfig::validate`](super::GridConfig::validate).
pub fn layout_items<T>(
    items: &mut [DataItem<T>],
    axis: ScrollAxis,
    arrangement: Arrangement,
    cross_extent: f32,
) -> LayoutResult {
    let mut result = LayoutResult::default();

    result.total_extent = match arrangement {
        Arrangement::Both => layout_wrapped(items, axis, cross_extent, &mut result.oversized),
        Arrangement::Horizontal | Arrangement::Vertical => layout_strip(items, axis),
    };

    log::debug!(
        "Laid out {} items along {:?} ({:?}), extent {}",
        items.len(),
        axis,
        arrangement,
        result.total_extent
    );

    result
}

fn layout_strip<T>(items: &mut [DataItem<T>], axis: ScrollAxis) -> f32 {
    let mut offset = 0.0;
    for item in items.iter_mut() {
        item.position = axis.point(offset, 0.0);
        offset += axis.main_size(item.size());
    }
    offset
}

fn layout_wrapped<T>(
    items: &mut [DataItem<T>],
    axis: ScrollAxis,
    cross_extent: f32,
    oversized: &mut SmallVec<[usize; 4]>,
) -> f32 {
    // Offset of the current strip along the scroll axis.
    let mut offset = 0.0;
    // Thickness of the current strip (its largest main-axis size).
    let mut strip_main = 0.0_f32;
    // Cross-axis space already used in the current strip.
    let mut strip_cross = 0.0;

    for (index, item) in items.iter_mut().enumerate() {
        let main = axis.main_size(item.size());
        let cross = axis.cross_size(item.size());

        if cross > cross_extent {
            log::warn!(
                "Item {} cross size {} exceeds fixed cross extent {}; placing it in its own strip",
                index,
                cross,
                cross_extent
            );
            oversized.push(index);

            offset += strip_main;
            item.position = axis.point(offset, 0.0);
            offset += main;

            strip_main = 0.0;
            strip_cross = 0.0;
        } else if strip_cross + cross > cross_extent {
            offset += strip_main;
            item.position = axis.point(offset, 0.0);

            strip_main = main;
            strip_cross = cross;
        } else {
            item.position = axis.point(offset, strip_cross);

            strip_cross += cross;
            strip_main = strip_main.max(main);
        }
    }

    offset + strip_main
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Size};

    fn items(sizes: &[(f32, f32)]) -> Vec<DataItem<usize>> {
        sizes
            .iter()
            .enumerate()
            .map(|(i, &(w, h))| DataItem::new("cell", Size::new(w, h), i))
            .collect()
    }

    fn positions(items: &[DataItem<usize>]) -> Vec<Point> {
        items.iter().map(|item| item.position()).collect()
    }

    #[test]
    fn test_single_row() {
        let mut row = items(&[(10.0, 5.0), (20.0, 5.0), (30.0, 5.0)]);
        let result = layout_items(&mut row, ScrollAxis::Horizontal, Arrangement::Horizontal, 0.0);

        assert_eq!(result.total_extent, 60.0);
        assert_eq!(
            positions(&row),
            vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(30.0, 0.0)]
        );
    }

    #[test]
    fn test_single_column_grows_downward() {
        let mut column = items(&[(80.0, 50.0), (80.0, 20.0), (80.0, 30.0)]);
        let result = layout_items(&mut column, ScrollAxis::Vertical, Arrangement::Vertical, 0.0);

        assert_eq!(result.total_extent, 100.0);
        assert_eq!(
            positions(&column),
            vec![Point::new(0.0, 0.0), Point::new(0.0, -50.0), Point::new(0.0, -70.0)]
        );
    }

    #[test]
    fn test_column_wrap_breaks_on_overflow() {
        // 10 + 10 fits in 25; the third item would need 30.
        let mut cells = items(&[(10.0, 10.0), (10.0, 10.0), (10.0, 10.0)]);
        let result = layout_items(&mut cells, ScrollAxis::Horizontal, Arrangement::Both, 25.0);

        assert_eq!(
            positions(&cells),
            vec![Point::new(0.0, 0.0), Point::new(0.0, -10.0), Point::new(10.0, 0.0)]
        );
        assert_eq!(result.total_extent, 20.0);
        assert!(!result.has_oversized());
    }

    #[test]
    fn test_column_wrap_uses_widest_item() {
        let mut cells = items(&[(10.0, 10.0), (40.0, 10.0), (5.0, 10.0), (15.0, 10.0)]);
        let result = layout_items(&mut cells, ScrollAxis::Horizontal, Arrangement::Both, 20.0);

        assert_eq!(cells[2].position(), Point::new(40.0, 0.0));
        assert_eq!(cells[3].position(), Point::new(40.0, -10.0));
        assert_eq!(result.total_extent, 55.0);
    }

    #[test]
    fn test_row_wrap_left_aligns() {
        let mut cells = items(&[(30.0, 10.0), (30.0, 20.0), (30.0, 10.0), (50.0, 5.0)]);
        let result = layout_items(&mut cells, ScrollAxis::Vertical, Arrangement::Both, 100.0);

        assert_eq!(
            positions(&cells),
            vec![
                Point::new(0.0, 0.0),
                Point::new(30.0, 0.0),
                Point::new(60.0, 0.0),
                Point::new(0.0, -20.0),
            ]
        );
        assert_eq!(result.total_extent, 25.0);
    }

    #[test]
    fn test_oversized_item_gets_own_strip() {
        let mut cells = items(&[(10.0, 10.0), (20.0, 40.0), (10.0, 10.0)]);
        let result = layout_items(&mut cells, ScrollAxis::Horizontal, Arrangement::Both, 25.0);

        assert_eq!(result.oversized.as_slice(), &[1]);
        assert_eq!(cells[1].position(), Point::new(10.0, 0.0));
        assert_eq!(cells[2].position(), Point::new(30.0, 0.0));
        assert_eq!(result.total_extent, 40.0);
    }

    #[test]
    fn test_empty_list_has_no_extent() {
        let mut empty: Vec<DataItem<usize>> = Vec::new();
        let result = layout_items(&mut empty, ScrollAxis::Vertical, Arrangement::Both, 10.0);
        assert_eq!(result.total_extent, 0.0);
    }

    #[test]
    fn test_layout_is_idempotent() {
        let mut cells = items(&[(12.0, 7.0), (3.0, 30.0), (9.0, 9.0), (14.0, 2.0)]);
        let first = layout_items(&mut cells, ScrollAxis::Vertical, Arrangement::Both, 20.0);
        let before = positions(&cells);
        let second = layout_items(&mut cells, ScrollAxis::Vertical, Arrangement::Both, 20.0);

        assert_eq!(first, second);
        assert_eq!(before, positions(&cells));
    }
}
