//! Item list builders for tests and benchmarks.
//!
//! Every builder labels its items `item-<index>`.

use lazygrid_foundation::{DataItem, Size};

/// Width used for items in a single column.
pub const COLUMN_WIDTH: f32 = 100.0;

/// Height used for items in a single row.
pub const ROW_HEIGHT: f32 = 40.0;

pub fn label(index: usize) -> String {
    format!("item-{index}")
}

/// Items for a vertical list with the given heights.
pub fn column_items(heights: &[f32]) -> Vec<DataItem<String>> {
    heights
        .iter()
        .enumerate()
        .map(|(i, &height)| DataItem::new("row", Size::new(COLUMN_WIDTH, height), label(i)))
        .collect()
}

/// Items for a horizontal list with the given widths.
pub fn row_items(widths: &[f32]) -> Vec<DataItem<String>> {
    widths
        .iter()
        .enumerate()
        .map(|(i, &width)| DataItem::new("cell", Size::new(width, ROW_HEIGHT), label(i)))
        .collect()
}

/// Items with explicit `(width, height)` sizes.
pub fn sized_items(sizes: &[(f32, f32)]) -> Vec<DataItem<String>> {
    sizes
        .iter()
        .enumerate()
        .map(|(i, &(width, height))| DataItem::new("cell", Size::new(width, height), label(i)))
        .collect()
}

/// `count` identical items of one template.
pub fn uniform_items(count: usize, size: Size, template: &str) -> Vec<DataItem<String>> {
    (0..count)
        .map(|i| DataItem::new(template, size, label(i)))
        .collect()
}

/// `count` identical items cycling through `templates`.
pub fn mixed_items(count: usize, size: Size, templates: &[&str]) -> Vec<DataItem<String>> {
    assert!(!templates.is_empty(), "mixed_items needs at least one template");
    (0..count)
        .map(|i| DataItem::new(templates[i % templates.len()], size, label(i)))
        .collect()
}
