//! Logical data items placed by the grid.
//!
//! Contains the record for a single item: which template renders it, how
//! big it is, and the position and visibility flags the grid computes.

use std::fmt;
use std::rc::Rc;

use crate::geometry::{Point, Size};

use super::config::ScrollAxis;

/// Identifies the visual template (and therefore the pool) an item uses.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TemplateKey(Rc<str>);

impl TemplateKey {
    pub fn new(key: impl AsRef<str>) -> Self {
        Self(Rc::from(key.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TemplateKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for TemplateKey {
    fn from(key: String) -> Self {
        Self(Rc::from(key))
    }
}

impl fmt::Display for TemplateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A logical record in the grid.
///
/// The template key and size are fixed at construction. Position is written
/// only by layout; the render flags are owned by the grid's update loop.
#[derive(Clone, Debug)]
pub struct DataItem<T> {
    template: TemplateKey,
    size: Size,
    data: T,

    /// Top-left position in content space (set during layout).
    pub(crate) position: Point,

    /// Whether the last culling pass wanted this item on screen.
    pub(crate) need_render: bool,

    /// Whether an active instance is currently bound to this item.
    pub(crate) is_rendered: bool,
}

impl<T> DataItem<T> {
    /// Creates a new item. It starts hidden at the content origin.
    pub fn new(template: impl Into<TemplateKey>, size: Size, data: T) -> Self {
        Self {
            template: template.into(),
            size,
            data,
            position: Point::ZERO,
            need_render: false,
            is_rendered: false,
        }
    }

    pub fn template(&self) -> &TemplateKey {
        &self.template
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn need_render(&self) -> bool {
        self.need_render
    }

    pub fn is_rendered(&self) -> bool {
        self.is_rendered
    }

    /// Start and end of the item along the scroll axis, as distances from
    /// the content origin.
    pub fn main_axis_span(&self, axis: ScrollAxis) -> (f32, f32) {
        let start = axis.main_offset(self.position);
        (start, start + axis.main_size(self.size))
    }

    /// Consumes the item and returns its payload.
    pub fn into_data(self) -> T {
        self.data
    }

    pub(crate) fn reset_render_state(&mut self) {
        self.need_render = false;
        self.is_rendered = false;
    }
}
