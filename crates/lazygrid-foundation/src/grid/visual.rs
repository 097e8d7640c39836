//! Collaborator traits for the rendering backend.
//!
//! The grid never draws anything itself. It asks an [`InstanceFactory`] for
//! visuals by template key, positions them, and tells them when to bind to
//! an item's data and when to let go of it.

use crate::geometry::Point;

use super::error::InstantiationError;
use super::item::TemplateKey;

/// A poolable visual instance, bound to at most one item at a time.
///
/// Different templates usually need different behavior; implement this
/// trait per template and hand out `Box<dyn GridItemVisual<T>>` when the
/// factory has to choose between them at runtime.
pub trait GridItemVisual<T> {
    /// Attaches the visual to the grid content at `position`.
    fn place(&mut self, position: Point);

    /// Shows or hides the visual. Pooled visuals are inactive.
    fn set_active(&mut self, active: bool);

    /// Fills the visual from the item's data.
    fn render(&mut self, data: &T);

    /// Tears down anything created dynamically while bound (downloaded
    /// images and the like). Called before the visual goes back to the pool.
    fn release(&mut self) {}
}

impl<T, V> GridItemVisual<T> for Box<V>
where
    V: GridItemVisual<T> + ?Sized,
{
    fn place(&mut self, position: Point) {
        (**self).place(position);
    }

    fn set_active(&mut self, active: bool) {
        (**self).set_active(active);
    }

    fn render(&mut self, data: &T) {
        (**self).render(data);
    }

    fn release(&mut self) {
        (**self).release();
    }
}

/// Creates and destroys visual instances for template keys.
pub trait InstanceFactory<T> {
    type Visual: GridItemVisual<T>;

    /// Creates a new visual for `template`.
    ///
    /// Failure is not fatal: the grid skips the item for this tick and
    /// retries on the next one.
    fn create(&mut self, template: &TemplateKey) -> Result<Self::Visual, InstantiationError>;

    /// Destroys a visual. Called exactly once per created visual.
    fn destroy(&mut self, visual: Self::Visual);
}
