//! Instances currently bound to items.
//!
//! Keyed by the item's index in the current data list. Reassigning the data
//! list always drains the set first, so an index never refers to an item of
//! a previous list.

use crate::collections::map::IndexMap;

use super::instance_pool::{InstanceHandle, InstanceId};

/// One entry per rendered item. Iteration follows binding order.
#[derive(Debug)]
pub struct ActiveSet<V> {
    entries: IndexMap<usize, InstanceHandle<V>>,
}

impl<V> ActiveSet<V> {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::default(),
        }
    }

    /// Binds `handle` to the item at `index`.
    ///
    /// Returns the handle previously bound to that item, if any. Callers
    /// check [`ActiveSet::contains`] first; a displaced handle means the
    /// bookkeeping was already inconsistent.
    pub fn insert(&mut self, index: usize, handle: InstanceHandle<V>) -> Option<InstanceHandle<V>> {
        self.entries.insert(index, handle)
    }

    /// Unbinds and returns the instance for the item at `index`.
    pub fn remove(&mut self, index: usize) -> Option<InstanceHandle<V>> {
        self.entries.shift_remove(&index)
    }

    pub fn get(&self, index: usize) -> Option<&InstanceHandle<V>> {
        self.entries.get(&index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut InstanceHandle<V>> {
        self.entries.get_mut(&index)
    }

    pub fn contains(&self, index: usize) -> bool {
        self.entries.contains_key(&index)
    }

    /// Removes every entry, in binding order.
    pub fn drain(&mut self) -> impl Iterator<Item = (usize, InstanceHandle<V>)> + '_ {
        self.entries.drain(..)
    }

    /// Indices of bound items, in binding order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.keys().copied()
    }

    pub fn instance_ids(&self) -> Vec<InstanceId> {
        self.entries.values().map(InstanceHandle::id).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> Default for ActiveSet<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::grid::error::InstantiationError;
    use crate::grid::instance_pool::InstancePool;
    use crate::grid::item::TemplateKey;
    use crate::grid::visual::{GridItemVisual, InstanceFactory};

    struct Dot;

    impl GridItemVisual<u8> for Dot {
        fn place(&mut self, _position: Point) {}

        fn set_active(&mut self, _active: bool) {}

        fn render(&mut self, _data: &u8) {}
    }

    struct Dots;

    impl InstanceFactory<u8> for Dots {
        type Visual = Dot;

        fn create(&mut self, _template: &TemplateKey) -> Result<Dot, InstantiationError> {
            Ok(Dot)
        }

        fn destroy(&mut self, _visual: Dot) {}
    }

    fn handles(count: usize) -> Vec<InstanceHandle<Dot>> {
        let mut pool = InstancePool::new();
        let template = TemplateKey::from("dot");
        (0..count)
            .map(|_| pool.acquire::<u8, Dots>(&template, &mut Dots).unwrap())
            .collect()
    }

    #[test]
    fn test_drain_follows_binding_order() {
        let mut active = ActiveSet::new();
        for (index, handle) in [7, 2, 5].into_iter().zip(handles(3)) {
            assert!(active.insert(index, handle).is_none());
        }

        assert_eq!(active.indices().collect::<Vec<_>>(), vec![7, 2, 5]);
        let drained: Vec<usize> = active.drain().map(|(index, _)| index).collect();
        assert_eq!(drained, vec![7, 2, 5]);
        assert!(active.is_empty());
    }

    #[test]
    fn test_remove_keeps_remaining_order() {
        let mut active = ActiveSet::new();
        for (index, handle) in [0, 1, 2].into_iter().zip(handles(3)) {
            active.insert(index, handle);
        }

        let removed = active.remove(1).unwrap();
        assert!(!active.contains(1));
        assert!(active.remove(1).is_none());
        assert_eq!(active.indices().collect::<Vec<_>>(), vec![0, 2]);
        assert!(!active.instance_ids().contains(&removed.id()));
    }

    #[test]
    fn test_insert_reports_displaced_handle() {
        let mut active = ActiveSet::new();
        let mut fresh = handles(2);
        let second = fresh.pop().unwrap();
        let first = fresh.pop().unwrap();
        let first_id = first.id();

        active.insert(4, first);
        let displaced = active.insert(4, second).unwrap();
        assert_eq!(displaced.id(), first_id);
        assert_eq!(active.len(), 1);
    }
}
