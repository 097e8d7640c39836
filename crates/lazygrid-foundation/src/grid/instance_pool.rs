//! Pool of idle visual instances, keyed by template.
//!
//! Instances are created through the [`InstanceFactory`] on demand and
//! recycled by template key afterwards. A handle is either idle in this pool
//! or bound in the [`ActiveSet`], never both; the pool hands each idle handle
//! out once and only takes it back through [`InstancePool::release`].

use std::collections::VecDeque;
use std::fmt;

use crate::collections::map::HashMap;

use super::active_set::ActiveSet;
use super::config::PoolPolicy;
use super::error::GridError;
use super::item::TemplateKey;
use super::visual::{GridItemVisual, InstanceFactory};

/// Identity of a pooled instance, unique within one pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(u64);

impl InstanceId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A visual instance together with its pool bookkeeping.
#[derive(Debug)]
pub struct InstanceHandle<V> {
    id: InstanceId,
    template: TemplateKey,
    visual: V,
}

impl<V> InstanceHandle<V> {
    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn template(&self) -> &TemplateKey {
        &self.template
    }

    pub fn visual(&self) -> &V {
        &self.visual
    }

    pub fn visual_mut(&mut self) -> &mut V {
        &mut self.visual
    }

    fn into_visual(self) -> V {
        self.visual
    }
}

/// Lifetime counters for a pool.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PoolCounters {
    /// Instances created through the factory.
    pub created: usize,

    /// Instances handed back to the factory for destruction.
    pub destroyed: usize,

    /// Acquisitions served from the idle queue instead of the factory.
    pub reused: usize,
}

/// Idle instances grouped by template key.
#[derive(Debug)]
pub struct InstancePool<V> {
    /// FIFO queue of idle instances per template.
    idle: HashMap<TemplateKey, VecDeque<InstanceHandle<V>>>,

    policy: PoolPolicy,
    next_id: u64,
    counters: PoolCounters,
}

impl<V> InstancePool<V> {
    /// Creates a pool with the default (unbounded) policy.
    pub fn new() -> Self {
        Self::with_policy(PoolPolicy::default())
    }

    pub fn with_policy(policy: PoolPolicy) -> Self {
        Self {
            idle: HashMap::default(),
            policy,
            next_id: 0,
            counters: PoolCounters::default(),
        }
    }

    /// Takes an idle instance for `template`, or creates one.
    ///
    /// The returned instance is active.
    pub fn acquire<T, F>(
        &mut self,
        template: &TemplateKey,
        factory: &mut F,
    ) -> Result<InstanceHandle<V>, GridError>
    where
        V: GridItemVisual<T>,
        F: InstanceFactory<T, Visual = V>,
    {
        let reused = self.idle.get_mut(template).and_then(VecDeque::pop_front);

        let mut handle = match reused {
            Some(handle) => {
                self.counters.reused += 1;
                handle
            }
            None => {
                let visual = factory
                    .create(template)
                    .map_err(|err| GridError::Instantiation {
                        template: template.clone(),
                        reason: err.to_string(),
                    })?;
                let id = InstanceId(self.next_id);
                self.next_id += 1;
                self.counters.created += 1;
                log::trace!("Created instance {} for template '{}'", id, template);
                InstanceHandle {
                    id,
                    template: template.clone(),
                    visual,
                }
            }
        };

        handle.visual.set_active(true);
        Ok(handle)
    }

    /// Deactivates `handle` and queues it for reuse under its template.
    ///
    /// With a bounded policy, an instance that does not fit is destroyed
    /// right away instead.
    pub fn release<T, F>(&mut self, mut handle: InstanceHandle<V>, factory: &mut F)
    where
        V: GridItemVisual<T>,
        F: InstanceFactory<T, Visual = V>,
    {
        handle.visual.set_active(false);

        let queue = self.idle.entry(handle.template.clone()).or_default();
        let has_room = self
            .policy
            .max_idle_per_template
            .map_or(true, |max| queue.len() < max);

        if has_room {
            queue.push_back(handle);
        } else {
            log::trace!(
                "Pool for '{}' is full; destroying instance {}",
                handle.template,
                handle.id
            );
            self.counters.destroyed += 1;
            factory.destroy(handle.into_visual());
        }
    }

    /// Destroys every idle instance and every instance in `active`, exactly
    /// once each, and leaves both empty.
    ///
    /// Returns the number of instances destroyed.
    pub fn destroy_all<T, F>(&mut self, active: &mut ActiveSet<V>, factory: &mut F) -> usize
    where
        V: GridItemVisual<T>,
        F: InstanceFactory<T, Visual = V>,
    {
        let mut destroyed = 0;

        for (_, handle) in active.drain() {
            factory.destroy(handle.into_visual());
            destroyed += 1;
        }

        for (_, queue) in self.idle.drain() {
            for handle in queue {
                factory.destroy(handle.into_visual());
                destroyed += 1;
            }
        }

        self.counters.destroyed += destroyed;
        destroyed
    }

    /// Number of idle instances across all templates.
    pub fn idle_count(&self) -> usize {
        self.idle.values().map(VecDeque::len).sum()
    }

    /// Number of idle instances for one template.
    pub fn idle_count_for(&self, template: &TemplateKey) -> usize {
        self.idle.get(template).map_or(0, VecDeque::len)
    }

    /// Ids of all idle instances.
    pub fn idle_ids(&self) -> Vec<InstanceId> {
        self.idle
            .values()
            .flat_map(|queue| queue.iter().map(InstanceHandle::id))
            .collect()
    }

    pub fn counters(&self) -> &PoolCounters {
        &self.counters
    }

    /// Instances created and not yet destroyed, whether idle or active.
    pub fn live_count(&self) -> usize {
        self.counters.created - self.counters.destroyed
    }

    pub fn policy(&self) -> &PoolPolicy {
        &self.policy
    }
}

impl<V> Default for InstancePool<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::grid::error::InstantiationError;

    #[derive(Debug, Default)]
    struct StubVisual {
        active: bool,
    }

    impl GridItemVisual<()> for StubVisual {
        fn place(&mut self, _position: Point) {}

        fn set_active(&mut self, active: bool) {
            self.active = active;
        }

        fn render(&mut self, _data: &()) {}
    }

    #[derive(Default)]
    struct CountingFactory {
        created: usize,
        destroyed: usize,
        fail: bool,
    }

    impl InstanceFactory<()> for CountingFactory {
        type Visual = StubVisual;

        fn create(&mut self, _template: &TemplateKey) -> Result<StubVisual, InstantiationError> {
            if self.fail {
                return Err(InstantiationError::new("backend unavailable"));
            }
            self.created += 1;
            Ok(StubVisual::default())
        }

        fn destroy(&mut self, _visual: StubVisual) {
            self.destroyed += 1;
        }
    }

    fn key(name: &str) -> TemplateKey {
        TemplateKey::from(name)
    }

    #[test]
    fn test_acquire_creates_then_reuses() {
        let mut pool = InstancePool::new();
        let mut factory = CountingFactory::default();

        let first = pool.acquire(&key("row"), &mut factory).unwrap();
        assert!(first.visual().active);
        let first_id = first.id();

        pool.release(first, &mut factory);
        assert_eq!(pool.idle_count(), 1);

        let again = pool.acquire(&key("row"), &mut factory).unwrap();
        assert_eq!(again.id(), first_id);
        assert!(again.visual().active);
        assert_eq!(factory.created, 1);
        assert_eq!(pool.counters().reused, 1);
    }

    #[test]
    fn test_release_deactivates() {
        let mut pool = InstancePool::new();
        let mut factory = CountingFactory::default();

        let handle = pool.acquire(&key("row"), &mut factory).unwrap();
        pool.release(handle, &mut factory);

        let idle = &pool.idle[&key("row")];
        assert!(!idle[0].visual().active);
    }

    #[test]
    fn test_templates_do_not_mix() {
        let mut pool = InstancePool::new();
        let mut factory = CountingFactory::default();

        let header = pool.acquire(&key("header"), &mut factory).unwrap();
        pool.release(header, &mut factory);

        let _card = pool.acquire(&key("card"), &mut factory).unwrap();
        assert_eq!(factory.created, 2);
        assert_eq!(pool.idle_count_for(&key("header")), 1);
    }

    #[test]
    fn test_idle_queue_is_fifo() {
        let mut pool = InstancePool::new();
        let mut factory = CountingFactory::default();

        let a = pool.acquire(&key("row"), &mut factory).unwrap();
        let b = pool.acquire(&key("row"), &mut factory).unwrap();
        let (a_id, b_id) = (a.id(), b.id());
        pool.release(a, &mut factory);
        pool.release(b, &mut factory);

        assert_eq!(pool.acquire(&key("row"), &mut factory).unwrap().id(), a_id);
        assert_eq!(pool.acquire(&key("row"), &mut factory).unwrap().id(), b_id);
    }

    #[test]
    fn test_failed_creation_reports_template() {
        let mut pool: InstancePool<StubVisual> = InstancePool::new();
        let mut factory = CountingFactory {
            fail: true,
            ..Default::default()
        };

        let err = pool.acquire(&key("row"), &mut factory).unwrap_err();
        assert!(matches!(err, GridError::Instantiation { ref template, .. } if template.as_str() == "row"));
        assert_eq!(pool.counters().created, 0);
    }

    #[test]
    fn test_bounded_policy_destroys_overflow() {
        let mut pool = InstancePool::with_policy(PoolPolicy::bounded(1));
        let mut factory = CountingFactory::default();

        let a = pool.acquire(&key("row"), &mut factory).unwrap();
        let b = pool.acquire(&key("row"), &mut factory).unwrap();
        pool.release(a, &mut factory);
        pool.release(b, &mut factory);

        assert_eq!(pool.idle_count(), 1);
        assert_eq!(factory.destroyed, 1);
        assert_eq!(pool.live_count(), 1);
    }

    #[test]
    fn test_destroy_all_covers_idle_and_active() {
        let mut pool = InstancePool::new();
        let mut active = ActiveSet::new();
        let mut factory = CountingFactory::default();

        let idle = pool.acquire(&key("row"), &mut factory).unwrap();
        pool.release(idle, &mut factory);
        let bound = pool.acquire(&key("card"), &mut factory).unwrap();
        active.insert(0, bound);

        assert_eq!(pool.destroy_all(&mut active, &mut factory), 2);
        assert_eq!(factory.destroyed, 2);
        assert_eq!(pool.idle_count(), 0);
        assert!(active.is_empty());
        assert_eq!(pool.live_count(), 0);
    }
}
