//! The grid session: data assignment, per-tick culling and reconciliation.
//!
//! A [`DataGrid`] owns the item list, the instance pool and the active set
//! for one viewport. The host calls [`DataGrid::tick`] once per frame; the
//! grid re-culls only when the scroll offset or viewport extent changed (or
//! a retry is pending) and then binds or releases instances for the items
//! whose visibility flipped.
//!
//! Per item the lifecycle is `Hidden -> Rendered -> Hidden`, driven only by
//! visibility flips. Repeating the previous visibility is a no-op.

use web_time::Instant;

use crate::scroll::Viewport;

use super::active_set::ActiveSet;
use super::config::GridConfig;
use super::culling::CullingWindow;
use super::error::GridError;
use super::instance_pool::{InstanceId, InstancePool};
use super::item::DataItem;
use super::layout::{layout_items, LayoutResult};
use super::stats::{GridStats, TickReport};
use super::visual::{GridItemVisual, InstanceFactory};

/// A virtualized grid attached to one viewport.
///
/// # Example
///
/// ```rust,ignore
/// let mut grid = DataGrid::attach(GridConfig::vertical(), registry)?;
/// grid.set_items(items);
///
/// let mut viewport = ScrollState::new(600.0);
/// grid.sync_content_extent(&mut viewport);
///
/// loop {
///     viewport.scroll_by(next_delta());
///     grid.tick(&viewport);
/// }
/// ```
pub struct DataGrid<T, F: InstanceFactory<T>> {
    config: GridConfig,
    factory: F,
    items: Vec<DataItem<T>>,
    pool: InstancePool<F::Visual>,
    active: ActiveSet<F::Visual>,

    /// Result of the last layout pass.
    layout: LayoutResult,

    /// Offset and extent seen by the last non-skipped tick.
    last_offset: Option<f32>,
    last_viewport_extent: Option<f32>,

    /// Forces the next tick to re-cull even if nothing moved.
    render_requested: bool,

    window: Option<CullingWindow>,
    stats: GridStats,
    torn_down: bool,
}

impl<T, F: InstanceFactory<T>> DataGrid<T, F> {
    /// Attaches a grid with the given configuration and instantiation backend.
    ///
    /// A contradictory configuration disables the grid: the error is logged
    /// and returned, and no grid is created.
    pub fn attach(config: GridConfig, factory: F) -> Result<Self, GridError> {
        if let Err(err) = config.validate() {
            log::error!("Grid disabled: {}", err);
            return Err(err);
        }

        let pool = InstancePool::with_policy(config.pool.clone());
        Ok(Self {
            config,
            factory,
            items: Vec::new(),
            pool,
            active: ActiveSet::new(),
            layout: LayoutResult::default(),
            last_offset: None,
            last_viewport_extent: None,
            render_requested: true,
            window: None,
            stats: GridStats::default(),
            torn_down: false,
        })
    }

    /// Replaces the data list.
    ///
    /// Every active instance is released back to its pool before the new
    /// list is installed, then the new list is laid out. Nothing is rendered
    /// until the next tick.
    pub fn set_items(&mut self, mut items: Vec<DataItem<T>>) {
        if self.torn_down {
            log::warn!("Ignoring data assignment on a destroyed grid");
            return;
        }

        let flushed = self.release_all();

        for item in &mut items {
            item.reset_render_state();
        }
        self.items = items;

        self.layout = layout_items(
            &mut self.items,
            self.config.axis,
            self.config.arrangement,
            self.config.cross_extent.unwrap_or(0.0),
        );
        self.stats.oversized_items = self.layout.oversized.len();
        self.window = None;
        self.render_requested = true;
        self.refresh_stats();

        log::debug!(
            "Assigned {} items (released {}), content extent {}",
            self.items.len(),
            flushed,
            self.layout.total_extent
        );
    }

    /// Drops all items, releasing their instances to the pool.
    pub fn clear(&mut self) {
        self.set_items(Vec::new());
    }

    /// Runs one frame of culling and reconciliation.
    pub fn tick<P>(&mut self, viewport: &P) -> TickReport
    where
        P: Viewport + ?Sized,
    {
        if self.torn_down {
            return TickReport::skipped();
        }

        let started = Instant::now();
        let offset = viewport.scroll_offset();
        let extent = viewport.viewport_extent();

        if !extent.is_finite() || extent <= 0.0 {
            log::error!("Skipping tick: {}", GridError::InvalidViewport { extent });
            return TickReport::skipped();
        }
        if !offset.is_finite() {
            log::error!("Skipping tick: {}", GridError::InvalidScrollOffset { offset });
            return TickReport::skipped();
        }

        let moved =
            self.last_offset != Some(offset) || self.last_viewport_extent != Some(extent);
        if !moved && !self.render_requested {
            return TickReport::skipped();
        }

        self.last_offset = Some(offset);
        self.last_viewport_extent = Some(extent);
        self.render_requested = false;

        let window = CullingWindow::compute(offset, extent, &self.config.culling);
        self.window = Some(window);

        let axis = self.config.axis;
        let mut report = TickReport::default();

        for (index, item) in self.items.iter_mut().enumerate() {
            item.need_render = window.is_visible(item, axis);

            match (item.need_render, item.is_rendered) {
                (true, false) => {
                    match bind_item(&mut self.pool, &mut self.active, &mut self.factory, index, item)
                    {
                        Ok(()) => report.rendered += 1,
                        Err(err @ GridError::Instantiation { .. }) => {
                            log::error!("Item {} not rendered this tick: {}", index, err);
                            report.failed += 1;
                        }
                        Err(err) => {
                            log::error!("Inconsistent grid state: {}", err);
                            report.inconsistencies += 1;
                        }
                    }
                }
                (false, true) => {
                    match unbind_item(&mut self.pool, &mut self.active, &mut self.factory, index, item)
                    {
                        Ok(()) => report.released += 1,
                        Err(err) => {
                            log::error!("Inconsistent grid state: {}", err);
                            report.inconsistencies += 1;
                        }
                    }
                }
                _ => {}
            }
        }

        // Failed bindings are retried next tick even if the offset holds still.
        if report.failed > 0 {
            self.render_requested = true;
        }

        report.duration = started.elapsed();
        log::trace!(
            "Tick at offset {}: window [{}, {}], rendered {}, released {}, failed {}",
            offset,
            window.leading,
            window.trailing,
            report.rendered,
            report.released,
            report.failed
        );

        self.stats.instantiation_failures += report.failed;
        self.stats.consistency_errors += report.inconsistencies;
        self.stats.last_tick = report.clone();
        self.refresh_stats();
        report
    }

    /// Forces the next tick to re-cull even if the offset is unchanged.
    pub fn request_render(&mut self) {
        self.render_requested = true;
    }

    /// Scrolls the viewport to the start of the content.
    pub fn move_to_start<P>(&self, viewport: &mut P)
    where
        P: Viewport + ?Sized,
    {
        viewport.set_scroll_offset(0.0);
    }

    /// Scrolls the viewport so the end of the content is at its far edge.
    pub fn move_to_end<P>(&self, viewport: &mut P)
    where
        P: Viewport + ?Sized,
    {
        self.sync_content_extent(viewport);
        let target = (self.content_extent() - viewport.viewport_extent()).max(0.0);
        viewport.set_scroll_offset(target);
    }

    /// Pushes the current content extent to the host.
    pub fn sync_content_extent<P>(&self, viewport: &mut P)
    where
        P: Viewport + ?Sized,
    {
        viewport.set_content_extent(self.content_extent());
    }

    /// Destroys every pooled and active instance exactly once.
    ///
    /// The grid ignores further data assignments and ticks afterwards.
    /// Dropping the grid does this automatically. Returns the number of
    /// instances destroyed.
    pub fn destroy(&mut self) -> usize {
        if self.torn_down {
            return 0;
        }
        self.torn_down = true;

        let destroyed = self
            .pool
            .destroy_all::<T, F>(&mut self.active, &mut self.factory);
        for item in &mut self.items {
            item.reset_render_state();
        }
        self.refresh_stats();

        log::debug!("Grid destroyed {} instances", destroyed);
        destroyed
    }

    pub fn is_destroyed(&self) -> bool {
        self.torn_down
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn items(&self) -> &[DataItem<T>] {
        &self.items
    }

    pub fn item(&self, index: usize) -> Option<&DataItem<T>> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total content extent along the scroll axis.
    pub fn content_extent(&self) -> f32 {
        self.layout.total_extent
    }

    pub fn layout(&self) -> &LayoutResult {
        &self.layout
    }

    /// Culling window of the last non-skipped tick.
    pub fn window(&self) -> Option<CullingWindow> {
        self.window
    }

    pub fn stats(&self) -> &GridStats {
        &self.stats
    }

    /// Indices of rendered items, in data order.
    pub fn visible_indices(&self) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.is_rendered)
            .map(|(index, _)| index)
            .collect()
    }

    /// The visual bound to the item at `index`, if it is rendered.
    pub fn instance_for(&self, index: usize) -> Option<&F::Visual> {
        self.active.get(index).map(|handle| handle.visual())
    }

    /// Ids of instances bound to items.
    pub fn active_instance_ids(&self) -> Vec<InstanceId> {
        self.active.instance_ids()
    }

    /// Ids of idle pooled instances.
    pub fn pooled_instance_ids(&self) -> Vec<InstanceId> {
        self.pool.idle_ids()
    }

    /// Indices the active set holds, in binding order.
    pub fn active_indices(&self) -> Vec<usize> {
        self.active.indices().collect()
    }

    /// Instances created and not yet destroyed.
    pub fn live_instance_count(&self) -> usize {
        self.pool.live_count()
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn factory_mut(&mut self) -> &mut F {
        &mut self.factory
    }

    fn release_all(&mut self) -> usize {
        let mut released = 0;
        for (index, mut handle) in self.active.drain() {
            handle.visual_mut().release();
            self.pool.release::<T, F>(handle, &mut self.factory);
            if let Some(item) = self.items.get_mut(index) {
                item.reset_render_state();
            }
            released += 1;
        }
        released
    }

    fn refresh_stats(&mut self) {
        let counters = self.pool.counters();
        self.stats.items_in_use = self.active.len();
        self.stats.items_in_pool = self.pool.idle_count();
        self.stats.total_created = counters.created;
        self.stats.total_destroyed = counters.destroyed;
        self.stats.reuse_count = counters.reused;
    }
}

impl<T, F: InstanceFactory<T>> Drop for DataGrid<T, F> {
    fn drop(&mut self) {
        self.destroy();
    }
}

fn bind_item<T, F>(
    pool: &mut InstancePool<F::Visual>,
    active: &mut ActiveSet<F::Visual>,
    factory: &mut F,
    index: usize,
    item: &mut DataItem<T>,
) -> Result<(), GridError>
where
    F: InstanceFactory<T>,
{
    if active.contains(index) {
        item.is_rendered = true;
        return Err(GridError::DuplicateActiveInstance { index });
    }

    let mut handle = pool.acquire::<T, F>(item.template(), factory)?;
    let visual = handle.visual_mut();
    visual.place(item.position());
    visual.render(item.data());

    active.insert(index, handle);
    item.is_rendered = true;
    Ok(())
}

fn unbind_item<T, F>(
    pool: &mut InstancePool<F::Visual>,
    active: &mut ActiveSet<F::Visual>,
    factory: &mut F,
    index: usize,
    item: &mut DataItem<T>,
) -> Result<(), GridError>
where
    F: InstanceFactory<T>,
{
    item.is_rendered = false;

    let mut handle = active
        .remove(index)
        .ok_or(GridError::MissingActiveInstance { index })?;
    handle.visual_mut().release();
    pool.release::<T, F>(handle, factory);
    Ok(())
}
