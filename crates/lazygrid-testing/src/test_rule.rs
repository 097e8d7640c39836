use std::fmt;

use lazygrid_foundation::{
    DataGrid, DataItem, GridConfig, InstanceId, ScrollState, TickReport, Viewport,
};
use rustc_hash::FxHashSet;

use crate::recording::{EventLog, RecordingFactory};

/// Drives a [`DataGrid`] backed by a [`RecordingFactory`] against an
/// in-memory [`ScrollState`].
pub struct GridTestRule<T: fmt::Display> {
    grid: DataGrid<T, RecordingFactory>,
    viewport: ScrollState,
    log: EventLog,
}

impl<T: fmt::Display> GridTestRule<T> {
    /// Creates a rule with a fresh recording factory.
    ///
    /// Panics if the configuration is rejected.
    pub fn new(config: GridConfig, viewport_extent: f32) -> Self {
        Self::with_factory(config, viewport_extent, RecordingFactory::new())
    }

    pub fn with_factory(config: GridConfig, viewport_extent: f32, factory: RecordingFactory) -> Self {
        let log = factory.log().clone();
        let grid = match DataGrid::attach(config, factory) {
            Ok(grid) => grid,
            Err(err) => panic!("GridTestRule: grid rejected its configuration: {err}"),
        };
        Self {
            grid,
            viewport: ScrollState::new(viewport_extent),
            log,
        }
    }

    /// Assigns items and pushes the new content extent to the viewport.
    pub fn set_items(&mut self, items: Vec<DataItem<T>>) {
        self.grid.set_items(items);
        self.grid.sync_content_extent(&mut self.viewport);
    }

    pub fn tick(&mut self) -> TickReport {
        self.grid.tick(&self.viewport)
    }

    pub fn scroll_to(&mut self, offset: f32) -> TickReport {
        self.viewport.scroll_to(offset);
        self.tick()
    }

    pub fn scroll_by(&mut self, delta: f32) -> TickReport {
        self.viewport.scroll_by(delta);
        self.tick()
    }

    pub fn move_to_start(&mut self) -> TickReport {
        self.grid.move_to_start(&mut self.viewport);
        self.tick()
    }

    pub fn move_to_end(&mut self) -> TickReport {
        self.grid.move_to_end(&mut self.viewport);
        self.tick()
    }

    pub fn resize_viewport(&mut self, extent: f32) -> TickReport {
        self.viewport.set_viewport_extent(extent);
        self.tick()
    }

    pub fn destroy(&mut self) -> usize {
        self.grid.destroy()
    }

    pub fn grid(&self) -> &DataGrid<T, RecordingFactory> {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut DataGrid<T, RecordingFactory> {
        &mut self.grid
    }

    pub fn factory_mut(&mut self) -> &mut RecordingFactory {
        self.grid.factory_mut()
    }

    pub fn viewport(&self) -> &ScrollState {
        &self.viewport
    }

    pub fn offset(&self) -> f32 {
        self.viewport.scroll_offset()
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// Indices of rendered items, in data order.
    pub fn visible(&self) -> Vec<usize> {
        self.grid.visible_indices()
    }

    /// Checks the pool, active-set and lifecycle invariants.
    pub fn assert_invariants(&self) {
        let active = self.grid.active_instance_ids();
        let pooled = self.grid.pooled_instance_ids();

        let active_set: FxHashSet<InstanceId> = active.iter().copied().collect();
        let pooled_set: FxHashSet<InstanceId> = pooled.iter().copied().collect();
        assert_eq!(active_set.len(), active.len(), "duplicate active instance");
        assert_eq!(pooled_set.len(), pooled.len(), "duplicate pooled instance");
        assert!(
            active_set.is_disjoint(&pooled_set),
            "instance both active and pooled: {:?}",
            active_set.intersection(&pooled_set).collect::<Vec<_>>()
        );
        assert_eq!(
            active.len() + pooled.len(),
            self.grid.live_instance_count(),
            "live instances must be either active or pooled"
        );

        let mut indices = self.grid.active_indices();
        indices.sort_unstable();
        assert_eq!(
            indices,
            self.grid.visible_indices(),
            "active set keys must match rendered items"
        );

        assert_eq!(
            self.log.bound_visuals().len(),
            active.len(),
            "bound visuals in the log must match the active set"
        );
        assert_eq!(
            self.log.created_count() - self.log.destroyed_count(),
            self.grid.live_instance_count()
        );
        self.log.assert_lifecycle();
    }
}
