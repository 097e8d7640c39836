//! Statistics about grid instance lifecycle.
//!
//! Used for testing, debugging and on-screen diagnostics.

use std::time::Duration;

/// Outcome of one [`DataGrid::tick`](super::DataGrid::tick).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    /// The tick saw no change and did nothing.
    pub skipped: bool,

    /// Items that were bound to an instance and rendered.
    pub rendered: usize,

    /// Items whose instance went back to the pool.
    pub released: usize,

    /// Items left unrendered because instantiation failed.
    pub failed: usize,

    /// Bookkeeping inconsistencies detected (and repaired) this tick.
    pub inconsistencies: usize,

    /// Wall-clock time spent in the tick.
    pub duration: Duration,
}

impl TickReport {
    pub(crate) fn skipped() -> Self {
        Self {
            skipped: true,
            ..Default::default()
        }
    }

    /// Returns true if any item changed state.
    pub fn changed(&self) -> bool {
        self.rendered > 0 || self.released > 0
    }
}

/// Running statistics for one grid.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridStats {
    /// Instances currently bound to items.
    pub items_in_use: usize,

    /// Idle instances waiting in the pool.
    pub items_in_pool: usize,

    /// Instances ever created.
    pub total_created: usize,

    /// Instances ever destroyed.
    pub total_destroyed: usize,

    /// Bindings served from the pool instead of the factory.
    pub reuse_count: usize,

    /// Instantiation attempts that failed.
    pub instantiation_failures: usize,

    /// Bookkeeping inconsistencies detected.
    pub consistency_errors: usize,

    /// Oversized items reported by the last layout.
    pub oversized_items: usize,

    /// Report of the most recent non-skipped tick.
    pub last_tick: TickReport,
}
