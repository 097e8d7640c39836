//! Grid configuration: scroll axis, item arrangement, culling margin and
//! pool policy.

use crate::geometry::{Point, Size};

use super::error::GridError;

/// Default culling margin on each side, as a fraction of the viewport extent.
pub const DEFAULT_CULLING_MARGIN: f32 = 0.5;

/// Axis along which the host scrolls the content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScrollAxis {
    Horizontal,
    Vertical,
}

impl ScrollAxis {
    /// Size along the scroll axis.
    pub fn main_size(self, size: Size) -> f32 {
        match self {
            ScrollAxis::Horizontal => size.width,
            ScrollAxis::Vertical => size.height,
        }
    }

    /// Size across the scroll axis.
    pub fn cross_size(self, size: Size) -> f32 {
        match self {
            ScrollAxis::Horizontal => size.height,
            ScrollAxis::Vertical => size.width,
        }
    }

    /// Maps main/cross distances from the content origin to a position.
    ///
    /// Distances are non-negative; downward distances turn into negative `y`.
    pub fn point(self, main: f32, cross: f32) -> Point {
        match self {
            ScrollAxis::Horizontal => Point::new(main, -cross),
            ScrollAxis::Vertical => Point::new(cross, -main),
        }
    }

    /// Distance of a position from the content origin along the scroll axis.
    pub fn main_offset(self, position: Point) -> f32 {
        match self {
            ScrollAxis::Horizontal => position.x,
            ScrollAxis::Vertical => -position.y,
        }
    }
}

/// How items are arranged relative to the scroll axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Arrangement {
    /// A single row.
    Horizontal,
    /// A single column.
    Vertical,
    /// Wrap into strips across the scroll axis: columns when scrolling
    /// horizontally, rows when scrolling vertically.
    Both,
}

/// Prefetch margin applied around the viewport when culling.
#[derive(Clone, Debug, PartialEq)]
pub struct CullingConfig {
    /// Margin on each side of the viewport, as a fraction of its extent.
    pub margin_fraction: f32,

    /// Whether the margin is applied at all.
    pub enabled: bool,
}

impl Default for CullingConfig {
    fn default() -> Self {
        Self {
            margin_fraction: DEFAULT_CULLING_MARGIN,
            enabled: true,
        }
    }
}

impl CullingConfig {
    /// Creates a culling config with the given margin fraction.
    pub fn new(margin_fraction: f32) -> Self {
        Self {
            margin_fraction,
            enabled: true,
        }
    }

    /// Culls against the bare viewport.
    pub fn disabled() -> Self {
        Self {
            margin_fraction: 0.0,
            enabled: false,
        }
    }

    /// Margin in content units for a viewport of the given extent.
    pub fn margin_for(&self, viewport_extent: f32) -> f32 {
        if self.enabled {
            viewport_extent * self.margin_fraction
        } else {
            0.0
        }
    }
}

/// Policy for keeping idle instances around.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PoolPolicy {
    /// Maximum idle instances kept per template. `None` keeps all of them.
    pub max_idle_per_template: Option<usize>,
}

impl PoolPolicy {
    /// Keeps every released instance.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Keeps at most `max` idle instances per template; extra releases
    /// are destroyed immediately.
    pub fn bounded(max: usize) -> Self {
        Self {
            max_idle_per_template: Some(max),
        }
    }
}

/// Full grid configuration, validated when the grid is attached.
#[derive(Clone, Debug, PartialEq)]
pub struct GridConfig {
    pub axis: ScrollAxis,
    pub arrangement: Arrangement,

    /// Fixed extent across the scroll axis. Only used by [`Arrangement::Both`].
    pub cross_extent: Option<f32>,

    pub culling: CullingConfig,
    pub pool: PoolPolicy,
}

impl GridConfig {
    pub fn new(axis: ScrollAxis, arrangement: Arrangement) -> Self {
        Self {
            axis,
            arrangement,
            cross_extent: None,
            culling: CullingConfig::default(),
            pool: PoolPolicy::default(),
        }
    }

    /// Single column scrolled vertically.
    pub fn vertical() -> Self {
        Self::new(ScrollAxis::Vertical, Arrangement::Vertical)
    }

    /// Single row scrolled horizontally.
    pub fn horizontal() -> Self {
        Self::new(ScrollAxis::Horizontal, Arrangement::Horizontal)
    }

    /// Wrapping grid scrolled along `axis` with the given cross-axis extent.
    pub fn wrapping(axis: ScrollAxis, cross_extent: f32) -> Self {
        Self::new(axis, Arrangement::Both).cross_extent(cross_extent)
    }

    pub fn cross_extent(mut self, extent: f32) -> Self {
        self.cross_extent = Some(extent);
        self
    }

    pub fn culling(mut self, culling: CullingConfig) -> Self {
        self.culling = culling;
        self
    }

    pub fn pool_policy(mut self, policy: PoolPolicy) -> Self {
        self.pool = policy;
        self
    }

    /// Checks the configuration for contradictions.
    pub fn validate(&self) -> Result<(), GridError> {
        match (self.axis, self.arrangement) {
            (ScrollAxis::Horizontal, Arrangement::Vertical)
            | (ScrollAxis::Vertical, Arrangement::Horizontal) => {
                return Err(GridError::ConfigConflict {
                    axis: self.axis,
                    arrangement: self.arrangement,
                });
            }
            _ => {}
        }

        if self.arrangement == Arrangement::Both {
            match self.cross_extent {
                Some(extent) if extent.is_finite() && extent > 0.0 => {}
                extent => return Err(GridError::MissingCrossExtent { extent }),
            }
        }

        let fraction = self.culling.margin_fraction;
        if !fraction.is_finite() || fraction < 0.0 {
            return Err(GridError::InvalidCullingMargin { fraction });
        }

        Ok(())
    }
}
