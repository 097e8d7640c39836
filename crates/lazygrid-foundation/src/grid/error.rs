//! Errors surfaced by the grid.
//!
//! Only configuration errors are returned to the caller (from
//! [`DataGrid::attach`](super::DataGrid::attach)). Everything that happens
//! during a tick or a data assignment is logged and counted instead, so the
//! grid keeps rendering whatever it safely can.

use super::config::{Arrangement, ScrollAxis};
use super::item::TemplateKey;

#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// Scroll axis and arrangement contradict each other.
    ConfigConflict {
        axis: ScrollAxis,
        arrangement: Arrangement,
    },
    /// `Arrangement::Both` needs a positive, finite cross-axis extent.
    MissingCrossExtent { extent: Option<f32> },
    /// Culling margin must be a non-negative, finite fraction.
    InvalidCullingMargin { fraction: f32 },
    /// The host reported an unusable viewport extent.
    InvalidViewport { extent: f32 },
    /// The host reported a scroll offset that is not a finite number.
    InvalidScrollOffset { offset: f32 },
    /// The instantiation backend could not produce a visual.
    Instantiation { template: TemplateKey, reason: String },
    /// An item was flagged rendered but has no active instance.
    MissingActiveInstance { index: usize },
    /// An item was about to be rendered while already holding an instance.
    DuplicateActiveInstance { index: usize },
}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridError::ConfigConflict { axis, arrangement } => write!(
                f,
                "scroll axis {axis:?} conflicts with item arrangement {arrangement:?}"
            ),
            GridError::MissingCrossExtent { extent } => match extent {
                Some(extent) => write!(f, "cross-axis extent {extent} is not usable for wrapping"),
                None => write!(f, "wrapping arrangement requires a cross-axis extent"),
            },
            GridError::InvalidCullingMargin { fraction } => {
                write!(f, "culling margin fraction {fraction} is invalid")
            }
            GridError::InvalidViewport { extent } => {
                write!(f, "viewport extent {extent} is invalid")
            }
            GridError::InvalidScrollOffset { offset } => {
                write!(f, "scroll offset {offset} is not finite")
            }
            GridError::Instantiation { template, reason } => {
                write!(f, "failed to instantiate template '{template}': {reason}")
            }
            GridError::MissingActiveInstance { index } => {
                write!(f, "item {index} is marked rendered but has no active instance")
            }
            GridError::DuplicateActiveInstance { index } => {
                write!(f, "item {index} already holds an active instance")
            }
        }
    }
}

impl std::error::Error for GridError {}

/// Failure reported by an [`InstanceFactory`](super::InstanceFactory).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstantiationError {
    reason: String,
}

impl InstantiationError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl std::fmt::Display for InstantiationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.reason)
    }
}

impl std::error::Error for InstantiationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_mentions_template() {
        let err = GridError::Instantiation {
            template: TemplateKey::from("card"),
            reason: "asset missing".into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to instantiate template 'card': asset missing"
        );
    }

    #[test]
    fn test_display_reports_bad_offset() {
        let err = GridError::InvalidScrollOffset { offset: f32::NAN };
        assert_eq!(err.to_string(), "scroll offset NaN is not finite");
    }
}
