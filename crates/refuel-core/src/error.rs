//! Planner error types.

use thiserror::Error;

/// Errors surfaced by the planning core.
///
/// A trigger point with no station in range is not an error; the catalog
/// query reports it as `None` and the planner retries at the next vertex.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    #[error("polyline must contain at least 2 points, got {0}")]
    DegeneratePolyline(usize),
    #[error("search radius must be positive, got {0}")]
    InvalidSearchRadius(f64),
    #[error("invalid planner config: {0}")]
    InvalidConfig(String),
}
