//! Plain data row types written by output backends.

use nasch_core::LaneId;

/// One lane's velocity row at the end of a step: per-cell velocity, `-1` for
/// empty cells.  A run emits one of these per lane per step; stacked by step
/// they form the time-vs-position grid a plotting layer renders as a heatmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VelocityRow {
    pub step:  u64,
    pub lane:  LaneId,
    pub cells: Vec<i64>,
}

/// Summary statistics for one simulation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepSummaryRow {
    pub step:          u64,
    pub vehicles:      u64,
    pub lane_changes:  u64,
    pub dallied:       u64,
    /// Mean velocity over occupied cells; `0.0` for an empty road.
    pub mean_velocity: f64,
}
