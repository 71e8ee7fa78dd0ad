//! Model error type.
//!
//! Three families of failure, all fatal to the current run:
//! configuration errors (caught before a run starts), invariant violations
//! (detected at a step boundary — the state is never silently "fixed"), and
//! precondition errors (a two-lane operation on a single-lane road, and the
//! like).

use thiserror::Error;

use crate::LaneId;

/// The top-level error type for all `nasch-*` crates.
#[derive(Debug, Error)]
pub enum ModelError {
    // ── Configuration ────────────────────────────────────────────────────
    #[error("occupancy {0}% is outside [0, 100]")]
    OccupancyOutOfRange(f64),

    #[error("dally probability {0} is outside [0, 1]")]
    DallyProbabilityOutOfRange(f64),

    #[error("requested {requested} vehicles exceeds road length {road_length}")]
    TooManyVehicles { requested: usize, road_length: usize },

    #[error("a road has one or two lanes, got {0}")]
    BadLaneCount(usize),

    #[error("road length must be non-zero")]
    ZeroRoadLength,

    #[error("max velocity must be non-zero")]
    ZeroMaxVelocity,

    #[error("lane lengths differ: left {left}, right {right}")]
    LaneLengthMismatch { left: usize, right: usize },

    // ── Invariant violations ─────────────────────────────────────────────
    #[error("destination collision at step {step}, lane {lane}, cell {cell}")]
    DestinationCollision { step: u64, lane: LaneId, cell: usize },

    #[error("vehicle count changed at step {step}: expected {expected}, got {got}")]
    VehicleCountChanged { step: u64, expected: usize, got: usize },

    #[error(
        "velocity {velocity} exceeds lane limit {max_velocity} at step {step}, lane {lane}, cell {cell}"
    )]
    VelocityOutOfBounds {
        step:         u64,
        lane:         LaneId,
        cell:         usize,
        velocity:     usize,
        max_velocity: usize,
    },

    // ── Preconditions ────────────────────────────────────────────────────
    #[error("precondition violated: {0}")]
    Precondition(&'static str),
}

/// Shorthand result type for all `nasch-*` crates.
pub type ModelResult<T> = Result<T, ModelError>;
