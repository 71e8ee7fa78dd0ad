//! Simulation configuration.
//!
//! All knobs are explicit values threaded through construction; nothing is
//! read from process-wide state.

use crate::{ModelError, ModelResult, Velocity};

/// Per-lane configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LaneConfig {
    /// Fraction of cells initially occupied, in `[0, 100]`.
    pub occupancy_percent: f64,
    /// Speed limit for this lane, in cells per step.
    pub max_velocity: Velocity,
}

/// One-time velocity boost applied to every vehicle at a configured step.
/// Single-lane roads only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Impulse {
    /// Zero-based step index at which the boost fires (typically 0).
    pub at_step: u64,
    /// Velocity increment, capped at the lane's max velocity.
    pub boost: Velocity,
}

/// Top-level simulation configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Cells per lane.
    pub road_length: usize,

    /// One entry per lane; one or two lanes.
    pub lanes: Vec<LaneConfig>,

    /// Steps to simulate.
    pub total_steps: u64,

    /// Probability that a vehicle dallies (drops one velocity unit) per step.
    /// `0.0` gives the deterministic model.
    pub dally_probability: f64,

    /// Master RNG seed.  The same seed always produces identical runs.
    pub seed: u64,

    /// Optional one-time impulse; rejected for two-lane roads.
    pub impulse: Option<Impulse>,
}

impl SimConfig {
    /// Check every configuration constraint, reporting the first failure.
    /// Called by the engine before a run can start.
    pub fn validate(&self) -> ModelResult<()> {
        if self.road_length == 0 {
            return Err(ModelError::ZeroRoadLength);
        }
        if self.lanes.is_empty() || self.lanes.len() > 2 {
            return Err(ModelError::BadLaneCount(self.lanes.len()));
        }
        if !(0.0..=1.0).contains(&self.dally_probability) {
            return Err(ModelError::DallyProbabilityOutOfRange(self.dally_probability));
        }
        for lane in &self.lanes {
            if !(0.0..=100.0).contains(&lane.occupancy_percent) {
                return Err(ModelError::OccupancyOutOfRange(lane.occupancy_percent));
            }
            if lane.max_velocity == 0 {
                return Err(ModelError::ZeroMaxVelocity);
            }
            let requested = vehicle_target(lane.occupancy_percent, self.road_length);
            if requested > self.road_length {
                return Err(ModelError::TooManyVehicles {
                    requested,
                    road_length: self.road_length,
                });
            }
        }
        if self.impulse.is_some() && self.lanes.len() != 1 {
            return Err(ModelError::Precondition("impulse applies to single-lane roads only"));
        }
        Ok(())
    }
}

/// Vehicles to place for an occupancy percentage.  Truncates toward zero,
/// so 25% of 10 cells is 2 vehicles.
pub fn vehicle_target(occupancy_percent: f64, road_length: usize) -> usize {
    ((occupancy_percent / 100.0) * road_length as f64) as usize
}
