//! A circular road of one or two lanes.

use crate::{Lane, LaneId, ModelError, ModelResult};

/// The full road state: one lane, or an ordered `{left, right}` pair of equal
/// length.  Mutated in place by the engine; cloned to produce the frozen
/// per-phase snapshots.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Road {
    lanes: Vec<Lane>,
}

impl Road {
    /// A single-lane road.
    pub fn single(lane: Lane) -> ModelResult<Self> {
        if lane.is_empty() {
            return Err(ModelError::ZeroRoadLength);
        }
        Ok(Self { lanes: vec![lane] })
    }

    /// A two-lane road.  Both lanes must have the same length.
    pub fn two_lane(left: Lane, right: Lane) -> ModelResult<Self> {
        if left.is_empty() {
            return Err(ModelError::ZeroRoadLength);
        }
        if left.len() != right.len() {
            return Err(ModelError::LaneLengthMismatch {
                left:  left.len(),
                right: right.len(),
            });
        }
        Ok(Self { lanes: vec![left, right] })
    }

    #[inline]
    pub fn is_two_lane(&self) -> bool {
        self.lanes.len() == 2
    }

    /// Cells per lane.
    #[inline]
    pub fn road_length(&self) -> usize {
        self.lanes[0].len()
    }

    /// The lane ids present on this road, in evaluation order.
    pub fn lane_ids(&self) -> &'static [LaneId] {
        if self.is_two_lane() {
            &LaneId::BOTH
        } else {
            &[LaneId::Left]
        }
    }

    /// Borrow a lane; addressing `Right` on a single-lane road is a
    /// precondition error.
    pub fn lane(&self, id: LaneId) -> ModelResult<&Lane> {
        self.lanes
            .get(id.index())
            .ok_or(ModelError::Precondition("two-lane operation on a single-lane road"))
    }

    pub fn lane_mut(&mut self, id: LaneId) -> ModelResult<&mut Lane> {
        self.lanes
            .get_mut(id.index())
            .ok_or(ModelError::Precondition("two-lane operation on a single-lane road"))
    }

    #[inline]
    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    #[inline]
    pub fn lanes_mut(&mut self) -> &mut [Lane] {
        &mut self.lanes
    }

    /// Total vehicles across all lanes.
    pub fn vehicle_count(&self) -> usize {
        self.lanes.iter().map(Lane::occupied_count).sum()
    }

    /// Enforce the observable invariants at a step boundary: vehicle
    /// conservation across the whole road and per-lane velocity bounds.
    ///
    /// Cell-level occupancy/velocity consistency holds by construction
    /// ([`Cell`][crate::Cell] is an enum), and "one vehicle per cell" is
    /// guaranteed by the cell array itself; what remains checkable is counted
    /// and bounded here.  Violations report the step and cell index.
    pub fn check_invariants(&self, expected_vehicles: usize, step: u64) -> ModelResult<()> {
        let got = self.vehicle_count();
        if got != expected_vehicles {
            return Err(ModelError::VehicleCountChanged {
                step,
                expected: expected_vehicles,
                got,
            });
        }
        for &id in self.lane_ids() {
            let lane = &self.lanes[id.index()];
            for (cell, velocity) in lane.vehicles() {
                if velocity > lane.max_velocity() {
                    return Err(ModelError::VelocityOutOfBounds {
                        step,
                        lane: id,
                        cell,
                        velocity,
                        max_velocity: lane.max_velocity(),
                    });
                }
            }
        }
        Ok(())
    }
}
