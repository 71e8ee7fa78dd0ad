//! Cautious lane-change evaluator (two-lane roads).
//!
//! A vehicle switches lanes only if no plausible action of its neighbours —
//! including their own lane changes and dallying — can cause a collision.
//! Everything is evaluated against one frozen post-acceleration snapshot, so
//! no vehicle's decision depends on another decision made in the same phase.

use nasch_core::{Lane, LaneId, ModelError, ModelResult, Road};

use crate::gap::{Direction, scan};

/// Evaluate the mutual-safety protocol for the vehicle at `index` in `lane`
/// of `snapshot`.
///
/// The caller has already established the trigger (the vehicle would
/// otherwise have to decelerate).  Two guards and four conditions must all
/// hold:
///
/// - guard: the candidate velocity respects the destination lane's limit;
/// - guard: the laterally adjacent destination cell is unoccupied;
/// - 1. `v < v_front_same - 1 + (gap_front_same + 1)` — no rear-end collision
///   if the vehicle ahead also switches lanes;
/// - 2. `gap_front_other >= v` — clear of the vehicle ahead in the
///   destination lane;
/// - 3. `v_behind_same - (gap_behind_same + 1) < v - 1` — the vehicle behind,
///   should it also switch, stays clear of the vacated trajectory;
/// - 4. `v_behind_other - (gap_behind_other + 1) < v - 1` — symmetric check
///   against the vehicle behind in the destination lane.
///
/// Neighbour velocities are read at the wrapped index implied by the gap,
/// with `-1` for an empty cell.  When a gap saturates at `road_length` the
/// lookup lands on an empty neighbour cell, so the degenerate cases fall out
/// of the same arithmetic.
///
/// Calling this for an empty cell or on a single-lane road is a precondition
/// error.
pub fn can_change_lanes(snapshot: &Road, lane: LaneId, index: usize) -> ModelResult<bool> {
    let same  = snapshot.lane(lane)?;
    let other = snapshot.lane(lane.opposite())?;

    let v = same
        .cell(index as i64)
        .velocity()
        .ok_or(ModelError::Precondition("lane change evaluated on an empty cell"))?;

    // Guards.
    if v > other.max_velocity() || other.cell(index as i64).is_occupied() {
        return Ok(false);
    }

    let i = index as i64;
    let v = v as i64;

    let gap_front_same   = scan(same,  index, Direction::Ahead) as i64;
    let gap_behind_same  = scan(same,  index, Direction::Behind) as i64;
    let gap_front_other  = scan(other, index, Direction::Ahead) as i64;
    let gap_behind_other = scan(other, index, Direction::Behind) as i64;

    let v_front_same   = velocity_at(same,  i + gap_front_same + 1);
    let v_behind_same  = velocity_at(same,  i - (gap_behind_same + 1));
    let v_behind_other = velocity_at(other, i - (gap_behind_other + 1));

    let no_rear_end_if_front_switches = v < v_front_same - 1 + (gap_front_same + 1);
    let clear_ahead_in_destination    = gap_front_other >= v;
    let behind_same_stays_clear       = v_behind_same - (gap_behind_same + 1) < v - 1;
    let behind_other_stays_clear      = v_behind_other - (gap_behind_other + 1) < v - 1;

    Ok(no_rear_end_if_front_switches
        && clear_ahead_in_destination
        && behind_same_stays_clear
        && behind_other_stays_clear)
}

/// Velocity at a signed cyclic index, `-1` sentinel for empty.
#[inline]
fn velocity_at(lane: &Lane, index: i64) -> i64 {
    lane.cell(index).velocity_i64()
}
