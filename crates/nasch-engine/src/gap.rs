//! Gap oracle: distance to the nearest vehicle under the periodic boundary.

use nasch_core::{Lane, LaneId, ModelResult, Road};

/// Scan direction relative to the driving direction.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Direction {
    Ahead,
    Behind,
}

impl Direction {
    #[inline]
    fn sign(self) -> i64 {
        match self {
            Direction::Ahead  => 1,
            Direction::Behind => -1,
        }
    }
}

/// Empty cells strictly between `from` and the nearest occupied cell of
/// `target` in `direction`, scanning cyclically.  Adjacent occupancy gives 0;
/// a target lane with no other vehicle gives `road_length` ("unobstructed") —
/// the same convention for same-lane and other-lane queries.
///
/// `target` may be the querying vehicle's own lane or the paired lane, which
/// is what makes lane-change feasibility checks a single code path.
/// Addressing a lane the road doesn't have is a precondition error.
pub fn gap(road: &Road, from: usize, direction: Direction, target: LaneId) -> ModelResult<usize> {
    Ok(scan(road.lane(target)?, from, direction))
}

/// Gap scan over one lane.  O(road_length); offsets `1..road_length`, so a
/// same-lane query never sees the querying vehicle itself.
pub(crate) fn scan(lane: &Lane, from: usize, direction: Direction) -> usize {
    let n = lane.len() as i64;
    let sign = direction.sign();
    for offset in 1..n {
        if lane.cell(from as i64 + sign * offset).is_occupied() {
            return (offset - 1) as usize;
        }
    }
    n as usize
}
