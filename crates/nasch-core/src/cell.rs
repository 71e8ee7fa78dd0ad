//! One cell of road space.

/// Velocity in cells per timestep.
pub type Velocity = usize;

/// A single road cell: empty, or occupied by one vehicle with a velocity.
///
/// The automaton's external encoding uses a `-1` velocity sentinel for empty
/// cells (snapshots, lane-change arithmetic); internally the enum makes the
/// "unoccupied but has a velocity" state unrepresentable.  Use
/// [`velocity_i64`][Cell::velocity_i64] wherever the sentinel encoding is
/// needed.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Velocity),
}

impl Cell {
    /// `true` if a vehicle occupies this cell.
    #[inline]
    pub fn is_occupied(self) -> bool {
        matches!(self, Cell::Occupied(_))
    }

    /// The vehicle's velocity, or `None` for an empty cell.
    #[inline]
    pub fn velocity(self) -> Option<Velocity> {
        match self {
            Cell::Empty       => None,
            Cell::Occupied(v) => Some(v),
        }
    }

    /// Sentinel encoding: the velocity for occupied cells, `-1` for empty.
    #[inline]
    pub fn velocity_i64(self) -> i64 {
        match self {
            Cell::Empty       => -1,
            Cell::Occupied(v) => v as i64,
        }
    }
}
