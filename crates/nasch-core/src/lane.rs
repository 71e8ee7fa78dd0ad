//! A cyclic lane of cells and the `LaneId` selector.

use std::fmt;

use crate::{Cell, Velocity};

// ── LaneId ────────────────────────────────────────────────────────────────────

/// Selects one lane of a [`Road`][crate::Road].
///
/// Single-lane roads only have [`LaneId::Left`]; addressing `Right` on one is
/// a precondition error surfaced by `Road::lane`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LaneId {
    Left,
    Right,
}

impl LaneId {
    /// Both lanes in evaluation order (left first, matching step phases).
    pub const BOTH: [LaneId; 2] = [LaneId::Left, LaneId::Right];

    /// The paired lane of a two-lane road.
    #[inline]
    pub fn opposite(self) -> LaneId {
        match self {
            LaneId::Left  => LaneId::Right,
            LaneId::Right => LaneId::Left,
        }
    }

    /// Position of this lane in `Road`'s storage.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            LaneId::Left  => 0,
            LaneId::Right => 1,
        }
    }
}

impl fmt::Display for LaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaneId::Left  => write!(f, "left"),
            LaneId::Right => write!(f, "right"),
        }
    }
}

// ── Lane ──────────────────────────────────────────────────────────────────────

/// An ordered cyclic sequence of cells with a speed limit.
///
/// All index arithmetic is modulo the lane length (periodic boundary); use
/// [`wrap`][Lane::wrap] to reduce signed offsets.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lane {
    cells: Vec<Cell>,
    max_velocity: Velocity,
}

impl Lane {
    /// An all-empty lane of `length` cells.
    pub fn empty(length: usize, max_velocity: Velocity) -> Self {
        Self {
            cells: vec![Cell::Empty; length],
            max_velocity,
        }
    }

    /// Build a lane from explicit cells (fixtures and tests).
    pub fn from_cells(cells: Vec<Cell>, max_velocity: Velocity) -> Self {
        Self { cells, max_velocity }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn max_velocity(&self) -> Velocity {
        self.max_velocity
    }

    /// Reduce a signed index to `[0, len)` under the periodic boundary.
    #[inline]
    pub fn wrap(&self, index: i64) -> usize {
        index.rem_euclid(self.cells.len() as i64) as usize
    }

    /// The cell at a signed, cyclically-reduced index.
    #[inline]
    pub fn cell(&self, index: i64) -> Cell {
        self.cells[self.wrap(index)]
    }

    #[inline]
    pub fn set(&mut self, index: i64, cell: Cell) {
        let i = self.wrap(index);
        self.cells[i] = cell;
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Replace the whole cell array (move-phase buffer swap).
    ///
    /// # Panics
    /// Panics in debug mode if the lengths differ.
    pub fn replace_cells(&mut self, cells: Vec<Cell>) {
        debug_assert_eq!(cells.len(), self.cells.len());
        self.cells = cells;
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_occupied()).count()
    }

    /// `(index, velocity)` of every occupied cell, ascending index.
    pub fn vehicles(&self) -> impl Iterator<Item = (usize, Velocity)> + '_ {
        self.cells.iter().enumerate().filter_map(|(i, c)| {
            c.velocity().map(|v| (i, v))
        })
    }

    /// Velocity of every cell in the `-1`-sentinel encoding.
    pub fn velocity_row(&self) -> Vec<i64> {
        self.cells.iter().map(|c| c.velocity_i64()).collect()
    }
}
