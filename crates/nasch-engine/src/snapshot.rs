//! Per-step velocity snapshots for external consumption.

use nasch_core::Road;

use crate::{StepDiagnostics, StepObserver};

/// One row of the velocity grid: per-cell velocity for every lane at the end
/// of a step, `-1` for empty cells.  The presentation layer renders the
/// sequence of these as a time-vs-position heatmap.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Snapshot {
    /// Zero-based index of the step this snapshot follows.
    pub step: u64,
    /// One velocity row per lane, left lane first.
    pub lanes: Vec<Vec<i64>>,
}

impl Snapshot {
    /// Capture the current road state.
    pub fn of(road: &Road, step: u64) -> Self {
        Self {
            step,
            lanes: road.lanes().iter().map(|l| l.velocity_row()).collect(),
        }
    }
}

/// A [`StepObserver`] that appends one [`Snapshot`] per step.
///
/// The initial (randomly placed) state is deliberately not recorded: the
/// random velocities can be momentarily inconsistent (a slow vehicle directly
/// behind a fast one), so recording starts after the first step.
#[derive(Default)]
pub struct SnapshotRecorder {
    snapshots: Vec<Snapshot>,
}

impl SnapshotRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn into_snapshots(self) -> Vec<Snapshot> {
        self.snapshots
    }
}

impl StepObserver for SnapshotRecorder {
    fn on_step_end(&mut self, step: u64, road: &Road, _diag: &StepDiagnostics) {
        self.snapshots.push(Snapshot::of(road, step));
    }
}
