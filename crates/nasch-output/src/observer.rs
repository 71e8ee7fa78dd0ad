//! `GridOutputObserver<W>` — bridges `StepObserver` to an `OutputWriter`.

use nasch_core::Road;
use nasch_engine::{StepDiagnostics, StepObserver};

use crate::OutputError;
use crate::row::{StepSummaryRow, VelocityRow};
use crate::writer::OutputWriter;

/// A [`StepObserver`] that writes velocity rows and step summaries to any
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `StepObserver`
/// methods have no return value.  After `sim.run()` returns, check for errors
/// with [`take_error`][Self::take_error].
pub struct GridOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> GridOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> StepObserver for GridOutputObserver<W> {
    fn on_step_end(&mut self, step: u64, road: &Road, diag: &StepDiagnostics) {
        let rows: Vec<VelocityRow> = road
            .lane_ids()
            .iter()
            .zip(road.lanes())
            .map(|(&lane, l)| VelocityRow {
                step,
                lane,
                cells: l.velocity_row(),
            })
            .collect();
        let result = self.writer.write_velocity_rows(&rows);
        self.store_err(result);

        let vehicles = road.vehicle_count();
        let velocity_sum: u64 = road
            .lanes()
            .iter()
            .flat_map(|l| l.vehicles())
            .map(|(_, v)| v as u64)
            .sum();
        let summary = StepSummaryRow {
            step,
            vehicles:      vehicles as u64,
            lane_changes:  diag.lane_changes as u64,
            dallied:       diag.dallied as u64,
            mean_velocity: if vehicles == 0 {
                0.0
            } else {
                velocity_sum as f64 / vehicles as f64
            },
        };
        let result = self.writer.write_step_summary(&summary);
        self.store_err(result);
    }

    fn on_run_end(&mut self, _total_steps: u64) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
