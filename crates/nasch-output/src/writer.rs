//! The `OutputWriter` trait implemented by backend writers.

use crate::{OutputResult, StepSummaryRow, VelocityRow};

/// Trait implemented by output backends (CSV today).
///
/// All methods are infallible from the observer's perspective — errors are
/// stored internally and retrieved with [`GridOutputObserver::take_error`].
pub trait OutputWriter {
    /// Write a batch of velocity rows (one per lane for a given step).
    fn write_velocity_rows(&mut self, rows: &[VelocityRow]) -> OutputResult<()>;

    /// Write one step summary row.
    fn write_step_summary(&mut self, row: &StepSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
