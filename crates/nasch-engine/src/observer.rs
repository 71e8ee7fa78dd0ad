//! Step observer trait for progress reporting and data collection.

use nasch_core::Road;

use crate::StepDiagnostics;

/// Callbacks invoked by [`Simulation::run`][crate::Simulation::run] at step
/// boundaries.
///
/// A step is atomic to the caller; the only control point is between steps,
/// which is where these hooks fire.  All methods have default no-op
/// implementations so implementors only override what they care about.
pub trait StepObserver {
    /// Called before a step executes.  `step` is the zero-based step index.
    fn on_step_start(&mut self, _step: u64) {}

    /// Called after a step completes, with read-only access to the road and
    /// the step's diagnostics.
    fn on_step_end(&mut self, _step: u64, _road: &Road, _diag: &StepDiagnostics) {}

    /// Called once after the final step.
    fn on_run_end(&mut self, _total_steps: u64) {}
}

/// A [`StepObserver`] that does nothing.
pub struct NoopObserver;

impl StepObserver for NoopObserver {}
