//! `nasch-engine` — the per-timestep transition engine for the nasch traffic
//! automaton.
//!
//! # Phase structure of one step
//!
//! ```text
//! for step in 0..config.total_steps:
//!   ① Accelerate  — every vehicle: v = min(v+1, max_velocity), in place.
//!   ② Snapshot    — clone the post-acceleration road; all later reads in
//!                   this step come from this frozen view.
//!   ③ Lane change — (two-lane only) every vehicle in the snapshot facing
//!                   imminent deceleration is run through the four-condition
//!                   mutual-safety evaluator; approved moves commit to live
//!                   state.
//!   ④ Decel+dally — forward gap in the vehicle's current lane, read from
//!                   the frozen snapshot; then the stochastic dally draw.
//!   ⑤ Move        — per lane, all destinations computed from a pre-move
//!                   copy and committed in one pass; a destination conflict
//!                   is a fatal invariant violation.
//!   ⑥ Impulse     — (single-lane only) one-time boost at the configured step.
//! ```
//!
//! The "all vehicles update in parallel" semantics come purely from this
//! snapshot-then-commit discipline; execution is single-threaded and
//! deterministic given the configured seed.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use nasch_core::{LaneConfig, SimConfig};
//! use nasch_engine::Simulation;
//!
//! let config = SimConfig {
//!     road_length:       300,
//!     lanes:             vec![LaneConfig { occupancy_percent: 25.0, max_velocity: 5 }],
//!     total_steps:       100,
//!     dally_probability: 0.2,
//!     seed:              42,
//!     impulse:           None,
//! };
//! let snapshots = Simulation::new(config)?.run_collect()?;
//! ```

pub mod engine;
pub mod gap;
pub mod lane_change;
pub mod observer;
pub mod rules;
pub mod snapshot;

#[cfg(test)]
mod tests;

pub use engine::{Simulation, StepDiagnostics};
pub use gap::{Direction, gap};
pub use lane_change::can_change_lanes;
pub use observer::{NoopObserver, StepObserver};
pub use snapshot::{Snapshot, SnapshotRecorder};
