//! `nasch-core` — foundational types for the `nasch` traffic cellular
//! automaton (Nagel–Schreckenberg family).
//!
//! This crate is a dependency of every other `nasch-*` crate.  It has no
//! `nasch-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                            |
//! |------------|-----------------------------------------------------|
//! | [`cell`]   | `Cell` — occupancy + velocity of one road cell      |
//! | [`lane`]   | `Lane`, `LaneId` — cyclic cell arrays               |
//! | [`road`]   | `Road` — one or two lanes, invariant checks         |
//! | [`config`] | `SimConfig`, `LaneConfig`, `Impulse`                |
//! | [`rng`]    | `SimRng` — seedable random source                   |
//! | [`error`]  | `ModelError`, `ModelResult`                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod cell;
pub mod config;
pub mod error;
pub mod lane;
pub mod rng;
pub mod road;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use cell::{Cell, Velocity};
pub use config::{Impulse, LaneConfig, SimConfig};
pub use error::{ModelError, ModelResult};
pub use lane::{Lane, LaneId};
pub use rng::SimRng;
pub use road::Road;
