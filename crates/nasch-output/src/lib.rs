//! `nasch-output` — simulation output writers for the nasch traffic model.
//!
//! The CSV backend creates two files:
//!
//! | File                 | Contents                                            |
//! |----------------------|-----------------------------------------------------|
//! | `velocity_grid.csv`  | one row per lane per step, one column per road cell |
//! | `step_summaries.csv` | vehicles, lane changes, dally count, mean velocity  |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`GridOutputObserver`], which implements `nasch_engine::StepObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use nasch_output::{CsvWriter, GridOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"), config.road_length)?;
//! let mut obs = GridOutputObserver::new(writer);
//! sim.run(&mut obs)?;
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::GridOutputObserver;
pub use row::{StepSummaryRow, VelocityRow};
pub use writer::OutputWriter;
