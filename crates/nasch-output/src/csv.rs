//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `velocity_grid.csv`
//! - `step_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, StepSummaryRow, VelocityRow};

/// Writes simulation output to two CSV files.
///
/// The velocity grid has one `cell_N` column per road cell, so the writer
/// needs the road length up front to emit the header.
pub struct CsvWriter {
    grid:      Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path, road_length: usize) -> OutputResult<Self> {
        let mut grid = Writer::from_path(dir.join("velocity_grid.csv"))?;
        let mut header = vec!["step".to_string(), "lane".to_string()];
        header.extend((0..road_length).map(|i| format!("cell_{i}")));
        grid.write_record(&header)?;

        let mut summaries = Writer::from_path(dir.join("step_summaries.csv"))?;
        summaries.write_record(["step", "vehicles", "lane_changes", "dallied", "mean_velocity"])?;

        Ok(Self {
            grid,
            summaries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_velocity_rows(&mut self, rows: &[VelocityRow]) -> OutputResult<()> {
        for row in rows {
            let mut record = vec![row.step.to_string(), row.lane.to_string()];
            record.extend(row.cells.iter().map(|v| v.to_string()));
            self.grid.write_record(&record)?;
        }
        Ok(())
    }

    fn write_step_summary(&mut self, row: &StepSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.step.to_string(),
            row.vehicles.to_string(),
            row.lane_changes.to_string(),
            row.dallied.to_string(),
            row.mean_velocity.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.grid.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
