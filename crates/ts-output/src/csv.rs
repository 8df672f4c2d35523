//! CSV output backend.
//!
//! Creates four files in the configured output directory:
//! - `observations.csv`
//! - `waits.csv`
//! - `snapshots.csv`
//! - `summaries.csv`
//!
//! Booleans are written as `0`/`1`; missing optional values as empty fields.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{ObservationRow, OutputResult, SnapshotRow, SummaryRow, WaitRow};

fn opt<T: ToString>(v: Option<T>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

/// Writes simulation output to four CSV files.
pub struct CsvWriter {
    observations: Writer<File>,
    waits:        Writer<File>,
    snapshots:    Writer<File>,
    summaries:    Writer<File>,
    finished:     bool,
}

impl CsvWriter {
    /// Open (or create) the CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut observations = Writer::from_path(dir.join("observations.csv"))?;
        observations.write_record(["tick", "clock", "queue_length", "server_busy"])?;

        let mut waits = Writer::from_path(dir.join("waits.csv"))?;
        waits.write_record(["tick", "clock", "wait_minutes"])?;

        let mut snapshots = Writer::from_path(dir.join("snapshots.csv"))?;
        snapshots.write_record([
            "tick",
            "clock",
            "queue_length",
            "oldest_wait_minutes",
            "remaining_busy_minutes",
        ])?;

        let mut summaries = Writer::from_path(dir.join("summaries.csv"))?;
        summaries.write_record([
            "label",
            "ticks",
            "arrived",
            "served",
            "left_in_queue",
            "mean_queue_length",
            "max_queue_length",
            "mean_wait_minutes",
            "max_wait_minutes",
            "utilization",
        ])?;

        Ok(Self {
            observations,
            waits,
            snapshots,
            summaries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_observation(&mut self, row: &ObservationRow) -> OutputResult<()> {
        self.observations.write_record(&[
            row.tick.to_string(),
            row.clock.clone(),
            row.queue_length.to_string(),
            (row.server_busy as u8).to_string(),
        ])?;
        Ok(())
    }

    fn write_wait(&mut self, row: &WaitRow) -> OutputResult<()> {
        self.waits.write_record(&[
            row.tick.to_string(),
            row.clock.clone(),
            row.wait_minutes.to_string(),
        ])?;
        Ok(())
    }

    fn write_snapshot(&mut self, row: &SnapshotRow) -> OutputResult<()> {
        self.snapshots.write_record(&[
            row.tick.to_string(),
            row.clock.clone(),
            row.queue_length.to_string(),
            opt(row.oldest_wait_minutes),
            row.remaining_busy_minutes.to_string(),
        ])?;
        Ok(())
    }

    fn write_summaries(&mut self, rows: &[SummaryRow]) -> OutputResult<()> {
        for row in rows {
            self.summaries.write_record(&[
                row.label.clone(),
                row.ticks.to_string(),
                row.arrived.to_string(),
                row.served.to_string(),
                row.left_in_queue.to_string(),
                row.mean_queue_length.to_string(),
                row.max_queue_length.to_string(),
                opt(row.mean_wait_minutes),
                opt(row.max_wait_minutes),
                row.utilization.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.observations.flush()?;
        self.waits.flush()?;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
