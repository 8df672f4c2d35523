//! The `OutputWriter` trait implemented by all backend writers.

use crate::{ObservationRow, OutputResult, SnapshotRow, SummaryRow, WaitRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// Errors are stored by [`SimOutputObserver`][crate::SimOutputObserver] and
/// retrieved with its `take_error`.
pub trait OutputWriter {
    /// Write one row of the per-tick series.
    fn write_observation(&mut self, row: &ObservationRow) -> OutputResult<()>;

    /// Write one waiting-time sample.
    fn write_wait(&mut self, row: &WaitRow) -> OutputResult<()>;

    /// Write one queue/server snapshot.
    fn write_snapshot(&mut self, row: &SnapshotRow) -> OutputResult<()>;

    /// Write a batch of per-scenario summaries.
    fn write_summaries(&mut self, rows: &[SummaryRow]) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
