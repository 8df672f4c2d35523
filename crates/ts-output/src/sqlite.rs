//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! four tables: `observations`, `waits`, `snapshots` and `summaries`.
//!
//! Opening a writer clears rows left by an earlier run in the same directory.
//! All rows of a run go into one transaction, committed by
//! [`OutputWriter::finish`]; a writer dropped before `finish` leaves the
//! tables empty.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{ObservationRow, OutputResult, SnapshotRow, SummaryRow, WaitRow};

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS observations (
                 tick         INTEGER PRIMARY KEY,
                 clock        TEXT    NOT NULL,
                 queue_length INTEGER NOT NULL,
                 server_busy  INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS waits (
                 tick         INTEGER NOT NULL,
                 clock        TEXT    NOT NULL,
                 wait_minutes INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS snapshots (
                 tick                   INTEGER PRIMARY KEY,
                 clock                  TEXT    NOT NULL,
                 queue_length           INTEGER NOT NULL,
                 oldest_wait_minutes    INTEGER,
                 remaining_busy_minutes REAL    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS summaries (
                 label             TEXT    NOT NULL,
                 ticks             INTEGER NOT NULL,
                 arrived           INTEGER NOT NULL,
                 served            INTEGER NOT NULL,
                 left_in_queue     INTEGER NOT NULL,
                 mean_queue_length REAL    NOT NULL,
                 max_queue_length  INTEGER NOT NULL,
                 mean_wait_minutes REAL,
                 max_wait_minutes  INTEGER,
                 utilization       REAL    NOT NULL
             );
             DELETE FROM observations;
             DELETE FROM waits;
             DELETE FROM snapshots;
             DELETE FROM summaries;
             BEGIN;",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_observation(&mut self, row: &ObservationRow) -> OutputResult<()> {
        self.conn
            .prepare_cached(
                "INSERT INTO observations (tick, clock, queue_length, server_busy) \
                 VALUES (?1, ?2, ?3, ?4)",
            )?
            .execute(rusqlite::params![row.tick, row.clock, row.queue_length, row.server_busy as i64])?;
        Ok(())
    }

    fn write_wait(&mut self, row: &WaitRow) -> OutputResult<()> {
        self.conn
            .prepare_cached("INSERT INTO waits (tick, clock, wait_minutes) VALUES (?1, ?2, ?3)")?
            .execute(rusqlite::params![row.tick, row.clock, row.wait_minutes])?;
        Ok(())
    }

    fn write_snapshot(&mut self, row: &SnapshotRow) -> OutputResult<()> {
        self.conn
            .prepare_cached(
                "INSERT INTO snapshots \
                 (tick, clock, queue_length, oldest_wait_minutes, remaining_busy_minutes) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?
            .execute(rusqlite::params![
                row.tick,
                row.clock,
                row.queue_length,
                row.oldest_wait_minutes,
                row.remaining_busy_minutes,
            ])?;
        Ok(())
    }

    fn write_summaries(&mut self, rows: &[SummaryRow]) -> OutputResult<()> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO summaries \
             (label, ticks, arrived, served, left_in_queue, mean_queue_length, \
              max_queue_length, mean_wait_minutes, max_wait_minutes, utilization) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        )?;
        for row in rows {
            stmt.execute(rusqlite::params![
                row.label,
                row.ticks,
                row.arrived,
                row.served,
                row.left_in_queue,
                row.mean_queue_length,
                row.max_queue_length,
                row.mean_wait_minutes,
                row.max_wait_minutes,
                row.utilization,
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        if !self.conn.is_autocommit() {
            self.conn.execute_batch("COMMIT;")?;
        }
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
