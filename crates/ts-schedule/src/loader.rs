//! CSV schedule and profile loaders.
//!
//! # CSV formats
//!
//! Bounded-uniform schedule, one row per interval, kept in file order (which
//! is also the lookup precedence order):
//!
//! ```csv
//! start_tick,end_tick,min_arrivals,max_arrivals
//! 0,20,0,2
//! 20,100,2,5
//! ```
//!
//! Poisson profile, one row per segment; ticks not covered by any row use the
//! `baseline` passed to the loader:
//!
//! ```csv
//! start_tick,end_tick,rate
//! 0,10,1.0
//! 15,20,6.0
//! ```
//!
//! Every row is validated; the first invalid row aborts the load.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::{RateProfile, RateSchedule, RateSegment, ScheduleError, ScheduleInterval};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct IntervalRecord {
    start_tick:   u64,
    end_tick:     u64,
    min_arrivals: u32,
    max_arrivals: u32,
}

#[derive(Deserialize)]
struct SegmentRecord {
    start_tick: u64,
    end_tick:   u64,
    rate:       f64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`RateSchedule`] from a CSV file.
pub fn load_schedule_csv(path: &Path) -> Result<RateSchedule, ScheduleError> {
    let file = std::fs::File::open(path).map_err(ScheduleError::Io)?;
    load_schedule_reader(file)
}

/// Like [`load_schedule_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or embedding schedules in a
/// binary.
pub fn load_schedule_reader<R: Read>(reader: R) -> Result<RateSchedule, ScheduleError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut intervals = Vec::new();

    for result in csv_reader.deserialize::<IntervalRecord>() {
        let row = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
        intervals.push(ScheduleInterval::new(
            row.start_tick,
            row.end_tick,
            row.min_arrivals,
            row.max_arrivals,
        )?);
    }

    Ok(RateSchedule::new(intervals)?)
}

/// Load a [`RateProfile`] from a CSV file.
pub fn load_profile_csv(path: &Path, baseline: f64) -> Result<RateProfile, ScheduleError> {
    let file = std::fs::File::open(path).map_err(ScheduleError::Io)?;
    load_profile_reader(file, baseline)
}

/// Like [`load_profile_csv`] but accepts any `Read` source.
pub fn load_profile_reader<R: Read>(reader: R, baseline: f64) -> Result<RateProfile, ScheduleError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut segments = Vec::new();

    for result in csv_reader.deserialize::<SegmentRecord>() {
        let row = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
        segments.push(RateSegment::new(row.start_tick, row.end_tick, row.rate)?);
    }

    Ok(RateProfile::new(segments, baseline)?)
}
