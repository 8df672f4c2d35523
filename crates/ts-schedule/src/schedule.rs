//! `RateSchedule` — per-tick arrival bounds from an ordered interval list.

use log::warn;
use ts_core::{ConfigResult, Tick};

use crate::{ArrivalBounds, ScheduleInterval};

/// An ordered, immutable set of schedule intervals.
///
/// # Precedence
///
/// [`bounds_for`](Self::bounds_for) scans intervals in definition order and
/// returns the first one containing the tick.  Overlapping intervals are
/// legal input, but the later of two overlapping intervals is shadowed on
/// their common ticks.  Construction logs a warning when that happens; do not
/// rely on overlap to express priorities.
///
/// Ticks outside every interval yield [`ArrivalBounds::ZERO`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<ScheduleInterval>", into = "Vec<ScheduleInterval>")
)]
pub struct RateSchedule {
    pub(crate) intervals: Vec<ScheduleInterval>,
}

impl RateSchedule {
    /// Validate `intervals` and build a schedule.  Definition order is kept.
    pub fn new(intervals: Vec<ScheduleInterval>) -> ConfigResult<Self> {
        for interval in &intervals {
            interval.validate()?;
        }
        for (i, a) in intervals.iter().enumerate() {
            for b in &intervals[i + 1..] {
                if a.overlaps(b) {
                    warn!(
                        "schedule intervals [{}, {}) and [{}, {}) overlap; the first takes precedence",
                        a.start.0, a.end.0, b.start.0, b.end.0
                    );
                }
            }
        }
        Ok(Self { intervals })
    }

    /// A schedule with a single interval.
    pub fn single(start: u64, end: u64, min_arrivals: u32, max_arrivals: u32) -> ConfigResult<Self> {
        Self::new(vec![ScheduleInterval::new(start, end, min_arrivals, max_arrivals)?])
    }

    /// Arrival bounds for `tick`: the first containing interval, else `(0, 0)`.
    pub fn bounds_for(&self, tick: Tick) -> ArrivalBounds {
        self.intervals
            .iter()
            .find(|i| i.contains(tick))
            .map(ScheduleInterval::bounds)
            .unwrap_or(ArrivalBounds::ZERO)
    }

    pub fn intervals(&self) -> &[ScheduleInterval] {
        &self.intervals
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// One past the last tick covered by any interval (`Tick(0)` if empty).
    pub fn horizon(&self) -> Tick {
        self.intervals.iter().map(|i| i.end).max().unwrap_or(Tick::ZERO)
    }

    /// Expected arrivals per tick at `tick` (midpoint of the uniform bounds).
    pub fn mean_rate_at(&self, tick: Tick) -> f64 {
        let b = self.bounds_for(tick);
        (b.min as f64 + b.max as f64) / 2.0
    }
}

impl TryFrom<Vec<ScheduleInterval>> for RateSchedule {
    type Error = ts_core::ConfigError;

    fn try_from(intervals: Vec<ScheduleInterval>) -> ConfigResult<Self> {
        Self::new(intervals)
    }
}

impl From<RateSchedule> for Vec<ScheduleInterval> {
    fn from(schedule: RateSchedule) -> Self {
        schedule.intervals
    }
}
