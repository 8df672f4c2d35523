//! Schedule intervals and the arrival bounds they carry.

use ts_core::{ConfigError, ConfigResult, Tick};

// ── ArrivalBounds ─────────────────────────────────────────────────────────────

/// Inclusive `[min, max]` range of arrivals per tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArrivalBounds {
    pub min: u32,
    pub max: u32,
}

impl ArrivalBounds {
    /// No arrivals.  Returned for ticks outside every interval.
    pub const ZERO: ArrivalBounds = ArrivalBounds { min: 0, max: 0 };

    pub fn new(min: u32, max: u32) -> ConfigResult<Self> {
        if min > max {
            return Err(ConfigError::InvalidArrivalBounds { min, max });
        }
        Ok(Self { min, max })
    }

    /// `true` if the range admits exactly one value.
    #[inline]
    pub fn is_fixed(self) -> bool {
        self.min == self.max
    }
}

// ── ScheduleInterval ──────────────────────────────────────────────────────────

/// Half-open tick range `[start, end)` with its per-tick arrival bounds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduleInterval {
    pub start:        Tick,
    pub end:          Tick,
    pub min_arrivals: u32,
    pub max_arrivals: u32,
}

impl ScheduleInterval {
    /// Build and validate an interval.
    pub fn new(start: u64, end: u64, min_arrivals: u32, max_arrivals: u32) -> ConfigResult<Self> {
        let interval = Self {
            start: Tick(start),
            end: Tick(end),
            min_arrivals,
            max_arrivals,
        };
        interval.validate()?;
        Ok(interval)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.start >= self.end {
            return Err(ConfigError::InvalidInterval { start: self.start.0, end: self.end.0 });
        }
        ArrivalBounds::new(self.min_arrivals, self.max_arrivals)?;
        Ok(())
    }

    #[inline]
    pub fn contains(&self, tick: Tick) -> bool {
        self.start <= tick && tick < self.end
    }

    #[inline]
    pub fn bounds(&self) -> ArrivalBounds {
        ArrivalBounds { min: self.min_arrivals, max: self.max_arrivals }
    }

    /// Length in ticks.
    #[inline]
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// `true` if the two half-open ranges share at least one tick.
    #[inline]
    pub fn overlaps(&self, other: &ScheduleInterval) -> bool {
        self.start < other.end && other.start < self.end
    }
}
