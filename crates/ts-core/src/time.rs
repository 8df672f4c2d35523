//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter where one tick is one
//! simulated minute.  Ticks are never revisited: the engine processes tick
//! `t`, then `t + 1`, up to the caller-supplied `total_ticks` (exclusive).
//!
//! The mapping to a time of day is held in `SimClock`:
//!
//!   minute_of_day = start_minute_of_day + tick
//!
//! Using an integer tick as the canonical time unit keeps arrival stamps and
//! waiting times exact; only the server's remaining busy time is fractional.

use std::fmt;

use crate::{ConfigError, ConfigResult};

/// Minutes in one day.
const MINUTES_PER_DAY: u64 = 24 * 60;

/// 08:00, the opening time used by the reference scenarios.
pub const DEFAULT_START_MINUTE_OF_DAY: u32 = 8 * 60;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter (one tick = one minute).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tracks the current tick and renders it as a time of day.
///
/// `SimClock` is cheap to copy and holds no heap data.
#[derive(Clone, Copy, Debug)]
pub struct SimClock {
    /// Minute of the day (0..1440) that tick 0 corresponds to.
    pub start_minute_of_day: u32,
    /// The current tick, advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(start_minute_of_day: u32) -> Self {
        Self {
            start_minute_of_day,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// `(hour, minute)` of the day at `tick`, wrapping past midnight.
    pub fn hour_minute(&self, tick: Tick) -> (u32, u32) {
        let minute_of_day = (self.start_minute_of_day as u64 + tick.0) % MINUTES_PER_DAY;
        ((minute_of_day / 60) as u32, (minute_of_day % 60) as u32)
    }

    /// `HH:MM` label for `tick`, e.g. tick 5 from 08:00 → `"08:05"`.
    pub fn label(&self, tick: Tick) -> String {
        let (h, m) = self.hour_minute(tick);
        format!("{h:02}:{m:02}")
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.current_tick, self.label(self.current_tick))
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Per-run simulation configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Number of ticks (minutes) to simulate.  Must be positive.
    pub total_ticks: u64,

    /// RNG seed.  `Some` makes the run reproducible; `None` seeds from OS
    /// entropy.
    #[cfg_attr(feature = "serde", serde(default))]
    pub seed: Option<u64>,

    /// Time of day for tick 0, in minutes after midnight.  Only used for
    /// labels.
    #[cfg_attr(feature = "serde", serde(default = "default_start_minute"))]
    pub start_minute_of_day: u32,

    /// Call `on_snapshot` every N ticks.  0 disables snapshots.
    #[cfg_attr(feature = "serde", serde(default))]
    pub output_interval_ticks: u64,
}

#[cfg(feature = "serde")]
fn default_start_minute() -> u32 {
    DEFAULT_START_MINUTE_OF_DAY
}

impl SimConfig {
    /// A config for `total_ticks` minutes starting at 08:00 with no snapshots.
    pub fn new(total_ticks: u64, seed: Option<u64>) -> Self {
        Self {
            total_ticks,
            seed,
            start_minute_of_day: DEFAULT_START_MINUTE_OF_DAY,
            output_interval_ticks: 0,
        }
    }

    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.start_minute_of_day)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.total_ticks == 0 {
            return Err(ConfigError::ZeroTicks);
        }
        Ok(())
    }
}
