//! `RateProfile` — piecewise Poisson intensity `λ(tick)` in arrivals/minute.

use ts_core::error::require_non_negative;
use ts_core::{ConfigError, ConfigResult, RunRng, Tick};

/// `λ = rate` on the half-open tick range `[start, end)`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RateSegment {
    pub start: Tick,
    pub end:   Tick,
    /// Mean arrivals per tick.
    pub rate:  f64,
}

impl RateSegment {
    pub fn new(start: u64, end: u64, rate: f64) -> ConfigResult<Self> {
        let segment = Self { start: Tick(start), end: Tick(end), rate };
        segment.validate()?;
        Ok(segment)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.start >= self.end {
            return Err(ConfigError::InvalidInterval { start: self.start.0, end: self.end.0 });
        }
        require_non_negative("arrival rate", self.rate)?;
        Ok(())
    }

    #[inline]
    pub fn contains(&self, tick: Tick) -> bool {
        self.start <= tick && tick < self.end
    }
}

/// Instantaneous arrival intensity for the Poisson arrival strategy.
///
/// Lookup follows the same first-match rule as
/// [`RateSchedule`](crate::RateSchedule); ticks outside every segment get
/// `baseline`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RateProfileDef", into = "RateProfileDef")
)]
pub struct RateProfile {
    pub(crate) segments: Vec<RateSegment>,
    pub(crate) baseline: f64,
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct RateProfileDef {
    segments: Vec<RateSegment>,
    #[serde(default)]
    baseline: f64,
}

impl RateProfile {
    pub fn new(segments: Vec<RateSegment>, baseline: f64) -> ConfigResult<Self> {
        for segment in &segments {
            segment.validate()?;
        }
        require_non_negative("baseline arrival rate", baseline)?;
        Ok(Self { segments, baseline })
    }

    /// Stationary intensity: `λ(t) = rate` for every tick.
    pub fn constant(rate: f64) -> ConfigResult<Self> {
        Self::new(Vec::new(), rate)
    }

    /// One segment per tick over `[0, total_ticks)` with
    /// `λ(t) = min_rate + (max_rate − min_rate)·U[0,1)`.
    pub fn randomized(
        total_ticks: u64,
        min_rate:    f64,
        max_rate:    f64,
        rng:         &mut RunRng,
    ) -> ConfigResult<Self> {
        require_non_negative("minimum arrival rate", min_rate)?;
        require_non_negative("maximum arrival rate", max_rate)?;
        if min_rate > max_rate {
            return Err(ConfigError::NegativeRate {
                what:  "rate spread (max - min)",
                value: max_rate - min_rate,
            });
        }
        let segments = (0..total_ticks)
            .map(|t| {
                let u: f64 = rng.random();
                RateSegment {
                    start: Tick(t),
                    end:   Tick(t + 1),
                    rate:  min_rate + (max_rate - min_rate) * u,
                }
            })
            .collect();
        Ok(Self { segments, baseline: 0.0 })
    }

    /// `λ(tick)`: the first containing segment's rate, else the baseline.
    pub fn rate_at(&self, tick: Tick) -> f64 {
        self.segments
            .iter()
            .find(|s| s.contains(tick))
            .map(|s| s.rate)
            .unwrap_or(self.baseline)
    }

    /// Index of the segment that governs `tick`, or `None` for the baseline.
    pub fn segment_index(&self, tick: Tick) -> Option<usize> {
        self.segments.iter().position(|s| s.contains(tick))
    }

    pub fn segments(&self) -> &[RateSegment] {
        &self.segments
    }

    pub fn baseline(&self) -> f64 {
        self.baseline
    }
}

#[cfg(feature = "serde")]
impl TryFrom<RateProfileDef> for RateProfile {
    type Error = ConfigError;

    fn try_from(def: RateProfileDef) -> ConfigResult<Self> {
        Self::new(def.segments, def.baseline)
    }
}

#[cfg(feature = "serde")]
impl From<RateProfile> for RateProfileDef {
    fn from(profile: RateProfile) -> Self {
        Self { segments: profile.segments, baseline: profile.baseline }
    }
}
