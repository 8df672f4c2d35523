//! Arrival-count generators.

use rand_distr::{Distribution, Poisson};
use ts_core::error::require_positive;
use ts_core::{ConfigError, ConfigResult, RunRng, Tick};
use ts_schedule::{RateProfile, RateSchedule};

// ── ArrivalGenerator trait ────────────────────────────────────────────────────

/// Produces the number of customers arriving during one tick.
///
/// Implementations must be pure functions of `(tick, rng)`: all randomness
/// comes from the caller-owned `rng`, so a fixed seed gives a fixed sequence.
pub trait ArrivalGenerator: Send + Sync {
    /// Number of arrivals stamped with `tick`.
    fn arrivals(&self, tick: Tick, rng: &mut RunRng) -> u32;

    /// Expected arrivals at `tick`.  Used for reporting and for picking an
    /// equivalent stationary `λ` for the analytical model.
    fn expected_at(&self, tick: Tick) -> f64;
}

// ── Bounded-uniform ───────────────────────────────────────────────────────────

/// Draws `U{min..=max}` per tick, with bounds from a [`RateSchedule`].
///
/// Ticks outside every schedule interval have bounds `(0, 0)` and always
/// yield zero arrivals.
#[derive(Clone, Debug)]
pub struct BoundedUniformArrivals {
    schedule: RateSchedule,
}

impl BoundedUniformArrivals {
    pub fn new(schedule: RateSchedule) -> Self {
        Self { schedule }
    }

    pub fn schedule(&self) -> &RateSchedule {
        &self.schedule
    }
}

impl ArrivalGenerator for BoundedUniformArrivals {
    fn arrivals(&self, tick: Tick, rng: &mut RunRng) -> u32 {
        let bounds = self.schedule.bounds_for(tick);
        rng.gen_range(bounds.min..=bounds.max)
    }

    fn expected_at(&self, tick: Tick) -> f64 {
        self.schedule.mean_rate_at(tick)
    }
}

// ── Poisson-piecewise ─────────────────────────────────────────────────────────

/// Draws `Poisson(λ(tick))` per tick, with `λ` from a [`RateProfile`].
///
/// One `Poisson` distribution is prepared per profile segment at
/// construction; a segment with `λ = 0` yields zero arrivals without drawing.
#[derive(Clone, Debug)]
pub struct PoissonArrivals {
    profile:  RateProfile,
    /// Parallel to `profile.segments()`.
    segments: Vec<Option<Poisson<f64>>>,
    baseline: Option<Poisson<f64>>,
}

impl PoissonArrivals {
    pub fn new(profile: RateProfile) -> ConfigResult<Self> {
        let segments = profile
            .segments()
            .iter()
            .map(|s| poisson_for(s.rate))
            .collect::<ConfigResult<_>>()?;
        let baseline = poisson_for(profile.baseline())?;
        Ok(Self { profile, segments, baseline })
    }

    /// Stationary Poisson arrivals with mean `rate` per tick.
    pub fn stationary(rate: f64) -> ConfigResult<Self> {
        Self::new(RateProfile::constant(rate)?)
    }

    pub fn profile(&self) -> &RateProfile {
        &self.profile
    }
}

/// `None` for a zero rate (no draw needed).
fn poisson_for(rate: f64) -> ConfigResult<Option<Poisson<f64>>> {
    if rate == 0.0 {
        return Ok(None);
    }
    let rate = require_positive("Poisson arrival rate", rate)?;
    Poisson::new(rate)
        .map(Some)
        .map_err(|_| ConfigError::NonPositiveRate { what: "Poisson arrival rate", value: rate })
}

impl ArrivalGenerator for PoissonArrivals {
    fn arrivals(&self, tick: Tick, rng: &mut RunRng) -> u32 {
        let dist = match self.profile.segment_index(tick) {
            Some(i) => self.segments[i].as_ref(),
            None => self.baseline.as_ref(),
        };
        match dist {
            Some(d) => {
                let k: f64 = d.sample(rng.inner());
                k as u32
            }
            None => 0,
        }
    }

    fn expected_at(&self, tick: Tick) -> f64 {
        self.profile.rate_at(tick)
    }
}

// ── Runtime-selected strategy ─────────────────────────────────────────────────

/// Either arrival strategy, chosen at configuration time.
#[derive(Clone, Debug)]
pub enum ArrivalSource {
    BoundedUniform(BoundedUniformArrivals),
    Poisson(PoissonArrivals),
}

impl ArrivalGenerator for ArrivalSource {
    fn arrivals(&self, tick: Tick, rng: &mut RunRng) -> u32 {
        match self {
            ArrivalSource::BoundedUniform(g) => g.arrivals(tick, rng),
            ArrivalSource::Poisson(g) => g.arrivals(tick, rng),
        }
    }

    fn expected_at(&self, tick: Tick) -> f64 {
        match self {
            ArrivalSource::BoundedUniform(g) => g.expected_at(tick),
            ArrivalSource::Poisson(g) => g.expected_at(tick),
        }
    }
}

impl From<BoundedUniformArrivals> for ArrivalSource {
    fn from(g: BoundedUniformArrivals) -> Self {
        ArrivalSource::BoundedUniform(g)
    }
}

impl From<PoissonArrivals> for ArrivalSource {
    fn from(g: PoissonArrivals) -> Self {
        ArrivalSource::Poisson(g)
    }
}

/// Serializable description of an [`ArrivalSource`].
///
/// ```json
/// { "strategy": "bounded_uniform", "schedule": [ { "start": 0, "end": 20, "min_arrivals": 0, "max_arrivals": 2 } ] }
/// { "strategy": "poisson", "profile": { "segments": [], "baseline": 2.0 } }
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "strategy", rename_all = "snake_case")
)]
pub enum ArrivalSpec {
    BoundedUniform { schedule: RateSchedule },
    Poisson { profile: RateProfile },
}

impl ArrivalSpec {
    pub fn build(&self) -> ConfigResult<ArrivalSource> {
        Ok(match self {
            ArrivalSpec::BoundedUniform { schedule } => {
                BoundedUniformArrivals::new(schedule.clone()).into()
            }
            ArrivalSpec::Poisson { profile } => PoissonArrivals::new(profile.clone())?.into(),
        })
    }
}
