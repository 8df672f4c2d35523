//! Service-time distributions.
//!
//! Durations are in minutes.  Use [`ServiceTime::uniform_secs`] when the
//! bounds are quoted in seconds.

use ts_core::error::require_positive;
use ts_core::{ConfigError, ConfigResult, RunRng, secs_to_minutes};

/// Samples one service duration per customer entering service.
pub trait ServiceDistribution: Send + Sync {
    /// A non-negative, finite duration in minutes.
    fn sample(&self, rng: &mut RunRng) -> f64;

    /// Mean duration in minutes.
    fn mean(&self) -> f64;

    /// Service rate `μ = 1 / mean` in customers per minute.
    fn rate(&self) -> f64 {
        1.0 / self.mean()
    }

    /// Reject parameters that would make `sample` violate its contract.
    fn validate(&self) -> ConfigResult<()> {
        Ok(())
    }
}

/// The two supported service-time laws.
///
/// Construct through [`uniform`](Self::uniform),
/// [`uniform_secs`](Self::uniform_secs) or
/// [`exponential`](Self::exponential), which validate.  Values built directly
/// (or deserialized) must pass [`ServiceDistribution::validate`] before use;
/// the engine builder checks this.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "mode", rename_all = "snake_case")
)]
pub enum ServiceTime {
    /// `U[low, high]` minutes, `0 < low <= high`.
    Uniform { low: f64, high: f64 },
    /// `Exp(rate)` with mean `1 / rate` minutes, sampled as `-ln(u) / rate`.
    Exponential { rate: f64 },
}

impl ServiceTime {
    pub fn uniform(low: f64, high: f64) -> ConfigResult<Self> {
        let s = ServiceTime::Uniform { low, high };
        s.validate()?;
        Ok(s)
    }

    /// Uniform service with bounds in seconds, stored as minutes.
    pub fn uniform_secs(low_secs: f64, high_secs: f64) -> ConfigResult<Self> {
        Self::uniform(secs_to_minutes(low_secs), secs_to_minutes(high_secs))
    }

    pub fn exponential(rate: f64) -> ConfigResult<Self> {
        let s = ServiceTime::Exponential { rate };
        s.validate()?;
        Ok(s)
    }
}

impl ServiceDistribution for ServiceTime {
    fn sample(&self, rng: &mut RunRng) -> f64 {
        match *self {
            ServiceTime::Uniform { low, high } => {
                if low == high {
                    low
                } else {
                    rng.gen_range(low..=high)
                }
            }
            ServiceTime::Exponential { rate } => -rng.open_unit().ln() / rate,
        }
    }

    fn mean(&self) -> f64 {
        match *self {
            ServiceTime::Uniform { low, high } => (low + high) / 2.0,
            ServiceTime::Exponential { rate } => 1.0 / rate,
        }
    }

    fn validate(&self) -> ConfigResult<()> {
        match *self {
            ServiceTime::Uniform { low, high } => {
                let ok = low.is_finite() && high.is_finite() && low > 0.0 && low <= high;
                if !ok {
                    return Err(ConfigError::InvalidServiceBounds { low, high });
                }
            }
            ServiceTime::Exponential { rate } => {
                require_positive("exponential service rate", rate)?;
            }
        }
        Ok(())
    }
}
