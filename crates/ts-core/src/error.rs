//! Configuration error type.
//!
//! Every validation failure that can happen before the first tick runs is a
//! `ConfigError`.  Sub-crates wrap it as one variant of their own error enums
//! via `#[from]`.

use thiserror::Error;

/// Invalid simulation, schedule, distribution, or model parameters.
///
/// Raised at construction time only; the tick loop itself never returns one.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("total tick count must be positive")]
    ZeroTicks,

    #[error("schedule interval [{start}, {end}) is empty or reversed")]
    InvalidInterval { start: u64, end: u64 },

    #[error("arrival bounds min={min} exceed max={max}")]
    InvalidArrivalBounds { min: u32, max: u32 },

    #[error("service-time bounds [{low}, {high}] must satisfy 0 < low <= high")]
    InvalidServiceBounds { low: f64, high: f64 },

    #[error("{what} must be positive and finite, got {value}")]
    NonPositiveRate { what: &'static str, value: f64 },

    #[error("{what} must be non-negative and finite, got {value}")]
    NegativeRate { what: &'static str, value: f64 },

    #[error("server count must be at least 1")]
    NoServers,
}

/// Shorthand result type for construction-time validation.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Check that `value` is strictly positive and finite.
pub fn require_positive(what: &'static str, value: f64) -> ConfigResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NonPositiveRate { what, value })
    }
}

/// Check that `value` is non-negative and finite.
pub fn require_non_negative(what: &'static str, value: f64) -> ConfigResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NegativeRate { what, value })
    }
}
