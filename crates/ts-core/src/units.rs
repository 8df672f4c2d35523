//! Unit conversions.
//!
//! The simulation clock runs in minutes: one tick is one minute and every
//! service duration is a fractional number of minutes.  Inputs quoted in
//! seconds (turnstile passage times) or per hour (gate throughput) are
//! converted here, once, at configuration time.

pub const SECS_PER_MINUTE: f64 = 60.0;
pub const MINUTES_PER_HOUR: f64 = 60.0;

/// Seconds → minutes.
#[inline]
pub fn secs_to_minutes(secs: f64) -> f64 {
    secs / SECS_PER_MINUTE
}

/// A rate in events/hour → events/minute.
#[inline]
pub fn per_hour_to_per_minute(rate_per_hour: f64) -> f64 {
    rate_per_hour / MINUTES_PER_HOUR
}

/// Hours → minutes.
#[inline]
pub fn hours_to_minutes(hours: f64) -> f64 {
    hours * MINUTES_PER_HOUR
}
