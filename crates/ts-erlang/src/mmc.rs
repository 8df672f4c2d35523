//! M/M/c parameters and the Erlang-C formulas.

use ts_core::error::{require_non_negative, require_positive};
use ts_core::units::hours_to_minutes;
use ts_core::{ConfigError, ConfigResult};

// ── SteadyState ───────────────────────────────────────────────────────────────

/// A steady-state quantity, or the overload sentinel when `ρ ≥ 1`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SteadyState<T> {
    Stable(T),
    /// The queue grows without bound; `rho` is the offending intensity.
    Overloaded { rho: f64 },
}

impl<T> SteadyState<T> {
    /// The value when stable, `None` when overloaded.
    pub fn value(self) -> Option<T> {
        match self {
            SteadyState::Stable(v) => Some(v),
            SteadyState::Overloaded { .. } => None,
        }
    }

    pub fn is_overloaded(&self) -> bool {
        matches!(self, SteadyState::Overloaded { .. })
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> SteadyState<U> {
        match self {
            SteadyState::Stable(v) => SteadyState::Stable(f(v)),
            SteadyState::Overloaded { rho } => SteadyState::Overloaded { rho },
        }
    }
}

// ── MmcParams ─────────────────────────────────────────────────────────────────

/// Validated `(λ, μ, c)`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MmcParams {
    /// `λ`, arrivals per unit time.  May be zero.
    pub arrival_rate: f64,
    /// `μ`, completions per unit time per server.
    pub service_rate: f64,
    /// `c`, number of servers.
    pub servers:      u32,
}

impl MmcParams {
    pub fn new(arrival_rate: f64, service_rate: f64, servers: u32) -> ConfigResult<Self> {
        if servers == 0 {
            return Err(ConfigError::NoServers);
        }
        require_non_negative("arrival rate", arrival_rate)?;
        require_positive("service rate", service_rate)?;
        Ok(Self { arrival_rate, service_rate, servers })
    }

    /// `a = λ / μ`, in Erlangs.
    #[inline]
    pub fn offered_load(&self) -> f64 {
        self.arrival_rate / self.service_rate
    }

    /// `ρ = λ / (c·μ)`.
    #[inline]
    pub fn traffic_intensity(&self) -> f64 {
        self.offered_load() / self.servers as f64
    }

    #[inline]
    pub fn is_stable(&self) -> bool {
        self.traffic_intensity() < 1.0
    }

    /// Split `1 / p0` into the finite sum `Σ_{n<c} aⁿ/n!` and the correction
    /// term `a^c / (c!·(1−ρ))`.  Caller guarantees `ρ < 1`.
    ///
    /// Terms are built incrementally (`aⁿ/n! = aⁿ⁻¹/(n−1)! · a/n`), so large
    /// `c` never overflows a factorial.
    fn p0_terms(&self) -> (f64, f64) {
        let a = self.offered_load();
        let rho = self.traffic_intensity();
        let mut term = 1.0;
        let mut sum = 0.0;
        for n in 0..self.servers {
            sum += term;
            term *= a / (n + 1) as f64;
        }
        // `term` is now a^c / c!.
        (sum, term / (1.0 - rho))
    }

    fn guard<T>(&self, f: impl FnOnce(&Self) -> T) -> SteadyState<T> {
        let rho = self.traffic_intensity();
        if rho < 1.0 {
            SteadyState::Stable(f(self))
        } else {
            SteadyState::Overloaded { rho }
        }
    }

    /// `p0`, the probability of an empty system.
    pub fn blocking_probability(&self) -> SteadyState<f64> {
        self.guard(|p| {
            let (sum, tail) = p.p0_terms();
            1.0 / (sum + tail)
        })
    }

    /// Erlang-C `C(c, a)`: the probability an arriving customer has to queue.
    pub fn probability_of_wait(&self) -> SteadyState<f64> {
        self.guard(|p| {
            let (sum, tail) = p.p0_terms();
            tail / (sum + tail)
        })
    }

    /// `Wq = C(c, a) / (c·μ − λ)`.
    pub fn waiting_time(&self) -> SteadyState<f64> {
        let spare = self.servers as f64 * self.service_rate - self.arrival_rate;
        self.probability_of_wait().map(|c| c / spare)
    }

    /// `Lq = λ·Wq` (Little's law).
    pub fn expected_queue_length(&self) -> SteadyState<f64> {
        let lambda = self.arrival_rate;
        self.waiting_time().map(|wq| lambda * wq)
    }
}

// ── Free functions ────────────────────────────────────────────────────────────

/// `ρ = λ / (c·μ)`.
pub fn traffic_intensity(arrival_rate: f64, service_rate: f64, servers: u32) -> ConfigResult<f64> {
    Ok(MmcParams::new(arrival_rate, service_rate, servers)?.traffic_intensity())
}

/// `p0`, or the overload sentinel when `λ ≥ c·μ`.
pub fn blocking_probability(
    arrival_rate: f64,
    service_rate: f64,
    servers: u32,
) -> ConfigResult<SteadyState<f64>> {
    Ok(MmcParams::new(arrival_rate, service_rate, servers)?.blocking_probability())
}

/// `C(c, a)`, or the overload sentinel.
pub fn probability_of_wait(
    arrival_rate: f64,
    service_rate: f64,
    servers: u32,
) -> ConfigResult<SteadyState<f64>> {
    Ok(MmcParams::new(arrival_rate, service_rate, servers)?.probability_of_wait())
}

/// `Wq` in the reciprocal of the rates' time unit, or the overload sentinel.
pub fn waiting_time(
    arrival_rate: f64,
    service_rate: f64,
    servers: u32,
) -> ConfigResult<SteadyState<f64>> {
    Ok(MmcParams::new(arrival_rate, service_rate, servers)?.waiting_time())
}

/// `Lq`, or the overload sentinel.
pub fn expected_queue_length(
    arrival_rate: f64,
    service_rate: f64,
    servers: u32,
) -> ConfigResult<SteadyState<f64>> {
    Ok(MmcParams::new(arrival_rate, service_rate, servers)?.expected_queue_length())
}

/// `Wq` in minutes for rates given per hour.
pub fn waiting_time_minutes(
    arrivals_per_hour: f64,
    services_per_hour: f64,
    servers: u32,
) -> ConfigResult<SteadyState<f64>> {
    Ok(waiting_time(arrivals_per_hour, services_per_hour, servers)?.map(hours_to_minutes))
}
