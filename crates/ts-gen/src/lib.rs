//! `ts-gen` — random generators consumed by the queue engine once per tick.
//!
//! # Contracts
//!
//! | Trait                 | Call                         | Returns                     |
//! |-----------------------|------------------------------|-----------------------------|
//! | [`ArrivalGenerator`]  | `arrivals(tick, &mut rng)`   | arrivals stamped at `tick`  |
//! | [`ServiceDistribution`] | `sample(&mut rng)`         | service duration in minutes |
//!
//! Generators hold configuration only.  The random source is owned by the
//! engine and passed in by `&mut`, so two engines built with the same seed
//! and configuration draw identical sequences.
//!
//! # Strategies
//!
//! - [`BoundedUniformArrivals`]: `U{min..=max}` with bounds from a
//!   [`RateSchedule`](ts_schedule::RateSchedule).
//! - [`PoissonArrivals`]: `Poisson(λ(tick))` with `λ` from a
//!   [`RateProfile`](ts_schedule::RateProfile).
//! - [`ServiceTime::Uniform`] / [`ServiceTime::Exponential`] (inverse CDF).

pub mod arrival;
pub mod service;


pub use arrival::{ArrivalGenerator, ArrivalSource, ArrivalSpec, BoundedUniformArrivals, PoissonArrivals};
pub use service::{ServiceDistribution, ServiceTime};
