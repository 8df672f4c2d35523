//! `ts-erlang` — steady-state M/M/c (Erlang-C) formulas.
//!
//! Pure functions with no state.  Everything here assumes Poisson arrivals at
//! rate `λ`, exponential service at rate `μ` per server, and `c` identical
//! servers sharing one FIFO queue.
//!
//! | Symbol | Meaning                         | Function                   |
//! |--------|---------------------------------|----------------------------|
//! | `a`    | offered load `λ / μ`            | [`MmcParams::offered_load`] |
//! | `ρ`    | traffic intensity `λ / (c·μ)`   | [`traffic_intensity`]      |
//! | `p0`   | probability the system is empty | [`blocking_probability`]   |
//! | `C`    | probability an arrival waits    | [`probability_of_wait`]    |
//! | `Wq`   | mean wait in queue              | [`waiting_time`]           |
//! | `Lq`   | mean queue length `λ·Wq`        | [`expected_queue_length`]  |
//!
//! The steady state only exists for `ρ < 1`.  Every function that needs it
//! returns [`SteadyState::Overloaded`] otherwise; check before doing
//! arithmetic on the result.
//!
//! Rates may be in any time unit as long as `λ` and `μ` agree; `Wq` comes
//! back in the reciprocal of that unit.  [`waiting_time_minutes`] takes hourly
//! rates and returns minutes.

pub mod mmc;


pub use mmc::{
    MmcParams, SteadyState, blocking_probability, expected_queue_length, probability_of_wait,
    traffic_intensity, waiting_time, waiting_time_minutes,
};
