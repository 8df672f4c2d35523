//! `ts-core` — foundational types for the `turnstile` queue simulator.
//!
//! This crate is a dependency of every other `ts-*` crate.  It has no `ts-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`time`]   | `Tick`, `SimClock`, `SimConfig`                            |
//! | [`units`]  | minute / second / hour conversions                         |
//! | [`rng`]    | `RunRng` (one per simulation run)                          |
//! | [`error`]  | `ConfigError`, `ConfigResult`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public config types. |

pub mod error;
pub mod rng;
pub mod time;
pub mod units;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{ConfigError, ConfigResult};
pub use rng::RunRng;
pub use time::{SimClock, SimConfig, Tick};
pub use units::{per_hour_to_per_minute, secs_to_minutes};
