//! `ts-schedule` — piecewise arrival schedules for the turnstile simulator.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`interval`] | `ScheduleInterval`, `ArrivalBounds`                        |
//! | [`schedule`] | `RateSchedule`: bounded arrival counts per tick           |
//! | [`profile`]  | `RateSegment`, `RateProfile`: Poisson intensity per tick  |
//! | [`presets`]  | `university_day`, `morning_peak`                           |
//! | [`loader`]   | CSV loaders for schedules and profiles                     |
//! | [`error`]    | `ScheduleError`, `ScheduleResult<T>`                       |
//!
//! # Lookup model (summary)
//!
//! Both `RateSchedule` and `RateProfile` are immutable after construction and
//! answer per-tick queries by a linear scan in definition order:
//!
//! ```text
//! bounds_for(t) = first interval with start ≤ t < end, else (0, 0)
//! rate_at(t)    = first segment  with start ≤ t < end, else baseline
//! ```
//!
//! Overlapping intervals are accepted; the earlier definition wins.

pub mod error;
pub mod interval;
pub mod loader;
pub mod presets;
pub mod profile;
pub mod schedule;


pub use error::{ScheduleError, ScheduleResult};
pub use interval::{ArrivalBounds, ScheduleInterval};
pub use loader::{load_profile_csv, load_profile_reader, load_schedule_csv, load_schedule_reader};
pub use profile::{RateProfile, RateSegment};
pub use schedule::RateSchedule;
