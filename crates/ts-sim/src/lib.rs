//! `ts-sim` — single-server FIFO queue engine for the turnstile simulator.
//!
//! # Four-step tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Arrivals: draw a count from the ArrivalGenerator and enqueue that
//!                many customers stamped with `tick`.
//!   ② Service:  if the server is Busy, remaining time -= 1.0 (floor 0).
//!   ③ Start:    else (Idle at the start of step ②) and the queue is
//!                non-empty: dequeue the oldest customer, record its wait,
//!                sample a duration and set remaining time to it.
//!   ④ Record:   queue length after ①–③ and busy = remaining > 0.
//! ```
//!
//! A server that finishes in ② stays idle until the next tick's ③; completion
//! and the next start are never fused into one tick.
//!
//! The run always lasts exactly `total_ticks`.  Customers still queued at the
//! end are not counted in the waiting-time statistics.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs [`Experiment`] scenarios on Rayon's thread pool.  |
//! | `serde`    | Serialize/Deserialize for results and scenarios.       |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ts_core::SimConfig;
//! use ts_gen::{BoundedUniformArrivals, ServiceTime};
//! use ts_sim::{EngineBuilder, NoopObserver};
//!
//! let arrivals = BoundedUniformArrivals::new(ts_schedule::presets::university_day());
//! let service  = ServiceTime::uniform_secs(2.0, 5.0)?;
//! let mut engine = EngineBuilder::new(SimConfig::new(480, Some(42)), arrivals, service).build()?;
//! engine.run(&mut NoopObserver);
//! let summary = engine.into_result().summary();
//! ```

pub mod builder;
pub mod engine;
pub mod error;
pub mod experiment;
pub mod observer;
pub mod queue;
pub mod result;
pub mod server;

#[cfg(test)]
mod tests;

pub use builder::EngineBuilder;
pub use engine::Engine;
pub use error::{SimError, SimResult};
pub use experiment::{Experiment, Scenario, ScenarioResult, ScenarioSummary, summarize};
pub use observer::{NoopObserver, SimObserver};
pub use queue::WaitingQueue;
pub use result::{Observation, RunResult, RunSummary};
pub use server::{Server, ServerState};
