//! Simulation observer trait for progress reporting and data collection.

use ts_core::Tick;

use crate::{Observation, Server, WaitingQueue};

/// Callbacks invoked by [`Engine::run`][crate::Engine::run] at key points in
/// the tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, obs: &Observation) {
///         if obs.tick.0 % self.interval == 0 {
///             println!("{}: {} waiting", obs.tick, obs.queue_length);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called when a customer enters service at `tick` after waiting `wait`
    /// minutes.
    fn on_service_start(&mut self, _tick: Tick, _wait: u64) {}

    /// Called at the end of each tick with the row just recorded.
    fn on_tick_end(&mut self, _observation: &Observation) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks`
    /// ticks) with read-only access to the queue and server.
    fn on_snapshot(&mut self, _tick: Tick, _queue: &WaitingQueue, _server: &Server) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
