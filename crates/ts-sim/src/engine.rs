//! The `Engine` struct and its tick loop.

use log::{info, trace};
use ts_core::{RunRng, SimClock, SimConfig, Tick};
use ts_gen::{ArrivalGenerator, ServiceDistribution};

use crate::{Observation, RunResult, Server, ServerState, SimObserver, WaitingQueue};

// ── Engine ────────────────────────────────────────────────────────────────────

/// One simulation run: a single server in front of a FIFO queue.
///
/// `Engine<A, S>` owns every piece of mutable run state (clock, RNG, queue,
/// server, collected rows) and drives the four-step tick loop:
///
/// 1. [`admit_arrivals`](Self::admit_arrivals)
/// 2. [`advance_service`](Self::advance_service)
/// 3. [`start_next_service`](Self::start_next_service), only if step 2 found
///    the server idle
/// 4. [`record_observation`](Self::record_observation)
///
/// The steps are public so they can be exercised one at a time; normal use is
/// [`run`](Self::run).  Create via [`EngineBuilder`][crate::EngineBuilder].
pub struct Engine<A: ArrivalGenerator, S: ServiceDistribution> {
    /// Run configuration (total ticks, seed, label origin, …).
    pub config: SimConfig,

    /// Simulation clock; tracks the current tick.
    pub clock: SimClock,

    /// Customers waiting for the server.
    pub queue: WaitingQueue,

    /// The turnstile.
    pub server: Server,

    pub(crate) rng:          RunRng,
    pub(crate) arrivals:     A,
    pub(crate) service:      S,
    pub(crate) observations: Vec<Observation>,
    pub(crate) waits:        Vec<u64>,
    /// Tick of the most recent service start.
    pub(crate) last_start:   Option<Tick>,
}

impl<A: ArrivalGenerator, S: ServiceDistribution> Engine<A, S> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) {
        while !self.is_finished() {
            self.step(observer);
        }
        observer.on_sim_end(self.clock.current_tick);
        info!(
            "run finished at {}: arrived={} served={} left_in_queue={}",
            self.clock.current_tick,
            self.queue.enqueued(),
            self.queue.dequeued(),
            self.queue.len(),
        );
    }

    /// Run up to `n` ticks from the current position, stopping early at
    /// `config.end_tick()`.
    ///
    /// Useful for tests and incremental stepping.  Does not call
    /// `on_sim_end`.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            if self.is_finished() {
                break;
            }
            self.step(observer);
        }
    }

    /// `true` once every configured tick has been processed.
    pub fn is_finished(&self) -> bool {
        self.clock.current_tick >= self.config.end_tick()
    }

    /// Rows recorded so far.
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Waiting-time samples recorded so far, in service order.
    pub fn waits(&self) -> &[u64] {
        &self.waits
    }

    /// Snapshot of everything recorded so far.
    pub fn result(&self) -> RunResult {
        RunResult {
            observations: self.observations.clone(),
            waits:        self.waits.clone(),
            arrived:      self.queue.enqueued(),
            served:       self.queue.dequeued(),
        }
    }

    /// Consume the engine and return its result without copying the series.
    pub fn into_result(self) -> RunResult {
        RunResult {
            arrived:      self.queue.enqueued(),
            served:       self.queue.dequeued(),
            observations: self.observations,
            waits:        self.waits,
        }
    }

    // ── Tick steps ────────────────────────────────────────────────────────

    /// Step ①: draw the current tick's arrival count and enqueue that many
    /// customers stamped with it.  Returns the count.
    pub fn admit_arrivals(&mut self) -> u32 {
        let now = self.clock.current_tick;
        let count = self.arrivals.arrivals(now, &mut self.rng);
        self.queue.push_arrivals(now, count);
        count
    }

    /// Step ②: if the server is busy, spend one minute of service.
    ///
    /// Returns the state the server was in *before* this step.  A server that
    /// reaches zero here is idle from now on but must not start anyone until
    /// the next tick.
    pub fn advance_service(&mut self) -> ServerState {
        let state = self.server.state();
        if state == ServerState::Busy {
            self.server.tick_down();
        }
        state
    }

    /// Step ③: if the server is idle and anyone is waiting, move the oldest
    /// customer into service.
    ///
    /// Records and returns the customer's wait (current tick − arrival).
    /// Returns `None` without dequeuing when the server is busy, someone
    /// already started this tick, the queue is empty, or the head arrived
    /// after the current tick.  At most one customer is ever in service.
    pub fn start_next_service(&mut self) -> Option<u64> {
        let now = self.clock.current_tick;
        if self.server.is_busy() || self.last_start == Some(now) {
            return None;
        }
        // A head stamped after `now` means the clock was moved backwards.
        if self.queue.oldest()? > now {
            return None;
        }
        let arrived_at = self.queue.pop_oldest()?;
        let wait = now.since(arrived_at);
        let duration = self.service.sample(&mut self.rng);
        self.server.begin(duration);
        self.waits.push(wait);
        self.last_start = Some(now);
        trace!("{now}: service start after {wait} min, duration {duration:.3} min");
        Some(wait)
    }

    /// Step ④: append and return the current tick's observation row.
    pub fn record_observation(&mut self) -> Observation {
        let observation = Observation {
            tick:         self.clock.current_tick,
            queue_length: self.queue.len(),
            server_busy:  self.server.is_busy(),
        };
        self.observations.push(observation);
        observation
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn step<O: SimObserver>(&mut self, observer: &mut O) {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        self.admit_arrivals();
        if self.advance_service() == ServerState::Idle {
            if let Some(wait) = self.start_next_service() {
                observer.on_service_start(now, wait);
            }
        }
        let observation = self.record_observation();

        observer.on_tick_end(&observation);
        if self.config.output_interval_ticks > 0
            && now.0.is_multiple_of(self.config.output_interval_ticks)
        {
            observer.on_snapshot(now, &self.queue, &self.server);
        }

        self.clock.advance();
    }
}
