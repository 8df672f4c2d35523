//! Fluent builder for constructing an [`Engine`].

use log::debug;
use ts_core::{RunRng, SimConfig};
use ts_gen::{ArrivalGenerator, ServiceDistribution};

use crate::{Engine, Server, SimResult, WaitingQueue};

const MAX_PREALLOCATED_TICKS: u64 = 1 << 20;

/// Fluent builder for [`Engine<A, S>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: total ticks, seed, clock origin, snapshot interval
/// - `A: ArrivalGenerator`, e.g. [`ts_gen::BoundedUniformArrivals`]
/// - `S: ServiceDistribution`, e.g. [`ts_gen::ServiceTime`]
///
/// # Optional inputs (have defaults)
///
/// | Method       | Default                                         |
/// |--------------|-------------------------------------------------|
/// | `.seed(s)`   | `config.seed`                                   |
/// | `.rng(r)`    | `RunRng` seeded from the seed, or OS entropy    |
///
/// # Example
///
/// ```rust,ignore
/// let mut engine = EngineBuilder::new(config, arrivals, ServiceTime::uniform(1.0, 1.0)?)
///     .seed(42)
///     .build()?;
/// engine.run(&mut NoopObserver);
/// ```
pub struct EngineBuilder<A: ArrivalGenerator, S: ServiceDistribution> {
    config:   SimConfig,
    arrivals: A,
    service:  S,
    rng:      Option<RunRng>,
}

impl<A: ArrivalGenerator, S: ServiceDistribution> EngineBuilder<A, S> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, arrivals: A, service: S) -> Self {
        Self { config, arrivals, service, rng: None }
    }

    /// Override `config.seed`.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Supply the run's random source directly.  Takes precedence over any
    /// seed.
    pub fn rng(mut self, rng: RunRng) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Validate inputs and return a ready-to-run [`Engine`] at tick 0.
    ///
    /// Fails with [`SimError::Config`][crate::SimError::Config] on a zero
    /// tick count or invalid service-time parameters.
    pub fn build(self) -> SimResult<Engine<A, S>> {
        self.config.validate()?;
        self.service.validate()?;

        let rng = self
            .rng
            .unwrap_or_else(|| RunRng::from_seed_opt(self.config.seed));

        debug!(
            "engine built: {} ticks, seed {:?}, mean service {:.4} min",
            self.config.total_ticks,
            self.config.seed,
            self.service.mean(),
        );

        // Pre-allocate up to about two years of minutes; longer runs grow on demand.
        let capacity = self.config.total_ticks.min(MAX_PREALLOCATED_TICKS) as usize;
        Ok(Engine {
            clock:        self.config.make_clock(),
            config:       self.config,
            queue:        WaitingQueue::new(),
            server:       Server::new(),
            rng,
            arrivals:     self.arrivals,
            service:      self.service,
            observations: Vec::with_capacity(capacity),
            waits:        Vec::new(),
            last_start:   None,
        })
    }
}
