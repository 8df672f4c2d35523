//! Experiment runner: several independent runs over the same or different
//! arrival models.
//!
//! The experiment holds a default [`ArrivalSource`]; a scenario may replace it
//! with its own [`ArrivalSpec`].
//!
//! # Isolation
//!
//! Every scenario gets its own [`Engine`], queue, server and [`RunRng`].
//! Nothing mutable is shared between runs, so the sequential and `parallel`
//! paths return identical results, in scenario definition order.
//!
//! # Seeds
//!
//! A scenario's seed is, in order of preference:
//!
//! 1. its own `seed`;
//! 2. `RunRng::derive_seed(config.seed, index)` when the experiment config has
//!    a root seed;
//! 3. OS entropy.

use log::debug;
use ts_core::{RunRng, SimConfig};
use ts_gen::{ArrivalSource, ArrivalSpec, ServiceTime};

use crate::{Engine, EngineBuilder, NoopObserver, RunResult, RunSummary, SimError, SimResult};

/// One configured run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scenario {
    pub label:    String,
    pub service:  ServiceTime,
    #[cfg_attr(feature = "serde", serde(default))]
    pub seed:     Option<u64>,
    /// Arrival model for this scenario only; `None` uses the experiment's.
    #[cfg_attr(feature = "serde", serde(default))]
    pub arrivals: Option<ArrivalSpec>,
}

impl Scenario {
    pub fn new(label: impl Into<String>, service: ServiceTime, seed: Option<u64>) -> Self {
        Self { label: label.into(), service, seed, arrivals: None }
    }

    /// Run this scenario against `arrivals` instead of the experiment default.
    pub fn with_arrivals(mut self, arrivals: ArrivalSpec) -> Self {
        self.arrivals = Some(arrivals);
        self
    }
}

/// The outcome of one scenario.
#[derive(Clone, Debug, PartialEq)]
pub struct ScenarioResult {
    pub scenario: Scenario,
    /// The seed actually used (`None` = OS entropy).
    pub seed:     Option<u64>,
    pub result:   RunResult,
}

/// One row of the cross-scenario table.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioSummary {
    pub label:   String,
    pub service: ServiceTime,
    pub summary: RunSummary,
}

/// Runs every scenario for the same run length, against the default arrival
/// model unless the scenario overrides it.
pub struct Experiment {
    config:    SimConfig,
    arrivals:  ArrivalSource,
    scenarios: Vec<Scenario>,
}

impl Experiment {
    /// `config.seed` acts as the root seed for scenarios without their own.
    pub fn new(config: SimConfig, arrivals: impl Into<ArrivalSource>) -> Self {
        Self { config, arrivals: arrivals.into(), scenarios: Vec::new() }
    }

    /// Append a scenario.
    pub fn scenario(mut self, scenario: Scenario) -> Self {
        self.scenarios.push(scenario);
        self
    }

    /// Append several scenarios.
    pub fn scenarios(mut self, scenarios: impl IntoIterator<Item = Scenario>) -> Self {
        self.scenarios.extend(scenarios);
        self
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    fn seed_for(&self, index: usize, scenario: &Scenario) -> Option<u64> {
        scenario
            .seed
            .or_else(|| self.config.seed.map(|root| RunRng::derive_seed(root, index as u64)))
    }

    /// Build every engine first (so a bad scenario fails before any run
    /// starts), then run them.
    pub fn run(&self) -> SimResult<Vec<ScenarioResult>> {
        if self.scenarios.is_empty() {
            return Err(SimError::EmptyExperiment);
        }

        let mut seeds = Vec::with_capacity(self.scenarios.len());
        let mut engines = Vec::with_capacity(self.scenarios.len());
        for (index, scenario) in self.scenarios.iter().enumerate() {
            let seed = self.seed_for(index, scenario);
            let config = SimConfig { seed, ..self.config.clone() };
            let arrivals = match &scenario.arrivals {
                Some(spec) => spec.build()?,
                None => self.arrivals.clone(),
            };
            engines.push(EngineBuilder::new(config, arrivals, scenario.service).build()?);
            seeds.push(seed);
            debug!("scenario {index} '{}' prepared with seed {seed:?}", scenario.label);
        }

        let results = run_engines(engines);

        Ok(self
            .scenarios
            .iter()
            .cloned()
            .zip(seeds)
            .zip(results)
            .map(|((scenario, seed), result)| ScenarioResult { scenario, seed, result })
            .collect())
    }
}

type ScenarioEngine = Engine<ArrivalSource, ServiceTime>;

#[cfg(not(feature = "parallel"))]
fn run_engines(engines: Vec<ScenarioEngine>) -> Vec<RunResult> {
    engines
        .into_iter()
        .map(|mut engine| {
            engine.run(&mut NoopObserver);
            engine.into_result()
        })
        .collect()
}

#[cfg(feature = "parallel")]
fn run_engines(engines: Vec<ScenarioEngine>) -> Vec<RunResult> {
    use rayon::prelude::*;

    // Indexed parallel iterator: `collect` preserves scenario order.
    engines
        .into_par_iter()
        .map(|mut engine| {
            engine.run(&mut NoopObserver);
            engine.into_result()
        })
        .collect()
}

/// Reduce finished scenarios to one summary row each.  Pure: reads only.
pub fn summarize(results: &[ScenarioResult]) -> Vec<ScenarioSummary> {
    results
        .iter()
        .map(|r| ScenarioSummary {
            label:   r.scenario.label.clone(),
            service: r.scenario.service,
            summary: r.result.summary(),
        })
        .collect()
}
