//! Tests for ts-sim.

use ts_core::{ConfigError, RunRng, SimConfig, Tick};
use ts_gen::{ArrivalSource, ArrivalSpec, BoundedUniformArrivals, ServiceDistribution, ServiceTime};
use ts_schedule::{RateSchedule, presets};

use crate::{
    EngineBuilder, Experiment, NoopObserver, Observation, Scenario, Server, ServerState,
    SimError, SimObserver, WaitingQueue, summarize,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Exactly `per_tick` arrivals at every tick in `[0, ticks)`.
fn fixed_arrivals(ticks: u64, per_tick: u32) -> BoundedUniformArrivals {
    BoundedUniformArrivals::new(RateSchedule::single(0, ticks, per_tick, per_tick).unwrap())
}

fn one_minute_service() -> ServiceTime {
    ServiceTime::uniform(1.0, 1.0).unwrap()
}

/// Service that completes instantly.
struct InstantService;

impl ServiceDistribution for InstantService {
    fn sample(&self, _rng: &mut RunRng) -> f64 {
        0.0
    }

    fn mean(&self) -> f64 {
        0.0
    }
}

/// Counts every observer hook and remembers service starts.
#[derive(Default)]
struct Recorder {
    tick_starts:    usize,
    tick_ends:      Vec<Observation>,
    service_starts: Vec<(Tick, u64)>,
    snapshots:      Vec<(Tick, usize, Option<Tick>, f64)>,
    end_tick:       Option<Tick>,
}

impl SimObserver for Recorder {
    fn on_tick_start(&mut self, _tick: Tick) {
        self.tick_starts += 1;
    }

    fn on_service_start(&mut self, tick: Tick, wait: u64) {
        self.service_starts.push((tick, wait));
    }

    fn on_tick_end(&mut self, observation: &Observation) {
        self.tick_ends.push(*observation);
    }

    fn on_snapshot(&mut self, tick: Tick, queue: &WaitingQueue, server: &Server) {
        self.snapshots.push((tick, queue.len(), queue.oldest(), server.remaining_busy()));
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.end_tick = Some(final_tick);
    }
}

// ── Deterministic scenario ────────────────────────────────────────────────────

#[cfg(test)]
mod deterministic_tests {
    use super::*;

    /// One arrival per minute, one-minute service, five minutes.
    fn run_reference() -> crate::RunResult {
        let mut engine =
            EngineBuilder::new(SimConfig::new(5, Some(0)), fixed_arrivals(5, 1), one_minute_service())
                .build()
                .unwrap();
        engine.run(&mut NoopObserver);
        engine.into_result()
    }

    #[test]
    fn queue_lengths_match_hand_trace() {
        let r = run_reference();
        assert_eq!(r.queue_lengths().collect::<Vec<_>>(), vec![0, 1, 1, 2, 2]);
    }

    #[test]
    fn busy_flags_alternate() {
        let r = run_reference();
        assert_eq!(r.busy_flags().collect::<Vec<_>>(), vec![true, false, true, false, true]);
    }

    #[test]
    fn waits_grow_by_one_each_service() {
        let r = run_reference();
        assert_eq!(r.waits, vec![0, 1, 2]);
    }

    #[test]
    fn summary_counts_truncated_customers() {
        let s = run_reference().summary();
        assert_eq!(s.ticks, 5);
        assert_eq!(s.arrived, 5);
        assert_eq!(s.served, 3);
        assert_eq!(s.left_in_queue, 2);
        assert_eq!(s.max_queue_length, 2);
        assert_eq!(s.max_wait, Some(2));
        assert!((s.utilization - 0.6).abs() < 1e-12);
        assert!((s.mean_queue_length - 1.2).abs() < 1e-12);
        assert!((s.mean_wait.unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn ticks_are_recorded_in_order() {
        let r = run_reference();
        let ticks: Vec<u64> = r.observations.iter().map(|o| o.tick.0).collect();
        assert_eq!(ticks, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn no_arrivals_means_idle_run() {
        let empty = BoundedUniformArrivals::new(RateSchedule::default());
        let mut engine = EngineBuilder::new(SimConfig::new(10, Some(1)), empty, one_minute_service())
            .build()
            .unwrap();
        engine.run(&mut NoopObserver);
        let s = engine.into_result().summary();
        assert_eq!(s.arrived, 0);
        assert_eq!(s.served, 0);
        assert_eq!(s.mean_wait, None);
        assert_eq!(s.max_wait, None);
        assert_eq!(s.utilization, 0.0);
    }
}

// ── Individual steps ──────────────────────────────────────────────────────────

#[cfg(test)]
mod step_tests {
    use super::*;

    #[test]
    fn steps_in_isolation() {
        let mut engine =
            EngineBuilder::new(SimConfig::new(5, Some(0)), fixed_arrivals(5, 2), one_minute_service())
                .build()
                .unwrap();

        assert_eq!(engine.admit_arrivals(), 2);
        assert_eq!(engine.queue.len(), 2);

        assert_eq!(engine.advance_service(), ServerState::Idle);
        assert_eq!(engine.start_next_service(), Some(0));
        assert!(engine.server.is_busy());
        assert_eq!(engine.queue.len(), 1);

        let obs = engine.record_observation();
        assert_eq!(obs, Observation { tick: Tick(0), queue_length: 1, server_busy: true });
        assert_eq!(engine.observations(), &[obs]);
        assert_eq!(engine.waits(), &[0]);
    }

    #[test]
    fn advance_service_reports_state_before_tick_down() {
        let mut engine =
            EngineBuilder::new(SimConfig::new(5, Some(0)), fixed_arrivals(5, 1), one_minute_service())
                .build()
                .unwrap();
        engine.server.begin(1.0);
        assert_eq!(engine.advance_service(), ServerState::Busy);
        assert!(!engine.server.is_busy());
        assert_eq!(engine.advance_service(), ServerState::Idle);
    }

    #[test]
    fn start_on_empty_queue_is_none() {
        let mut engine =
            EngineBuilder::new(SimConfig::new(5, Some(0)), fixed_arrivals(5, 1), one_minute_service())
                .build()
                .unwrap();
        assert_eq!(engine.start_next_service(), None);
        assert!(!engine.server.is_busy());
        assert!(engine.waits().is_empty());
    }

    #[test]
    fn busy_server_refuses_second_start() {
        let mut engine = EngineBuilder::new(
            SimConfig::new(5, Some(0)),
            fixed_arrivals(5, 2),
            ServiceTime::uniform(3.0, 3.0).unwrap(),
        )
        .build()
        .unwrap();
        engine.admit_arrivals();
        assert_eq!(engine.start_next_service(), Some(0));
        assert_eq!(engine.start_next_service(), None);
        assert_eq!(engine.queue.len(), 1);
        assert_eq!(engine.waits(), &[0]);
        assert_eq!(engine.server.remaining_busy(), 3.0);
    }

    #[test]
    fn one_start_per_tick_even_when_service_is_instant() {
        let mut engine =
            EngineBuilder::new(SimConfig::new(5, Some(0)), fixed_arrivals(5, 2), InstantService)
                .build()
                .unwrap();
        engine.admit_arrivals();
        assert_eq!(engine.start_next_service(), Some(0));
        assert!(!engine.server.is_busy());
        assert_eq!(engine.start_next_service(), None);
        assert_eq!(engine.queue.len(), 1);

        engine.clock.advance();
        assert_eq!(engine.start_next_service(), Some(1));
    }

    #[test]
    fn clock_behind_queue_head_starts_nobody() {
        let mut engine =
            EngineBuilder::new(SimConfig::new(10, Some(0)), fixed_arrivals(10, 1), one_minute_service())
                .build()
                .unwrap();
        engine.clock.current_tick = Tick(5);
        engine.admit_arrivals();
        engine.clock.current_tick = Tick(2);
        assert_eq!(engine.start_next_service(), None);
        assert_eq!(engine.queue.len(), 1);
        assert!(engine.waits().is_empty());
    }

    #[test]
    fn wait_is_start_minus_arrival() {
        let mut engine =
            EngineBuilder::new(SimConfig::new(10, Some(0)), fixed_arrivals(10, 1), one_minute_service())
                .build()
                .unwrap();
        engine.clock.current_tick = Tick(3);
        engine.admit_arrivals();
        engine.clock.current_tick = Tick(7);
        assert_eq!(engine.start_next_service(), Some(4));
    }

    #[test]
    fn fractional_service_spans_ticks() {
        let mut server = Server::new();
        server.begin(1.5);
        server.tick_down();
        assert!(server.is_busy());
        assert!((server.remaining_busy() - 0.5).abs() < 1e-12);
        server.tick_down();
        assert_eq!(server.remaining_busy(), 0.0);
        assert_eq!(server.state(), ServerState::Idle);
    }

    #[test]
    #[should_panic]
    fn negative_duration_panics() {
        Server::new().begin(-1.0);
    }
}

// ── Zero-duration service ─────────────────────────────────────────────────────

#[cfg(test)]
mod instant_service_tests {
    use super::*;

    #[test]
    fn instant_service_never_reports_busy() {
        let mut engine =
            EngineBuilder::new(SimConfig::new(6, Some(0)), fixed_arrivals(6, 1), InstantService)
                .build()
                .unwrap();
        engine.run(&mut NoopObserver);
        let r = engine.into_result();
        assert!(r.busy_flags().all(|b| !b));
        assert!(r.queue_lengths().all(|q| q == 0));
        assert_eq!(r.waits, vec![0; 6]);
    }

    #[test]
    fn instant_service_still_one_start_per_tick() {
        let mut engine =
            EngineBuilder::new(SimConfig::new(4, Some(0)), fixed_arrivals(4, 2), InstantService)
                .build()
                .unwrap();
        engine.run(&mut NoopObserver);
        let r = engine.into_result();
        assert_eq!(r.queue_lengths().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert_eq!(r.waits, vec![0, 1, 1, 2]);
    }
}

// ── Run-wide properties ───────────────────────────────────────────────────────

#[cfg(test)]
mod property_tests {
    use super::*;

    fn university_run(seed: u64, service: ServiceTime) -> (crate::RunResult, Recorder) {
        let mut engine = EngineBuilder::new(
            SimConfig::new(presets::UNIVERSITY_DAY_TICKS, Some(seed)),
            BoundedUniformArrivals::new(presets::university_day()),
            service,
        )
        .build()
        .unwrap();
        let mut rec = Recorder::default();
        engine.run(&mut rec);
        (engine.into_result(), rec)
    }

    #[test]
    fn customers_are_conserved() {
        let (r, _) = university_run(42, ServiceTime::uniform_secs(3.0, 8.0).unwrap());
        assert_eq!(r.arrived, r.served + r.final_queue_length() as u64);
        assert_eq!(r.served as usize, r.waits.len());
    }

    #[test]
    fn service_is_fifo() {
        let (_, rec) = university_run(7, ServiceTime::uniform_secs(2.0, 5.0).unwrap());
        let arrivals: Vec<u64> = rec.service_starts.iter().map(|&(t, w)| t.0 - w).collect();
        assert!(arrivals.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn at_most_one_start_per_tick() {
        let (_, rec) = university_run(3, ServiceTime::uniform_secs(1.0, 3.0).unwrap());
        assert!(rec.service_starts.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn waits_fit_inside_the_run() {
        let (r, _) = university_run(11, ServiceTime::uniform_secs(3.0, 8.0).unwrap());
        assert!(r.waits.iter().all(|&w| w < presets::UNIVERSITY_DAY_TICKS));
        let s = r.summary();
        assert!((0.0..=1.0).contains(&s.utilization));
    }

    #[test]
    fn same_seed_same_run() {
        let service = ServiceTime::uniform_secs(2.0, 5.0).unwrap();
        let (a, _) = university_run(42, service);
        let (b, _) = university_run(42, service);
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_diverge() {
        let service = ServiceTime::uniform_secs(2.0, 5.0).unwrap();
        let (a, _) = university_run(1, service);
        let (b, _) = university_run(2, service);
        assert_ne!(a, b);
    }

    #[test]
    fn explicit_rng_overrides_seed() {
        let service = ServiceTime::uniform_secs(2.0, 5.0).unwrap();
        let mut engine = EngineBuilder::new(
            SimConfig::new(presets::UNIVERSITY_DAY_TICKS, Some(999)),
            BoundedUniformArrivals::new(presets::university_day()),
            service,
        )
        .rng(RunRng::new(42))
        .build()
        .unwrap();
        engine.run(&mut NoopObserver);
        let (expected, _) = university_run(42, service);
        assert_eq!(engine.into_result(), expected);
    }
}

// ── Poisson arrivals, exponential service ─────────────────────────────────────

#[cfg(test)]
mod poisson_tests {
    use super::*;

    const TICKS: u64 = 300;

    /// Morning-peak intensity, then the profile's baseline, through the
    /// configuration-selected strategy.
    fn peak_run(seed: u64) -> (crate::RunResult, Recorder) {
        let arrivals: ArrivalSource =
            ArrivalSpec::Poisson { profile: presets::morning_peak() }.build().unwrap();
        let mut engine = EngineBuilder::new(
            SimConfig::new(TICKS, Some(seed)),
            arrivals,
            ServiceTime::exponential(0.5).unwrap(),
        )
        .build()
        .unwrap();
        let mut rec = Recorder::default();
        engine.run(&mut rec);
        (engine.into_result(), rec)
    }

    #[test]
    fn same_seed_same_run() {
        assert_eq!(peak_run(42).0, peak_run(42).0);
    }

    #[test]
    fn customers_are_conserved() {
        let (r, _) = peak_run(42);
        assert!(r.arrived > 0);
        assert_eq!(r.arrived, r.served + r.final_queue_length() as u64);
        assert_eq!(r.served as usize, r.waits.len());
        assert_eq!(r.observations.len() as u64, TICKS);
    }

    #[test]
    fn service_is_fifo() {
        let (_, rec) = peak_run(3);
        let arrivals: Vec<u64> = rec.service_starts.iter().map(|&(t, w)| t.0 - w).collect();
        assert!(arrivals.windows(2).all(|w| w[0] <= w[1]));
        assert!(rec.service_starts.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn bounded_uniform_through_source_matches_direct() {
        let schedule = presets::university_day();
        let direct = EngineBuilder::new(
            SimConfig::new(120, Some(8)),
            BoundedUniformArrivals::new(schedule.clone()),
            ServiceTime::exponential(0.5).unwrap(),
        )
        .build()
        .unwrap();
        let via_spec = EngineBuilder::new(
            SimConfig::new(120, Some(8)),
            ArrivalSpec::BoundedUniform { schedule }.build().unwrap(),
            ServiceTime::exponential(0.5).unwrap(),
        )
        .build()
        .unwrap();
        let (mut a, mut b) = (direct, via_spec);
        a.run(&mut NoopObserver);
        b.run(&mut NoopObserver);
        assert_eq!(a.into_result(), b.into_result());
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn zero_ticks_rejected() {
        let result =
            EngineBuilder::new(SimConfig::new(0, None), fixed_arrivals(5, 1), one_minute_service())
                .build();
        assert!(matches!(result, Err(SimError::Config(ConfigError::ZeroTicks))));
    }

    #[test]
    fn inverted_service_bounds_rejected() {
        let bad = ServiceTime::Uniform { low: 5.0, high: 2.0 };
        let result = EngineBuilder::new(SimConfig::new(5, None), fixed_arrivals(5, 1), bad).build();
        assert!(matches!(
            result,
            Err(SimError::Config(ConfigError::InvalidServiceBounds { .. }))
        ));
    }

    #[test]
    fn non_positive_exponential_rate_rejected() {
        let bad = ServiceTime::Exponential { rate: 0.0 };
        let result = EngineBuilder::new(SimConfig::new(5, None), fixed_arrivals(5, 1), bad).build();
        assert!(matches!(result, Err(SimError::Config(ConfigError::NonPositiveRate { .. }))));
    }

    #[test]
    fn seed_method_sets_config_seed() {
        let engine = EngineBuilder::new(SimConfig::new(5, None), fixed_arrivals(5, 1), one_minute_service())
            .seed(9)
            .build()
            .unwrap();
        assert_eq!(engine.config.seed, Some(9));
        assert_eq!(engine.clock.current_tick, Tick::ZERO);
    }

    #[test]
    fn huge_tick_count_builds() {
        let mut engine =
            EngineBuilder::new(SimConfig::new(u64::MAX, Some(0)), fixed_arrivals(5, 1), one_minute_service())
                .build()
                .unwrap();
        engine.run_ticks(3, &mut NoopObserver);
        assert_eq!(engine.observations().len(), 3);
        assert!(!engine.is_finished());
    }
}

// ── Observer and stepping ─────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use super::*;

    #[test]
    fn hooks_fire_once_per_tick() {
        let mut engine =
            EngineBuilder::new(SimConfig::new(5, Some(0)), fixed_arrivals(5, 1), one_minute_service())
                .build()
                .unwrap();
        let mut rec = Recorder::default();
        engine.run(&mut rec);
        assert_eq!(rec.tick_starts, 5);
        assert_eq!(rec.tick_ends.len(), 5);
        assert_eq!(rec.tick_ends, engine.observations());
        assert_eq!(rec.service_starts, vec![(Tick(0), 0), (Tick(2), 1), (Tick(4), 2)]);
        assert_eq!(rec.end_tick, Some(Tick(5)));
    }

    #[test]
    fn snapshots_follow_interval() {
        let config = SimConfig { output_interval_ticks: 2, ..SimConfig::new(5, Some(0)) };
        let mut engine = EngineBuilder::new(config, fixed_arrivals(5, 1), one_minute_service())
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        engine.run(&mut rec);
        let ticks: Vec<Tick> = rec.snapshots.iter().map(|s| s.0).collect();
        assert_eq!(ticks, vec![Tick(0), Tick(2), Tick(4)]);
        // Tick 4: customers from ticks 3 and 4 waiting, one minute of service left.
        assert_eq!(rec.snapshots[2], (Tick(4), 2, Some(Tick(3)), 1.0));
    }

    #[test]
    fn snapshots_disabled_by_default() {
        let mut engine =
            EngineBuilder::new(SimConfig::new(5, Some(0)), fixed_arrivals(5, 1), one_minute_service())
                .build()
                .unwrap();
        let mut rec = Recorder::default();
        engine.run(&mut rec);
        assert!(rec.snapshots.is_empty());
    }

    #[test]
    fn run_ticks_stops_at_end() {
        let mut engine =
            EngineBuilder::new(SimConfig::new(5, Some(0)), fixed_arrivals(5, 1), one_minute_service())
                .build()
                .unwrap();
        let mut rec = Recorder::default();
        engine.run_ticks(3, &mut rec);
        assert_eq!(engine.observations().len(), 3);
        assert!(!engine.is_finished());
        engine.run_ticks(10, &mut rec);
        assert_eq!(engine.observations().len(), 5);
        assert!(engine.is_finished());
        assert_eq!(rec.end_tick, None);
    }

    #[test]
    fn stepped_run_equals_full_run() {
        let build = || {
            EngineBuilder::new(
                SimConfig::new(60, Some(5)),
                BoundedUniformArrivals::new(presets::university_day()),
                ServiceTime::uniform_secs(2.0, 5.0).unwrap(),
            )
            .build()
            .unwrap()
        };
        let mut full = build();
        full.run(&mut NoopObserver);
        let mut stepped = build();
        while !stepped.is_finished() {
            stepped.run_ticks(7, &mut NoopObserver);
        }
        assert_eq!(full.result(), stepped.result());
    }
}

// ── Experiment ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod experiment_tests {
    use super::*;

    fn three_scenarios() -> Vec<Scenario> {
        vec![
            Scenario::new("2-5 s", ServiceTime::uniform_secs(2.0, 5.0).unwrap(), Some(42)),
            Scenario::new("3-8 s", ServiceTime::uniform_secs(3.0, 8.0).unwrap(), Some(42)),
            Scenario::new("1-3 s", ServiceTime::uniform_secs(1.0, 3.0).unwrap(), Some(42)),
        ]
    }

    fn day_experiment() -> Experiment {
        Experiment::new(
            SimConfig::new(presets::UNIVERSITY_DAY_TICKS, None),
            BoundedUniformArrivals::new(presets::university_day()),
        )
    }

    #[test]
    fn empty_experiment_errors() {
        assert!(matches!(day_experiment().run(), Err(SimError::EmptyExperiment)));
    }

    #[test]
    fn results_keep_definition_order() {
        let results = day_experiment().scenarios(three_scenarios()).run().unwrap();
        let labels: Vec<&str> = results.iter().map(|r| r.scenario.label.as_str()).collect();
        assert_eq!(labels, vec!["2-5 s", "3-8 s", "1-3 s"]);
    }

    #[test]
    fn scenarios_match_standalone_runs() {
        let results = day_experiment().scenarios(three_scenarios()).run().unwrap();
        for r in &results {
            let mut engine = EngineBuilder::new(
                SimConfig::new(presets::UNIVERSITY_DAY_TICKS, r.seed),
                BoundedUniformArrivals::new(presets::university_day()),
                r.scenario.service,
            )
            .build()
            .unwrap();
            engine.run(&mut NoopObserver);
            assert_eq!(engine.into_result(), r.result);
        }
    }

    #[test]
    fn seeds_derive_from_root() {
        let config = SimConfig::new(30, Some(7));
        let exp = Experiment::new(config, fixed_arrivals(30, 1))
            .scenario(Scenario::new("a", one_minute_service(), None))
            .scenario(Scenario::new("b", one_minute_service(), Some(1)))
            .scenario(Scenario::new("c", one_minute_service(), None));
        let seeds: Vec<Option<u64>> = exp.run().unwrap().into_iter().map(|r| r.seed).collect();
        assert_eq!(
            seeds,
            vec![Some(RunRng::derive_seed(7, 0)), Some(1), Some(RunRng::derive_seed(7, 2))]
        );
    }

    #[test]
    fn bad_scenario_fails_before_running() {
        let exp = day_experiment()
            .scenario(Scenario::new("ok", ServiceTime::uniform_secs(2.0, 5.0).unwrap(), Some(1)))
            .scenario(Scenario::new("bad", ServiceTime::Uniform { low: 0.0, high: 1.0 }, Some(1)));
        assert!(matches!(exp.run(), Err(SimError::Config(_))));
    }

    #[test]
    fn summarize_one_row_per_scenario() {
        let results = day_experiment().scenarios(three_scenarios()).run().unwrap();
        let rows = summarize(&results);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].label, "3-8 s");
        for (row, r) in rows.iter().zip(&results) {
            assert_eq!(row.service, r.scenario.service);
            assert_eq!(row.summary, r.result.summary());
            assert_eq!(row.summary.ticks, presets::UNIVERSITY_DAY_TICKS);
        }
    }

    #[test]
    fn scenario_can_override_arrivals() {
        let exp = Experiment::new(SimConfig::new(30, Some(1)), fixed_arrivals(30, 1))
            .scenario(Scenario::new("default", one_minute_service(), None))
            .scenario(
                Scenario::new("closed", one_minute_service(), None)
                    .with_arrivals(ArrivalSpec::BoundedUniform { schedule: RateSchedule::default() }),
            )
            .scenario(
                Scenario::new("poisson", one_minute_service(), None)
                    .with_arrivals(ArrivalSpec::Poisson { profile: presets::morning_peak() }),
            );
        let results = exp.run().unwrap();
        assert_eq!(results[0].result.arrived, 30);
        assert_eq!(results[1].result.arrived, 0);
        assert!(results[1].result.waits.is_empty());
        assert!(results[2].result.arrived > 0);
        assert!(results.iter().all(|r| r.result.observations.len() == 30));
    }
}
