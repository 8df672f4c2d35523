//! turnstile — reference experiments for the single-turnstile queue model.
//!
//! 1. A 480-minute university day (08:00–16:00) under three service-time
//!    scenarios, summarised side by side.  The first scenario is re-run with
//!    full CSV output in `output/turnstile/`.
//! 2. A 30-minute Poisson morning peak.
//! 3. One hour of a slow turnstile with exponential service.
//! 4. The Erlang-C steady-state wait for five turnstiles, next to an
//!    overloaded configuration.
//!
//! Set `RUST_LOG=debug` (or `trace`) for engine logging.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use log::info;
use serde::Deserialize;

use ts_core::{SimConfig, per_hour_to_per_minute};
use ts_erlang::MmcParams;
use ts_gen::{BoundedUniformArrivals, PoissonArrivals, ServiceDistribution, ServiceTime};
use ts_output::report::{erlang_line, summary_table};
use ts_output::{CsvWriter, SimOutputObserver};
use ts_schedule::{RateSchedule, presets};
use ts_sim::{EngineBuilder, Experiment, NoopObserver, Scenario, ScenarioSummary, summarize};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:                  u64  = 42;
const OUTPUT_DIR:            &str = "output/turnstile";
const OUTPUT_INTERVAL_TICKS: u64  = 30; // snapshot every half hour

// ── Scenario list ─────────────────────────────────────────────────────────────

// Service bounds in seconds, as quoted by the turnstile vendor.
const DAY_SCENARIOS_JSON: &str = r#"[
    { "label": "standard (2-5 s)", "low_secs": 2.0, "high_secs": 5.0, "seed": 42 },
    { "label": "slow (3-8 s)",     "low_secs": 3.0, "high_secs": 8.0, "seed": 42 },
    { "label": "fast (1-3 s)",     "low_secs": 1.0, "high_secs": 3.0, "seed": 42 }
]"#;

#[derive(Deserialize)]
struct ScenarioDef {
    label:     String,
    low_secs:  f64,
    high_secs: f64,
    #[serde(default)]
    seed:      Option<u64>,
}

impl ScenarioDef {
    fn into_scenario(self) -> Result<Scenario> {
        let service = ServiceTime::uniform_secs(self.low_secs, self.high_secs)
            .with_context(|| format!("scenario '{}'", self.label))?;
        Ok(Scenario::new(self.label, service, self.seed))
    }
}

fn print_summaries(title: &str, rows: &[ScenarioSummary]) {
    println!("── {title} ──");
    print!("{}", summary_table(rows));
    println!();
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    println!("=== turnstile — single-server queue simulator ===");
    println!();

    // 1. University day, three scenarios.
    let defs: Vec<ScenarioDef> = serde_json::from_str(DAY_SCENARIOS_JSON)?;
    let scenarios = defs
        .into_iter()
        .map(ScenarioDef::into_scenario)
        .collect::<Result<Vec<_>>>()?;

    let day_config = SimConfig {
        output_interval_ticks: OUTPUT_INTERVAL_TICKS,
        ..SimConfig::new(presets::UNIVERSITY_DAY_TICKS, Some(SEED))
    };
    let day_arrivals = BoundedUniformArrivals::new(presets::university_day());

    let t0 = Instant::now();
    let results = Experiment::new(day_config.clone(), day_arrivals.clone())
        .scenarios(scenarios)
        .run()?;
    info!("{} day scenarios in {:.3} s", results.len(), t0.elapsed().as_secs_f64());
    let day_rows = summarize(&results);
    print_summaries("University day 08:00-16:00", &day_rows);

    // 1b. Re-run the first scenario with full output.
    let first = results.first().context("experiment returned no results")?;
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = SimOutputObserver::new(writer, &day_config);
    obs.write_summaries(&day_rows);
    let mut engine = EngineBuilder::new(
        SimConfig { seed: first.seed, ..day_config.clone() },
        day_arrivals,
        first.scenario.service,
    )
    .build()?;
    engine.run(&mut obs);
    if let Some(e) = obs.take_error() {
        eprintln!("output error: {e}");
    }
    println!("Wrote '{}' series to {OUTPUT_DIR}/", first.scenario.label);
    println!();

    // 2. Morning peak, Poisson arrivals.
    let peak_service = ServiceTime::uniform_secs(2.0, 5.0)?;
    let mut peak = EngineBuilder::new(
        SimConfig::new(presets::MORNING_PEAK_TICKS, Some(SEED)),
        PoissonArrivals::new(presets::morning_peak())?,
        peak_service,
    )
    .build()?;
    peak.run(&mut NoopObserver);
    println!("── Morning peak 08:00-08:30 (Poisson) ──");
    println!("{:<6} {:>6} {:>5}", "time", "queue", "busy");
    for o in peak.observations() {
        println!(
            "{:<6} {:>6} {:>5}",
            peak.clock.label(o.tick),
            o.queue_length,
            if o.server_busy { "yes" } else { "no" },
        );
    }
    let peak_rows = [ScenarioSummary {
        label:   "morning peak".into(),
        service: peak_service,
        summary: peak.into_result().summary(),
    }];
    println!();
    print_summaries("Morning peak summary", &peak_rows);

    // 3. One slow turnstile, exponential service with a 3-minute mean.
    let slow_service = ServiceTime::exponential(1.0 / 3.0)?;
    let mut slow = EngineBuilder::new(
        SimConfig::new(60, Some(SEED)),
        BoundedUniformArrivals::new(RateSchedule::single(0, 60, 0, 5)?),
        slow_service,
    )
    .build()?;
    slow.run(&mut NoopObserver);
    let slow_rows = [ScenarioSummary {
        label:   format!("exp(mean {:.0} min)", slow_service.mean()),
        service: slow_service,
        summary: slow.into_result().summary(),
    }];
    print_summaries("Single turnstile, 60 min, 0-5 arrivals/min", &slow_rows);

    // 4. Analytical comparison.
    println!("── Erlang-C (M/M/c) ──");
    for (lambda, mu, c) in [(4500.0, 1000.0, 5), (6000.0, 1000.0, 5)] {
        let params = MmcParams::new(lambda, mu, c)?;
        println!("{}", erlang_line(&params));
    }

    // Stationary single-server check: Poisson λ against exponential μ.
    let (lambda_h, mu_h) = (15.0, 20.0);
    let mut stationary = EngineBuilder::new(
        SimConfig::new(presets::UNIVERSITY_DAY_TICKS * 20, Some(SEED)),
        PoissonArrivals::stationary(per_hour_to_per_minute(lambda_h))?,
        ServiceTime::exponential(per_hour_to_per_minute(mu_h))?,
    )
    .build()?;
    stationary.run(&mut NoopObserver);
    let simulated = stationary.into_result().summary().mean_wait;
    println!("{}", erlang_line(&MmcParams::new(lambda_h, mu_h, 1)?));
    match simulated {
        Some(w) => println!("  simulated mean wait (1-minute ticks): {w:.2} min"),
        None => println!("  simulated run served nobody"),
    }

    Ok(())
}
