// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

mod config;
mod scenario;

use config::{ScenarioConfig, ScenarioConfigBuilder};
use horizon_core::time::Duration;
use scenario::{ScenarioGenerator, ScenarioOutcome, evaluate};
use serde::Serialize;
use std::{error::Error, fs::File, io::BufWriter, time::Instant};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::CLOSE)
        .init();
}

#[derive(Debug, Clone, Serialize)]
struct ScenarioInfo {
    idx: usize,
    seed: u64,
    horizon_secs: f64,
    instrument_windows: usize,
    battery_segments: usize,
    threshold: f64,
    capacity: f64,
}

#[derive(Debug, Clone, Serialize)]
struct RunResult {
    scenario: ScenarioInfo,
    outcome: ScenarioOutcome,
    generate_elapsed_us: u128,
    evaluate_elapsed_us: u128,
}

#[derive(Debug, Clone, Serialize)]
struct Report {
    description: String,
    scenarios: Vec<RunResult>,
}

fn interpolate_u(val0: usize, val1: usize, step: usize, steps: usize) -> usize {
    if steps <= 1 {
        return val1;
    }
    let num = (val1 as isize - val0 as isize) * step as isize;
    (val0 as isize + num / (steps as isize - 1)).max(0) as usize
}

fn main() -> Result<(), Box<dyn Error>> {
    enable_tracing();

    let defaults = ScenarioConfig::default();
    let n_scenarios = 10usize;

    let min_windows = 10usize;
    let max_windows = 400usize;
    let min_segments = 24usize;
    let max_segments = 2_000usize;

    let mut results: Vec<RunResult> = Vec::with_capacity(n_scenarios);

    for i in 0..n_scenarios {
        let windows = interpolate_u(min_windows, max_windows, i, n_scenarios);
        let segments = interpolate_u(min_segments, max_segments, i, n_scenarios);
        let horizon = Duration::DAY * (1 + i as i64);
        let seed: u64 = 42 + (i as u64);

        let cfg = ScenarioConfigBuilder::new()
            .horizon(horizon)
            .instrument_windows(windows)
            .battery_segments(segments)
            .window_shape(
                defaults.mean_window(),
                defaults.window_sigma(),
                defaults.min_window(),
            )
            .mean_gap(defaults.mean_gap())
            .battery(defaults.capacity(), defaults.threshold())
            .rates(defaults.max_drain_rate(), defaults.max_charge_rate())
            .dropout_probability(defaults.dropout_probability())
            .seed(seed)
            .build()?;
        debug!(config = %cfg, "scenario configured");

        let t0 = Instant::now();
        let scenario = ScenarioGenerator::new(cfg.clone())?.generate()?;
        let generate_elapsed = t0.elapsed();

        let t1 = Instant::now();
        let outcome = evaluate(&scenario, &cfg)?;
        let evaluate_elapsed = t1.elapsed();

        info!(
            idx = i,
            seed,
            violations = outcome.low_while_on,
            violation_secs = outcome.low_while_on_secs,
            elapsed_us = evaluate_elapsed.as_micros() as u64,
            "scenario evaluated"
        );

        results.push(RunResult {
            scenario: ScenarioInfo {
                idx: i,
                seed,
                horizon_secs: horizon.as_secs_f64(),
                instrument_windows: cfg.instrument_windows(),
                battery_segments: cfg.battery_segments(),
                threshold: cfg.threshold(),
                capacity: cfg.capacity(),
            },
            outcome,
            generate_elapsed_us: generate_elapsed.as_micros(),
            evaluate_elapsed_us: evaluate_elapsed.as_micros(),
        });
    }

    let report = Report {
        description: "Low battery while instrument on: 10 seeded scenarios from small to big."
            .into(),
        scenarios: results,
    };

    let file = File::create("horizon_report.json")?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &report)?;

    println!();
    println!("Wrote: horizon_report.json");
    Ok(())
}
