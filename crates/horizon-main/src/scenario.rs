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

//! Seeded synthetic scenarios and the constraint checks run on them.

use crate::config::ScenarioConfig;
use horizon_core::{interval::Interval, time::Duration};
use horizon_profile::{
    err::{BuilderConsumedError, ProfileError},
    ingest::{ProfileSegment, Real, from_real_profile},
    interval_map::IntervalMap,
    linear::{LinearEquation, LinearProfileOps, RealDynamics, clamp},
    profile::{Profile, ProfileExt, constant},
    windows::WindowsOps,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Exp, ExpError, Normal, NormalError};
use serde::Serialize;
use std::fmt::Display;
use tracing::{debug, instrument};

#[derive(Debug)]
pub enum ScenarioError {
    WindowDistribution(NormalError),
    GapDistribution(ExpError),
    Profile(ProfileError),
}

impl Display for ScenarioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScenarioError::WindowDistribution(e) => write!(f, "Invalid window distribution: {e}"),
            ScenarioError::GapDistribution(e) => write!(f, "Invalid gap distribution: {e}"),
            ScenarioError::Profile(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ScenarioError {}

impl From<ProfileError> for ScenarioError {
    fn from(err: ProfileError) -> Self {
        Self::Profile(err)
    }
}

impl From<BuilderConsumedError> for ScenarioError {
    fn from(err: BuilderConsumedError) -> Self {
        Self::Profile(err.into())
    }
}

/// An instrument schedule and a battery charge profile over one horizon.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub instrument: IntervalMap<bool>,
    pub battery: Real,
}

pub struct ScenarioGenerator {
    config: ScenarioConfig,
    rng: ChaCha8Rng,
    window: Normal<f64>,
    gap: Exp<f64>,
}

impl TryFrom<ScenarioConfig> for ScenarioGenerator {
    type Error = ScenarioError;

    fn try_from(config: ScenarioConfig) -> Result<Self, Self::Error> {
        Self::new(config)
    }
}

impl ScenarioGenerator {
    pub fn new(config: ScenarioConfig) -> Result<Self, ScenarioError> {
        let window = Normal::new(
            config.mean_window().as_secs_f64(),
            config.window_sigma().as_secs_f64(),
        )
        .map_err(ScenarioError::WindowDistribution)?;
        let gap = Exp::new(1.0 / config.mean_gap().as_secs_f64())
            .map_err(ScenarioError::GapDistribution)?;
        Ok(Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed()),
            config,
            window,
            gap,
        })
    }

    #[inline]
    fn sample_window(&mut self) -> Duration {
        Duration::from_secs_f64(self.window.sample(&mut self.rng)).max(self.config.min_window())
    }

    #[inline]
    fn sample_gap(&mut self) -> Duration {
        Duration::from_secs_f64(self.gap.sample(&mut self.rng))
    }

    /// Alternating off/on periods from time zero to the horizon. Fewer
    /// windows than configured are produced when the horizon runs out.
    fn instrument(&mut self) -> Result<IntervalMap<bool>, ScenarioError> {
        let horizon = self.config.horizon();
        let mut builder = IntervalMap::builder();
        let mut t = Duration::ZERO;
        for _ in 0..self.config.instrument_windows() {
            let start = t.saturating_add(self.sample_gap());
            if start >= horizon {
                break;
            }
            let end = start.saturating_add(self.sample_window()).min(horizon);
            builder
                .set(Interval::closed_open(t, start), false)?
                .set(Interval::closed_open(start, end), true)?;
            t = end;
        }
        builder.set(Interval::closed_open(t, horizon), false)?;
        Ok(builder.build()?)
    }

    /// Equal-length battery segments with random drain or charge rates.
    /// Each segment starts at the level the previous one ended at, kept
    /// within capacity; dropped segments are telemetry gaps.
    fn battery(&mut self) -> Real {
        let n = self.config.battery_segments();
        let extent = self.config.horizon() / n as i64;
        let capacity = self.config.capacity();
        let drain = self.config.max_drain_rate();
        let charge = self.config.max_charge_rate();

        let mut level = self.rng.random_range(0.5..=1.0) * capacity;
        let mut segments = Vec::with_capacity(n);
        for _ in 0..n {
            let rate = self.rng.random_range(-drain..=charge);
            let dropped = self.rng.random_bool(self.config.dropout_probability());
            let dynamics = (!dropped).then(|| RealDynamics::new(level, rate));
            segments.push(ProfileSegment::new(extent, dynamics));
            level = (level + rate * extent.as_secs_f64()).clamp(0.0, capacity);
        }
        from_real_profile(Duration::ZERO, segments)
    }

    #[instrument(level = "debug", skip_all, fields(seed = self.config.seed()))]
    pub fn generate(&mut self) -> Result<Scenario, ScenarioError> {
        let instrument = self.instrument()?;
        let battery = self.battery();
        debug!(
            instrument_segments = instrument.len(),
            battery_end = %battery.end(),
            "generated scenario"
        );
        Ok(Scenario {
            instrument,
            battery,
        })
    }
}

/// Figures gathered from one scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioOutcome {
    pub instrument_segments: usize,
    pub instrument_on_secs: f64,
    pub rising_edges: usize,
    pub battery_segments: usize,
    pub low_while_on: usize,
    pub low_while_on_secs: f64,
    pub long_low_while_on: usize,
    pub first_violation_secs: Option<f64>,
    pub clamped_segments: usize,
}

/// Checks "battery below threshold while the instrument is on" and a few
/// related figures over `[0, horizon)`.
#[instrument(level = "debug", skip_all)]
pub fn evaluate(
    scenario: &Scenario,
    config: &ScenarioConfig,
) -> Result<ScenarioOutcome, ScenarioError> {
    let bounds = Interval::closed_open(Duration::ZERO, config.horizon());
    let instrument = &scenario.instrument;
    let battery = &scenario.battery;

    let threshold = constant(LinearEquation::constant(config.threshold()));
    let violations = battery
        .less_than(&threshold)
        .and(instrument)
        .evaluate(bounds);

    let low_while_on_secs = violations
        .accumulated_duration(Duration::SECOND)
        .last()
        .map(|s| s.value().value_at(s.interval().end()))
        .unwrap_or(0.0);
    let long_low_while_on = violations
        .filter_by_duration(config.min_window(), Duration::MAX)
        .map_err(ProfileError::from)?
        .iter_equal_to(&true)
        .count();

    let rising_edges = instrument
        .specific_edges(false, true)
        .evaluate(bounds)
        .iter_equal_to(&true)
        .count();

    let clamped = clamp(
        battery,
        &constant(LinearEquation::constant(0.0)),
        &constant(LinearEquation::constant(config.capacity())),
        bounds,
    )?;

    Ok(ScenarioOutcome {
        instrument_segments: instrument.len(),
        instrument_on_secs: instrument
            .iter_equal_to(&true)
            .map(|i| i.duration().as_secs_f64())
            .sum(),
        rising_edges,
        battery_segments: battery.evaluate(bounds).len(),
        low_while_on: violations.iter_equal_to(&true).count(),
        low_while_on_secs,
        long_low_while_on,
        first_violation_secs: violations
            .min_true_time_point()
            .map(|(t, _)| t.as_secs_f64()),
        clamped_segments: clamped.len(),
    })
}
