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

use horizon_core::time::Duration;
use std::fmt::Display;

/// Parameters of one synthetic scenario: an instrument switching on and off
/// and a battery draining and charging over the same horizon.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
    pub(crate) horizon: Duration,
    pub(crate) instrument_windows: usize,
    pub(crate) battery_segments: usize,

    pub(crate) mean_window: Duration,
    pub(crate) window_sigma: Duration,
    pub(crate) min_window: Duration,
    pub(crate) mean_gap: Duration,

    pub(crate) capacity: f64,
    pub(crate) threshold: f64,
    pub(crate) max_drain_rate: f64,
    pub(crate) max_charge_rate: f64,
    pub(crate) dropout_probability: f64,

    pub(crate) seed: u64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            horizon: Duration::HOUR * 24,
            instrument_windows: 40,
            battery_segments: 96,

            mean_window: Duration::MINUTE * 20,
            window_sigma: Duration::MINUTE * 8,
            min_window: Duration::MINUTE,
            mean_gap: Duration::MINUTE * 15,

            capacity: 100.0,
            threshold: 30.0,
            max_drain_rate: 0.02,
            max_charge_rate: 0.015,
            dropout_probability: 0.05,

            seed: 42,
        }
    }
}

impl ScenarioConfig {
    #[inline]
    pub fn horizon(&self) -> Duration {
        self.horizon
    }
    #[inline]
    pub fn instrument_windows(&self) -> usize {
        self.instrument_windows
    }
    #[inline]
    pub fn battery_segments(&self) -> usize {
        self.battery_segments
    }
    #[inline]
    pub fn mean_window(&self) -> Duration {
        self.mean_window
    }
    #[inline]
    pub fn window_sigma(&self) -> Duration {
        self.window_sigma
    }
    #[inline]
    pub fn min_window(&self) -> Duration {
        self.min_window
    }
    #[inline]
    pub fn mean_gap(&self) -> Duration {
        self.mean_gap
    }
    #[inline]
    pub fn capacity(&self) -> f64 {
        self.capacity
    }
    #[inline]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }
    #[inline]
    pub fn max_drain_rate(&self) -> f64 {
        self.max_drain_rate
    }
    #[inline]
    pub fn max_charge_rate(&self) -> f64 {
        self.max_charge_rate
    }
    #[inline]
    pub fn dropout_probability(&self) -> f64 {
        self.dropout_probability
    }
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Display for ScenarioConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ScenarioConfig {{ horizon: {}, instrument_windows: {}, battery_segments: {}, \
             mean_window: {}, window_sigma: {}, min_window: {}, mean_gap: {}, \
             capacity: {:.2}, threshold: {:.2}, max_drain_rate: {:.4}, \
             max_charge_rate: {:.4}, dropout_probability: {:.3}, seed: {} }}",
            self.horizon,
            self.instrument_windows,
            self.battery_segments,
            self.mean_window,
            self.window_sigma,
            self.min_window,
            self.mean_gap,
            self.capacity,
            self.threshold,
            self.max_drain_rate,
            self.max_charge_rate,
            self.dropout_probability,
            self.seed,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScenarioConfigBuildError {
    MissingHorizon,
    MissingInstrumentWindows,
    MissingBatterySegments,
    NonPositiveHorizon(Duration),
    NonPositiveWindow(Duration),
    ThresholdOutsideCapacity { threshold: f64, capacity: f64 },
    InvalidProbability(f64),
}

impl Display for ScenarioConfigBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use ScenarioConfigBuildError::*;
        match self {
            MissingHorizon => write!(f, "Missing horizon"),
            MissingInstrumentWindows => write!(f, "Missing instrument_windows"),
            MissingBatterySegments => write!(f, "Missing battery_segments"),
            NonPositiveHorizon(h) => write!(f, "Horizon must be positive, got {}", h),
            NonPositiveWindow(w) => write!(f, "Window lengths must be positive, got {}", w),
            ThresholdOutsideCapacity {
                threshold,
                capacity,
            } => write!(
                f,
                "Threshold {:.2} lies outside the battery capacity [0, {:.2}]",
                threshold, capacity
            ),
            InvalidProbability(p) => write!(f, "Dropout probability {} is not in [0, 1]", p),
        }
    }
}

impl std::error::Error for ScenarioConfigBuildError {}

/// Consuming builder for [`ScenarioConfig`].
#[derive(Debug, Clone)]
pub struct ScenarioConfigBuilder {
    // Required
    horizon: Option<Duration>,
    instrument_windows: Option<usize>,
    battery_segments: Option<usize>,

    // Optional with defaults
    mean_window: Duration,
    window_sigma: Duration,
    min_window: Duration,
    mean_gap: Duration,
    capacity: f64,
    threshold: f64,
    max_drain_rate: f64,
    max_charge_rate: f64,
    dropout_probability: f64,
    seed: u64,
}

impl Default for ScenarioConfigBuilder {
    fn default() -> Self {
        let defaults = ScenarioConfig::default();
        Self {
            horizon: None,
            instrument_windows: None,
            battery_segments: None,

            mean_window: defaults.mean_window,
            window_sigma: defaults.window_sigma,
            min_window: defaults.min_window,
            mean_gap: defaults.mean_gap,
            capacity: defaults.capacity,
            threshold: defaults.threshold,
            max_drain_rate: defaults.max_drain_rate,
            max_charge_rate: defaults.max_charge_rate,
            dropout_probability: defaults.dropout_probability,
            seed: defaults.seed,
        }
    }
}

impl ScenarioConfigBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn horizon(mut self, v: Duration) -> Self {
        self.horizon = Some(v);
        self
    }
    #[inline]
    pub fn instrument_windows(mut self, v: usize) -> Self {
        self.instrument_windows = Some(v);
        self
    }
    #[inline]
    pub fn battery_segments(mut self, v: usize) -> Self {
        self.battery_segments = Some(v);
        self
    }

    pub fn window_shape(mut self, mean: Duration, sigma: Duration, min: Duration) -> Self {
        self.mean_window = mean;
        self.window_sigma = sigma;
        self.min_window = min;
        self
    }
    #[inline]
    pub fn mean_gap(mut self, v: Duration) -> Self {
        self.mean_gap = v;
        self
    }

    /// Battery capacity and the low-charge threshold, in the same unit.
    pub fn battery(mut self, capacity: f64, threshold: f64) -> Self {
        self.capacity = capacity;
        self.threshold = threshold;
        self
    }
    /// Largest drain and charge rates, in units per second.
    pub fn rates(mut self, max_drain: f64, max_charge: f64) -> Self {
        self.max_drain_rate = max_drain.abs();
        self.max_charge_rate = max_charge.abs();
        self
    }
    #[inline]
    pub fn dropout_probability(mut self, v: f64) -> Self {
        self.dropout_probability = v;
        self
    }
    #[inline]
    pub fn seed(mut self, v: u64) -> Self {
        self.seed = v;
        self
    }

    pub fn build(self) -> Result<ScenarioConfig, ScenarioConfigBuildError> {
        let horizon = self
            .horizon
            .ok_or(ScenarioConfigBuildError::MissingHorizon)?;
        let instrument_windows = self
            .instrument_windows
            .ok_or(ScenarioConfigBuildError::MissingInstrumentWindows)?;
        let battery_segments = self
            .battery_segments
            .ok_or(ScenarioConfigBuildError::MissingBatterySegments)?;

        if !horizon.is_positive() {
            return Err(ScenarioConfigBuildError::NonPositiveHorizon(horizon));
        }
        for w in [self.mean_window, self.min_window, self.mean_gap] {
            if !w.is_positive() {
                return Err(ScenarioConfigBuildError::NonPositiveWindow(w));
            }
        }
        if !(0.0..=self.capacity).contains(&self.threshold) {
            return Err(ScenarioConfigBuildError::ThresholdOutsideCapacity {
                threshold: self.threshold,
                capacity: self.capacity,
            });
        }
        if !(0.0..=1.0).contains(&self.dropout_probability) {
            return Err(ScenarioConfigBuildError::InvalidProbability(
                self.dropout_probability,
            ));
        }

        Ok(ScenarioConfig {
            horizon,
            instrument_windows,
            battery_segments: battery_segments.max(1),
            mean_window: self.mean_window,
            window_sigma: self.window_sigma.abs(),
            min_window: self.min_window,
            mean_gap: self.mean_gap,
            capacity: self.capacity,
            threshold: self.threshold,
            max_drain_rate: self.max_drain_rate,
            max_charge_rate: self.max_charge_rate,
            dropout_probability: self.dropout_probability,
            seed: self.seed,
        })
    }
}
