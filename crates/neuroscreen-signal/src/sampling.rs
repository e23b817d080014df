//! Effective sampling-rate estimation from irregular timestamps.

use neuroscreen_core::{Error, Result, SensorSeries};

/// Estimates fs as the reciprocal of the mean positive timestamp delta
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleRateEstimator {
    /// Lowest plausible rate (Hz), degraded logging
    pub min_rate_hz: f64,

    /// Highest plausible rate (Hz), high-frequency capture
    pub max_rate_hz: f64,
}

impl Default for SampleRateEstimator {
    fn default() -> Self {
        Self {
            min_rate_hz: 5.0,
            max_rate_hz: 200.0,
        }
    }
}

impl SampleRateEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bounds(mut self, min_rate_hz: f64, max_rate_hz: f64) -> Self {
        self.min_rate_hz = min_rate_hz;
        self.max_rate_hz = max_rate_hz;
        self
    }

    pub fn estimate(&self, series: &SensorSeries) -> Result<f64> {
        self.estimate_from_timestamps(&series.timestamps())
    }

    /// Zero, negative and non-finite deltas are skipped rather than treated
    /// as fatal; out-of-order samples are common on some devices.
    pub fn estimate_from_timestamps(&self, timestamps: &[f64]) -> Result<f64> {
        let mean_delta = Self::mean_interval(timestamps).ok_or(Error::NoUsableIntervals)?;
        let rate_hz = 1.0 / mean_delta;

        if !rate_hz.is_finite() || rate_hz < self.min_rate_hz || rate_hz > self.max_rate_hz {
            return Err(Error::ImplausibleSampleRate {
                rate_hz,
                min_hz: self.min_rate_hz,
                max_hz: self.max_rate_hz,
            });
        }

        Ok(rate_hz)
    }

    /// Mean of the positive consecutive deltas, if there are any
    pub fn mean_interval(timestamps: &[f64]) -> Option<f64> {
        let (sum, count) = timestamps
            .windows(2)
            .map(|w| w[1] - w[0])
            .filter(|d| d.is_finite() && *d > 0.0)
            .fold((0.0, 0usize), |(sum, count), d| (sum + d, count + 1));

        (count > 0).then(|| sum / count as f64)
    }
}
