//! Dominant-frequency estimation for tremor, sway and arm-swing recordings.

use neuroscreen_core::{Error, FrequencyEstimate, Result, SensorSeries};
use serde::{Deserialize, Serialize};

use crate::sampling::SampleRateEstimator;
use crate::spectrum::{apply_hamming, MagnitudeSpectrum, SpectralPeak, Transform};

/// Configuration for the frequency estimator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpectrumConfig {
    /// Below this many samples the periodogram is too noisy to use
    pub min_samples: usize,

    /// Upper bound on N, keeps the O(N²) transform tractable
    pub max_samples: usize,

    /// Plausible sampling-rate range (Hz)
    pub min_rate_hz: f64,
    pub max_rate_hz: f64,

    /// Physiological search band (Hz)
    pub band_low_hz: f64,
    pub band_high_hz: f64,

    pub transform: Transform,
}

impl Default for SpectrumConfig {
    fn default() -> Self {
        Self {
            min_samples: 20,
            max_samples: 4096,
            min_rate_hz: 5.0,
            max_rate_hz: 200.0,
            band_low_hz: 2.0,
            band_high_hz: 12.0,
            transform: Transform::Direct,
        }
    }
}

impl SpectrumConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_samples < 2 || self.max_samples < self.min_samples {
            return Err(Error::Config(format!(
                "sample limits must satisfy 2 <= min ({}) <= max ({})",
                self.min_samples, self.max_samples
            )));
        }
        if !(self.min_rate_hz > 0.0 && self.min_rate_hz <= self.max_rate_hz) {
            return Err(Error::Config(format!(
                "invalid sampling-rate bounds [{}, {}]",
                self.min_rate_hz, self.max_rate_hz
            )));
        }
        if !(self.band_low_hz >= 0.0 && self.band_low_hz <= self.band_high_hz) {
            return Err(Error::Config(format!(
                "invalid search band [{}, {}]",
                self.band_low_hz, self.band_high_hz
            )));
        }
        Ok(())
    }
}

/// Intermediate results of one analysis, kept for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpectralAnalysis {
    /// Samples that survived sanitization (N)
    pub samples_used: usize,

    /// Samples dropped for carrying non-finite values
    pub samples_dropped: usize,

    /// Estimated sampling rate (Hz)
    pub sample_rate_hz: f64,

    pub peak: SpectralPeak,
}

impl SpectralAnalysis {
    /// Peak frequency rounded to two decimals
    pub fn dominant_hz(&self) -> f64 {
        round_hz(self.peak.frequency_hz)
    }
}

/// Estimates the dominant in-band frequency of a sensor series
#[derive(Debug, Clone)]
pub struct FrequencyEstimator {
    config: SpectrumConfig,
    rate: SampleRateEstimator,
}

impl Default for FrequencyEstimator {
    fn default() -> Self {
        Self::new(SpectrumConfig::default())
    }
}

impl FrequencyEstimator {
    pub fn new(config: SpectrumConfig) -> Self {
        let rate = SampleRateEstimator::new().with_bounds(config.min_rate_hz, config.max_rate_hz);
        Self { config, rate }
    }

    pub fn config(&self) -> &SpectrumConfig {
        &self.config
    }

    /// Full analysis, reporting why a series was rejected
    pub fn analyze(&self, series: &SensorSeries) -> Result<SpectralAnalysis> {
        // Samples with NaN/inf would poison every bin of the spectrum
        let clean = series.finite();
        let samples_dropped = series.len() - clean.len();
        let n = clean.len();

        if n < self.config.min_samples {
            return Err(Error::InsufficientData {
                required: self.config.min_samples,
                available: n,
            });
        }
        if n > self.config.max_samples {
            return Err(Error::SeriesTooLong {
                limit: self.config.max_samples,
                available: n,
            });
        }

        let magnitudes = clean.magnitudes();
        let sample_rate_hz = self.rate.estimate(&clean)?;

        let windowed = apply_hamming(&magnitudes);
        let spectrum = MagnitudeSpectrum::compute(&windowed, sample_rate_hz, self.config.transform);
        let peak = spectrum.peak_in_band(self.config.band_low_hz, self.config.band_high_hz)?;

        Ok(SpectralAnalysis {
            samples_used: n,
            samples_dropped,
            sample_rate_hz,
            peak,
        })
    }

    /// Dominant frequency in Hz, rounded to two decimals
    pub fn try_estimate(&self, series: &SensorSeries) -> Result<f64> {
        self.analyze(series).map(|analysis| analysis.dominant_hz())
    }

    /// Dominant frequency, with every failure degraded to "unavailable"
    pub fn estimate(&self, series: &SensorSeries) -> FrequencyEstimate {
        match self.try_estimate(series) {
            Ok(hz) => FrequencyEstimate::new(hz),
            Err(e) => {
                tracing::debug!("Frequency estimate unavailable ({} samples): {}", series.len(), e);
                FrequencyEstimate::unavailable()
            }
        }
    }
}

fn round_hz(hz: f64) -> f64 {
    (hz * 100.0).round() / 100.0
}
