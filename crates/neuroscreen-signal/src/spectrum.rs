//! Windowed magnitude spectrum and band-limited peak search.
//!
//! The reference transform is a direct DFT:
//!
//! re[k] = Σ w[n]·cos(2πkn/N),  im[k] = −Σ w[n]·sin(2πkn/N)
//!
//! evaluated for every bin k in 0..N. Series lengths stay in the low
//! thousands, so the O(N²) cost is acceptable. [`Transform::Fast`] computes
//! the same magnitudes with `rustfft` for callers that want the speed.

use neuroscreen_core::{Error, Result};
use num_complex::Complex;
use rustfft::FftPlanner;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Which algorithm produces the magnitude spectrum
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transform {
    /// Direct O(N²) evaluation
    #[default]
    Direct,
    /// Mixed-radix FFT via `rustfft`
    Fast,
}

impl Transform {
    pub fn magnitudes(&self, signal: &[f64]) -> Vec<f64> {
        match self {
            Transform::Direct => direct_magnitudes(signal),
            Transform::Fast => fast_magnitudes(signal),
        }
    }
}

/// Hamming window coefficients: 0.54 - 0.46·cos(2πi/(N-1))
pub fn hamming_window(size: usize) -> Vec<f64> {
    if size <= 1 {
        return vec![1.0; size];
    }

    (0..size)
        .map(|i| 0.54 - 0.46 * (2.0 * PI * i as f64 / (size - 1) as f64).cos())
        .collect()
}

/// Multiply a signal by a Hamming window of its own length
pub fn apply_hamming(signal: &[f64]) -> Vec<f64> {
    signal
        .iter()
        .zip(hamming_window(signal.len()))
        .map(|(s, w)| s * w)
        .collect()
}

/// Direct DFT magnitude for every bin in 0..N
pub fn direct_magnitudes(signal: &[f64]) -> Vec<f64> {
    let n = signal.len();
    if n == 0 {
        return Vec::new();
    }

    // cos/sin of 2πj/N; the phase index k·n is reduced mod N to keep the
    // argument small and the table exact.
    let cos_table: Vec<f64> = (0..n).map(|j| (2.0 * PI * j as f64 / n as f64).cos()).collect();
    let sin_table: Vec<f64> = (0..n).map(|j| (2.0 * PI * j as f64 / n as f64).sin()).collect();

    (0..n)
        .map(|k| {
            let mut re = 0.0;
            let mut im = 0.0;
            for (t, &w) in signal.iter().enumerate() {
                let j = (k * t) % n;
                re += w * cos_table[j];
                im -= w * sin_table[j];
            }
            (re * re + im * im).sqrt()
        })
        .collect()
}

/// FFT magnitude for every bin in 0..N
pub fn fast_magnitudes(signal: &[f64]) -> Vec<f64> {
    if signal.is_empty() {
        return Vec::new();
    }

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(signal.len());

    let mut buffer: Vec<Complex<f64>> = signal.iter().map(|&s| Complex::new(s, 0.0)).collect();
    fft.process(&mut buffer);

    buffer.iter().map(|c| c.norm()).collect()
}

/// Strongest in-band bin of a spectrum
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpectralPeak {
    /// Bin index k
    pub bin: usize,

    /// k·fs/N (Hz)
    pub frequency_hz: f64,

    /// |X[k]|
    pub magnitude: f64,
}

/// Magnitude spectrum of a windowed series
#[derive(Debug, Clone)]
pub struct MagnitudeSpectrum {
    /// Sampling rate the series was captured at (Hz)
    pub sample_rate_hz: f64,

    /// |X[k]| for k in 0..N
    pub magnitudes: Vec<f64>,
}

impl MagnitudeSpectrum {
    pub fn compute(windowed: &[f64], sample_rate_hz: f64, transform: Transform) -> Self {
        Self {
            sample_rate_hz,
            magnitudes: transform.magnitudes(windowed),
        }
    }

    pub fn len(&self) -> usize {
        self.magnitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.magnitudes.is_empty()
    }

    /// Frequency resolution fs/N (Hz per bin)
    pub fn resolution_hz(&self) -> f64 {
        self.sample_rate_hz / self.len() as f64
    }

    pub fn bin_frequency(&self, bin: usize) -> f64 {
        bin as f64 * self.resolution_hz()
    }

    /// Strongest bin with frequency in `[low_hz, high_hz]`.
    ///
    /// Only bins 1..N/2-1 are searched: DC and the mirrored upper half are
    /// excluded. The first bin reaching the maximum wins.
    pub fn peak_in_band(&self, low_hz: f64, high_hz: f64) -> Result<SpectralPeak> {
        let mut visited = false;
        let mut best: Option<SpectralPeak> = None;
        let mut best_magnitude = 0.0;

        for bin in 1..self.len() / 2 {
            let frequency_hz = self.bin_frequency(bin);
            if frequency_hz < low_hz || frequency_hz > high_hz {
                continue;
            }
            visited = true;

            let magnitude = self.magnitudes[bin];
            if magnitude > best_magnitude {
                best_magnitude = magnitude;
                best = Some(SpectralPeak {
                    bin,
                    frequency_hz,
                    magnitude,
                });
            }
        }

        if !visited {
            return Err(Error::EmptyBand {
                low_hz,
                high_hz,
                sample_rate_hz: self.sample_rate_hz,
                len: self.len(),
            });
        }

        best.ok_or(Error::NoSpectralPeak)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tone(freq_hz: f64, sample_rate_hz: f64, n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| (2.0 * PI * freq_hz * i as f64 / sample_rate_hz).sin())
            .collect()
    }

    #[test]
    fn test_hamming_window() {
        let window = hamming_window(11);

        // Endpoints sit at 0.08, the centre at 1.0
        assert!((window[0] - 0.08).abs() < 1e-12);
        assert!((window[10] - 0.08).abs() < 1e-12);
        assert!((window[5] - 1.0).abs() < 1e-12);

        assert_eq!(hamming_window(1), vec![1.0]);
        assert!(hamming_window(0).is_empty());
    }

    #[test]
    fn test_direct_dft_of_constant() {
        let mags = direct_magnitudes(&[1.0; 16]);
        assert!((mags[0] - 16.0).abs() < 1e-9);
        for m in &mags[1..] {
            assert!(m.abs() < 1e-9);
        }
    }

    #[test]
    fn test_direct_dft_pure_tone_bin() {
        // 8 cycles in 64 samples lands exactly on bin 8 (and its mirror 56)
        let signal = tone(8.0, 64.0, 64);
        let mags = direct_magnitudes(&signal);
        assert!((mags[8] - 32.0).abs() < 1e-9);
        assert!((mags[56] - 32.0).abs() < 1e-9);
        assert!(mags[7] < 1e-9);
    }

    #[test]
    fn test_peak_in_band_ignores_out_of_band_maximum() {
        let mut magnitudes = vec![0.0; 20];
        magnitudes[1] = 100.0; // 1 Hz, below band
        magnitudes[3] = 5.0;
        magnitudes[6] = 7.0;
        let spectrum = MagnitudeSpectrum {
            sample_rate_hz: 20.0,
            magnitudes,
        };

        let peak = spectrum.peak_in_band(2.0, 12.0).unwrap();
        assert_eq!(peak.bin, 6);
        assert_eq!(peak.frequency_hz, 6.0);
    }

    #[test]
    fn test_peak_first_maximum_wins() {
        let mut magnitudes = vec![0.0; 20];
        magnitudes[4] = 3.0;
        magnitudes[7] = 3.0;
        let spectrum = MagnitudeSpectrum {
            sample_rate_hz: 20.0,
            magnitudes,
        };

        assert_eq!(spectrum.peak_in_band(2.0, 12.0).unwrap().bin, 4);
    }

    #[test]
    fn test_peak_zero_spectrum() {
        let spectrum = MagnitudeSpectrum {
            sample_rate_hz: 20.0,
            magnitudes: vec![0.0; 20],
        };
        assert_eq!(spectrum.peak_in_band(2.0, 12.0), Err(Error::NoSpectralPeak));
    }

    #[test]
    fn test_peak_nan_bins_never_win() {
        let mut magnitudes = vec![f64::NAN; 20];
        magnitudes[5] = 1.0;
        let spectrum = MagnitudeSpectrum {
            sample_rate_hz: 20.0,
            magnitudes,
        };
        assert_eq!(spectrum.peak_in_band(2.0, 12.0).unwrap().bin, 5);
    }

    #[test]
    fn test_peak_empty_band() {
        // Highest searched bin is 9 · 5.5 / 20 = 2.475 Hz
        let spectrum = MagnitudeSpectrum {
            sample_rate_hz: 5.5,
            magnitudes: vec![1.0; 20],
        };
        let err = spectrum.peak_in_band(2.5, 12.0).unwrap_err();
        assert!(matches!(err, Error::EmptyBand { len: 20, .. }));
    }

    #[test]
    fn test_fast_matches_direct_on_tone() {
        let signal = apply_hamming(&tone(5.0, 50.0, 200));
        let direct = direct_magnitudes(&signal);
        let fast = fast_magnitudes(&signal);
        for (d, f) in direct.iter().zip(&fast) {
            assert!((d - f).abs() < 1e-8, "direct {} vs fast {}", d, f);
        }
    }

    proptest! {
        #[test]
        fn prop_fast_transform_matches_direct(
            signal in prop::collection::vec(-100.0f64..100.0, 20..160)
        ) {
            let direct = Transform::Direct.magnitudes(&signal);
            let fast = Transform::Fast.magnitudes(&signal);

            prop_assert_eq!(direct.len(), fast.len());

            let scale = 1.0 + direct.iter().cloned().fold(0.0, f64::max);
            for (d, f) in direct.iter().zip(&fast) {
                prop_assert!((d - f).abs() <= 1e-9 * scale, "direct {} vs fast {}", d, f);
            }
        }
    }
}
