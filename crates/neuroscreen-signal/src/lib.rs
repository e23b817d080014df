//! # NeuroScreen-Signal
//!
//! Turns raw inertial recordings from the mobile assessment app into a
//! dominant oscillation frequency.
//!
//! ## Pipeline Stages
//!
//! 1. **Extraction**: Pull the gyroscope triple out of `recording.recordedData`
//! 2. **Sanitization**: Drop samples carrying non-finite values
//! 3. **Sampling rate**: Estimate fs from the mean positive timestamp delta
//!    and reject anything outside 5-200 Hz
//! 4. **Spectrum**: Hamming-window the magnitude signal and take its
//!    magnitude spectrum (direct DFT, or FFT as an equivalent substitute)
//! 5. **Peak**: Report the strongest bin inside the 2-12 Hz tremor band
//!
//! Every stage is a pure function of its input, so independent tests can be
//! analysed concurrently.

pub mod estimator;
pub mod extractor;
pub mod sampling;
pub mod spectrum;

pub use estimator::*;
pub use extractor::*;
pub use sampling::*;
pub use spectrum::*;
