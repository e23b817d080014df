//! Error types for the NeuroScreen engine.
//!
//! Nothing here reaches the report renderer: the public surface of every
//! crate degrades these errors to "no data".

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Insufficient data: need {required} samples, have {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("Series too long: at most {limit} samples allowed, have {available}")]
    SeriesTooLong { limit: usize, available: usize },

    #[error("No positive timestamp intervals to estimate a sampling rate from")]
    NoUsableIntervals,

    #[error("Implausible sampling rate: {rate_hz} Hz outside [{min_hz}, {max_hz}]")]
    ImplausibleSampleRate { rate_hz: f64, min_hz: f64, max_hz: f64 },

    #[error("No frequency bin falls inside [{low_hz}, {high_hz}] Hz at {sample_rate_hz} Hz with {len} samples")]
    EmptyBand {
        low_hz: f64,
        high_hz: f64,
        sample_rate_hz: f64,
        len: usize,
    },

    #[error("No spectral peak inside the search band")]
    NoSpectralPeak,

    #[error("Birth date error: {0}")]
    BirthDate(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
