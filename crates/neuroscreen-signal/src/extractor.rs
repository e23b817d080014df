//! Sensor series extraction from recorded-test payloads.
//!
//! The assessment app stores each motor test as
//!
//! ```json
//! { "recording": { "recordedData": [ { "ts": 1713139200.02, "data": [ax, ay, az, gx, gy, gz] }, ... ] } }
//! ```
//!
//! with `ts` in seconds. Rows are logged at whatever cadence the device
//! manages, so malformed rows are expected and skipped rather than reported.

use neuroscreen_core::{coerce_number, SensorSample, SensorSeries};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Minimum `data` width for a row to be usable (two 3-axis sensors)
pub const MIN_ROW_WIDTH: usize = 6;

/// Which 3-axis triple of a row to read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorChannel {
    /// Indices 0, 1, 2
    Accelerometer,
    /// Indices 3, 4, 5
    #[default]
    Gyroscope,
}

impl SensorChannel {
    /// Index of the x axis within a row's `data` array
    pub fn offset(&self) -> usize {
        match self {
            SensorChannel::Accelerometer => 0,
            SensorChannel::Gyroscope => 3,
        }
    }
}

/// Extracts a [`SensorSeries`] from one test payload
#[derive(Debug, Clone, Copy, Default)]
pub struct SeriesExtractor {
    pub channel: SensorChannel,
}

impl SeriesExtractor {
    pub fn new(channel: SensorChannel) -> Self {
        Self { channel }
    }

    /// Returns `None` when the payload has no recorded rows at all.
    ///
    /// Values that fail numeric coercion are kept as `NaN`; the frequency
    /// estimator drops such samples before computing anything.
    pub fn extract(&self, payload: &Value) -> Option<SensorSeries> {
        self.extract_object(payload.as_object()?)
    }

    /// Same as [`extract`](Self::extract) for an already-unwrapped payload
    pub fn extract_object(&self, payload: &Map<String, Value>) -> Option<SensorSeries> {
        let rows = payload.get("recording")?.get("recordedData")?.as_array()?;

        let series: SensorSeries = rows.iter().filter_map(|row| self.parse_row(row)).collect();

        let dropped = rows.len() - series.len();
        if dropped > 0 {
            tracing::trace!(
                "Dropped {} of {} malformed sensor rows",
                dropped,
                rows.len()
            );
        }

        Some(series)
    }

    fn parse_row(&self, row: &Value) -> Option<SensorSample> {
        let data = row.get("data")?.as_array()?;
        if data.len() < MIN_ROW_WIDTH {
            return None;
        }

        let timestamp = row.get("ts").map(coerce_number).unwrap_or(f64::NAN);
        let i = self.channel.offset();

        Some(SensorSample::new(
            timestamp,
            coerce_number(&data[i]),
            coerce_number(&data[i + 1]),
            coerce_number(&data[i + 2]),
        ))
    }
}

/// Extract the gyroscope series from a payload
pub fn extract_series(payload: &Value) -> Option<SensorSeries> {
    SeriesExtractor::default().extract(payload)
}
