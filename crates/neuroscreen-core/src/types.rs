//! Fundamental types for the NeuroScreen engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single 3-axis inertial reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorSample {
    /// Capture time in seconds (Unix-style, not milliseconds)
    pub timestamp: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl SensorSample {
    pub fn new(timestamp: f64, x: f64, y: f64, z: f64) -> Self {
        Self { timestamp, x, y, z }
    }

    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// True when the timestamp and all three axes are finite numbers
    pub fn is_finite(&self) -> bool {
        self.timestamp.is_finite() && self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Time-ordered sequence of samples pulled out of one recorded test.
///
/// Ordering follows the source payload; timestamps are not guaranteed to be
/// non-decreasing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorSeries {
    pub samples: Vec<SensorSample>,
}

impl SensorSeries {
    pub fn new(samples: Vec<SensorSample>) -> Self {
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn timestamps(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.timestamp).collect()
    }

    pub fn magnitudes(&self) -> Vec<f64> {
        self.samples.iter().map(SensorSample::magnitude).collect()
    }

    /// Copy of the series without samples carrying non-finite values
    pub fn finite(&self) -> SensorSeries {
        Self::new(self.samples.iter().copied().filter(SensorSample::is_finite).collect())
    }
}

impl FromIterator<SensorSample> for SensorSeries {
    fn from_iter<I: IntoIterator<Item = SensorSample>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Dominant-frequency result for one test.
///
/// `hz == None` means the data was insufficient or invalid. It is never
/// represented as `0.0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FrequencyEstimate {
    pub hz: Option<f64>,
}

impl FrequencyEstimate {
    pub fn new(hz: f64) -> Self {
        Self { hz: Some(hz) }
    }

    pub fn unavailable() -> Self {
        Self { hz: None }
    }

    pub fn is_available(&self) -> bool {
        self.hz.is_some()
    }
}

impl From<Option<f64>> for FrequencyEstimate {
    fn from(hz: Option<f64>) -> Self {
        Self { hz }
    }
}

/// The fixed allow-list of assessment tests a record may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestKind {
    TremorResting,
    TremorPostural,
    Balance,
    Gait,
    TappingLeft,
    TappingRight,
    Questionnaire,
    RiskFactors,
    Voice,
    Cognitive,
    Smell,
    Diagnosis,
    Notes,
}

impl TestKind {
    pub const COUNT: usize = 13;

    pub const ALL: [TestKind; Self::COUNT] = [
        TestKind::TremorResting,
        TestKind::TremorPostural,
        TestKind::Balance,
        TestKind::Gait,
        TestKind::TappingLeft,
        TestKind::TappingRight,
        TestKind::Questionnaire,
        TestKind::RiskFactors,
        TestKind::Voice,
        TestKind::Cognitive,
        TestKind::Smell,
        TestKind::Diagnosis,
        TestKind::Notes,
    ];

    /// Lowercase identifier used by the assessment app
    pub fn name(&self) -> &'static str {
        match self {
            TestKind::TremorResting => "tremorresting",
            TestKind::TremorPostural => "tremorpostural",
            TestKind::Balance => "balance",
            TestKind::Gait => "gait",
            TestKind::TappingLeft => "tappingleft",
            TestKind::TappingRight => "tappingright",
            TestKind::Questionnaire => "questionnaire",
            TestKind::RiskFactors => "riskfactors",
            TestKind::Voice => "voice",
            TestKind::Cognitive => "cognitive",
            TestKind::Smell => "smell",
            TestKind::Diagnosis => "diagnosis",
            TestKind::Notes => "notes",
        }
    }

    /// Case-insensitive lookup by identifier
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
