//! The screening report handed to the renderer.

use neuroscreen_clinical::{Metric, SeverityBand};
use neuroscreen_core::{FrequencyEstimate, Result, TestKind};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Participant summary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Demographics {
    pub name: Option<String>,

    /// Whole years on the report date
    pub age: Option<u32>,
}

/// Dominant frequencies of the four motor recordings
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotorFrequencies {
    pub resting: FrequencyEstimate,
    pub postural: FrequencyEstimate,
    pub balance: FrequencyEstimate,
    pub gait: FrequencyEstimate,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TapCounts {
    pub left: Option<f64>,
    pub right: Option<f64>,
}

/// Everything the clinical report shows for one assessment record.
///
/// Ordered collections only, so serializing the same report twice yields
/// identical bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreeningReport {
    pub record_id: String,

    /// ISO-8601 timestamp of the record, if it carried one
    pub recorded_at: Option<String>,

    pub demographics: Demographics,
    pub tests_administered: BTreeSet<TestKind>,
    pub frequencies: MotorFrequencies,
    pub tap_counts: TapCounts,
    pub questionnaire_total: Option<f64>,
    pub severity_bands: BTreeMap<Metric, SeverityBand>,

    /// `None` when the risk-factor test was not administered or unreadable
    pub risk_flag: Option<bool>,

    pub diagnosis_text: Option<String>,
    pub free_text_notes: Option<String>,
}

impl ScreeningReport {
    /// Raw value behind a metric's severity band
    pub fn metric_value(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::RestingTremor => self.frequencies.resting.hz,
            Metric::PosturalTremor => self.frequencies.postural.hz,
            Metric::Balance => self.frequencies.balance.hz,
            Metric::Gait => self.frequencies.gait.hz,
            Metric::TapLeft => self.tap_counts.left,
            Metric::TapRight => self.tap_counts.right,
            Metric::Questionnaire => self.questionnaire_total,
        }
    }

    pub fn band(&self, metric: Metric) -> Option<&SeverityBand> {
        self.severity_bands.get(&metric)
    }

    pub fn was_administered(&self, test: TestKind) -> bool {
        self.tests_administered.contains(&test)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
