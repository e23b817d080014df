//! Default clinical threshold tables.
//!
//! These are reviewed domain constants. They live here as data so a
//! deployment can override them through configuration without touching the
//! classification logic.

use neuroscreen_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::bands::{SeverityBand, Threshold, ThresholdTable};

/// Every metric the report interprets
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    RestingTremor,
    PosturalTremor,
    Balance,
    Gait,
    TapLeft,
    TapRight,
    Questionnaire,
}

impl Metric {
    pub const ALL: [Metric; 7] = [
        Metric::RestingTremor,
        Metric::PosturalTremor,
        Metric::Balance,
        Metric::Gait,
        Metric::TapLeft,
        Metric::TapRight,
        Metric::Questionnaire,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Metric::RestingTremor => "restingTremor",
            Metric::PosturalTremor => "posturalTremor",
            Metric::Balance => "balance",
            Metric::Gait => "gait",
            Metric::TapLeft => "tapLeft",
            Metric::TapRight => "tapRight",
            Metric::Questionnaire => "questionnaire",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Threshold tables for all metrics. Both tapping hands share one table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpretationTables {
    pub resting_tremor: ThresholdTable,
    pub postural_tremor: ThresholdTable,
    pub balance: ThresholdTable,
    pub gait: ThresholdTable,
    pub tap_count: ThresholdTable,
    pub questionnaire: ThresholdTable,
}

impl Default for InterpretationTables {
    fn default() -> Self {
        Self {
            resting_tremor: ThresholdTable::ascending(
                vec![
                    Threshold::new(3.5, "Normal"),
                    Threshold::new(4.5, "Mild"),
                    Threshold::new(6.5, "Within Parkinsonian resting tremor range"),
                    Threshold::new(20.5, "Marked"),
                ],
                "Anomalous data",
            ),
            postural_tremor: ThresholdTable::ascending(
                vec![
                    Threshold::new(3.5, "Normal"),
                    Threshold::new(4.5, "Mild"),
                    Threshold::new(8.0, "Within essential/Parkinsonian tremor range"),
                    Threshold::new(20.5, "Marked"),
                ],
                "Anomalous data",
            ),
            balance: ThresholdTable::ascending(
                vec![
                    Threshold::new(3.0, "Stable"),
                    Threshold::new(5.0, "Mild sway"),
                    Threshold::new(8.0, "Marked sway"),
                    Threshold::new(20.5, "Severe instability"),
                ],
                "Anomalous data",
            ),
            gait: ThresholdTable::ascending(
                vec![
                    Threshold::new(2.5, "Normal arm swing"),
                    Threshold::new(4.0, "Mildly irregular arm swing"),
                    Threshold::new(6.0, "Markedly irregular arm swing"),
                    Threshold::new(20.5, "Severely irregular arm swing"),
                ],
                "Anomalous data",
            ),
            tap_count: ThresholdTable::descending(
                vec![
                    Threshold::new(60.0, "Normal"),
                    Threshold::new(45.0, "Mild slowing"),
                    Threshold::new(30.0, "Moderate slowing"),
                    Threshold::new(0.0, "Marked slowing"),
                ],
                "Anomalous data",
            ),
            questionnaire: ThresholdTable::ascending(
                vec![
                    Threshold::new(5.0, "Low symptom burden"),
                    Threshold::new(10.0, "Moderate symptom burden"),
                    Threshold::new(20.0, "High symptom burden"),
                    Threshold::new(31.0, "Very high symptom burden"),
                ],
                "Anomalous data",
            ),
        }
    }
}

impl InterpretationTables {
    pub fn table(&self, metric: Metric) -> &ThresholdTable {
        match metric {
            Metric::RestingTremor => &self.resting_tremor,
            Metric::PosturalTremor => &self.postural_tremor,
            Metric::Balance => &self.balance,
            Metric::Gait => &self.gait,
            Metric::TapLeft | Metric::TapRight => &self.tap_count,
            Metric::Questionnaire => &self.questionnaire,
        }
    }

    pub fn classify(&self, metric: Metric, value: Option<f64>) -> SeverityBand {
        self.table(metric).classify(value)
    }

    pub fn validate(&self) -> Result<()> {
        for metric in Metric::ALL {
            let table = self.table(metric);
            if table.bands.is_empty() || !table.is_ordered() {
                return Err(Error::Config(format!(
                    "threshold table for {} must be non-empty and strictly ordered",
                    metric
                )));
            }
            if table.tier_count() > u8::MAX as usize {
                return Err(Error::Config(format!("too many bands for {}", metric)));
            }
        }
        Ok(())
    }
}
