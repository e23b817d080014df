//! Report assembly.

use chrono::NaiveDate;
use neuroscreen_clinical::{InterpretationTables, Metric};
use neuroscreen_core::{as_finite_number, get_ignore_case, FrequencyEstimate, Result, TestKind};
use neuroscreen_record::{AgeCalculator, NormalizedRecord, RecordNormalizer, TestResultBlob};
use neuroscreen_signal::{FrequencyEstimator, SeriesExtractor};
use serde_json::{Map, Value};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::report::{Demographics, MotorFrequencies, ScreeningReport, TapCounts};
use crate::settings::EngineConfig;

/// Recorded tests with a dominant frequency, in `MotorFrequencies` order
const MOTOR_TESTS: &[TestKind] = &[
    TestKind::TremorResting,
    TestKind::TremorPostural,
    TestKind::Balance,
    TestKind::Gait,
];

const BIRTH_DATE_KEYS: &[&str] = &["birthDate", "dateOfBirth", "dob"];
const TAP_KEYS: &[&str] = &["value", "count", "taps", "tapCount"];
const QUESTIONNAIRE_KEYS: &[&str] = &["total", "score", "value"];
const RISK_KEYS: &[&str] = &["atRisk", "risk", "value"];
const DIAGNOSIS_KEYS: &[&str] = &["text", "diagnosis", "value"];
const NOTES_KEYS: &[&str] = &["text", "notes", "value"];

/// Builds [`ScreeningReport`]s from demographics and assessment records
#[derive(Debug, Clone, Default)]
pub struct ReportAssembler {
    normalizer: RecordNormalizer,
    extractor: SeriesExtractor,
    estimator: FrequencyEstimator,
    ages: AgeCalculator,
    tables: InterpretationTables,
}

impl ReportAssembler {
    /// Create an assembler, rejecting inconsistent configuration up front
    pub fn new(config: &EngineConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            normalizer: RecordNormalizer::new(config.normalizer.clone()),
            extractor: SeriesExtractor::new(config.channel),
            estimator: FrequencyEstimator::new(config.spectrum),
            ages: AgeCalculator::new(config.age)?,
            tables: config.interpretation.clone(),
        })
    }

    pub fn normalize(&self, record_id: &str, raw: &Map<String, Value>) -> NormalizedRecord {
        self.normalizer.normalize(record_id, raw)
    }

    /// Normalize a raw record and assemble its report
    pub fn assemble_raw(
        &self,
        demographics: &Map<String, Value>,
        record_id: &str,
        raw: &Map<String, Value>,
        today: NaiveDate,
    ) -> ScreeningReport {
        let record = self.normalize(record_id, raw);
        self.assemble(demographics, &record, today)
    }

    /// Assemble the report for one normalized record.
    ///
    /// `today` is the reference date for the participant's age; the result
    /// depends on nothing else outside the arguments.
    pub fn assemble(
        &self,
        demographics: &Map<String, Value>,
        record: &NormalizedRecord,
        today: NaiveDate,
    ) -> ScreeningReport {
        let mut report = ScreeningReport {
            record_id: record.record_id.clone(),
            recorded_at: record.timestamp.clone(),
            demographics: self.demographics(demographics, today),
            tests_administered: record.administered(),
            frequencies: self.frequencies(record),
            tap_counts: TapCounts {
                left: record.get(TestKind::TappingLeft).and_then(tap_count),
                right: record.get(TestKind::TappingRight).and_then(tap_count),
            },
            questionnaire_total: record.get(TestKind::Questionnaire).and_then(questionnaire_total),
            severity_bands: Default::default(),
            risk_flag: record
                .get(TestKind::RiskFactors)
                .and_then(|blob| blob.boolean(RISK_KEYS)),
            diagnosis_text: record
                .get(TestKind::Diagnosis)
                .and_then(|blob| blob.text(DIAGNOSIS_KEYS)),
            free_text_notes: record.get(TestKind::Notes).and_then(|blob| blob.text(NOTES_KEYS)),
        };

        report.severity_bands = Metric::ALL
            .iter()
            .map(|&metric| (metric, self.tables.classify(metric, report.metric_value(metric))))
            .collect();

        tracing::info!(
            "Assembled screening report for record {} ({} tests administered)",
            report.record_id,
            report.tests_administered.len()
        );

        report
    }

    /// Dominant frequency of one motor recording, unavailable when the
    /// test is absent or carries no usable recording
    pub fn motor_frequency(&self, record: &NormalizedRecord, test: TestKind) -> FrequencyEstimate {
        let blob = match record.get(test) {
            Some(blob) => blob,
            None => return FrequencyEstimate::unavailable(),
        };

        match self.extractor.extract_object(&blob.payload) {
            Some(series) => self.estimator.estimate(&series),
            None => {
                tracing::debug!("No sensor recording in {} for record {}", test, record.record_id);
                FrequencyEstimate::unavailable()
            }
        }
    }

    fn frequencies(&self, record: &NormalizedRecord) -> MotorFrequencies {
        #[cfg(feature = "parallel")]
        let estimates: Vec<FrequencyEstimate> = MOTOR_TESTS
            .par_iter()
            .map(|&test| self.motor_frequency(record, test))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let estimates: Vec<FrequencyEstimate> = MOTOR_TESTS
            .iter()
            .map(|&test| self.motor_frequency(record, test))
            .collect();

        MotorFrequencies {
            resting: estimates[0],
            postural: estimates[1],
            balance: estimates[2],
            gait: estimates[3],
        }
    }

    fn demographics(&self, raw: &Map<String, Value>, today: NaiveDate) -> Demographics {
        let age = match BIRTH_DATE_KEYS
            .iter()
            .find_map(|key| get_ignore_case(raw, key).filter(|v| !v.is_null()))
        {
            Some(birth) => self.ages.age(birth, today),
            None => {
                tracing::debug!("No birth date in demographics");
                None
            }
        };

        Demographics {
            name: participant_name(raw),
            age,
        }
    }
}

/// `name`, else `firstName` and `lastName` joined
fn participant_name(raw: &Map<String, Value>) -> Option<String> {
    let field = |key: &str| {
        get_ignore_case(raw, key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    };

    if let Some(name) = field("name") {
        return Some(name.to_string());
    }

    let parts: Vec<&str> = [field("firstName"), field("lastName")].into_iter().flatten().collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

fn tap_count(blob: &TestResultBlob) -> Option<f64> {
    blob.number(TAP_KEYS)
}

/// Explicit total, else the sum of the numeric answers
fn questionnaire_total(blob: &TestResultBlob) -> Option<f64> {
    if let Some(total) = blob.number(QUESTIONNAIRE_KEYS) {
        return Some(total);
    }

    let answers: Vec<f64> = blob
        .get("answers")?
        .as_array()?
        .iter()
        .filter_map(as_finite_number)
        .collect();

    if answers.is_empty() {
        None
    } else {
        Some(answers.iter().sum())
    }
}
