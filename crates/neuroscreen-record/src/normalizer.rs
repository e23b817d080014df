//! Record normalization: one raw assessment document in, one
//! [`NormalizedRecord`] out.

use neuroscreen_core::{
    as_finite_number, get_ignore_case, parse_iso8601, structured_timestamp, to_iso8601, TestKind,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Normalizer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Tests to look for
    pub tests: Vec<TestKind>,

    /// Preferred creation timestamp field (structured or RFC 3339)
    pub created_at_field: String,

    /// Fallback field holding a pre-rendered timestamp string
    pub timestamp_field: String,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            tests: TestKind::ALL.to_vec(),
            created_at_field: "createdAt".to_string(),
            timestamp_field: "timestamp".to_string(),
        }
    }
}

/// Result of one administered test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResultBlob {
    pub test: TestKind,

    /// Identifier of the record the blob came from
    pub record_id: String,

    /// ISO-8601 timestamp of the owning record, if known
    pub timestamp: Option<String>,

    /// Always an object; bare scalars arrive wrapped as `{ "value": ... }`
    pub payload: Map<String, Value>,
}

impl TestResultBlob {
    /// Build from a raw value, wrapping non-objects
    pub fn new(test: TestKind, record_id: &str, timestamp: Option<String>, raw: &Value) -> Self {
        let payload = match raw {
            Value::Object(map) => map.clone(),
            other => {
                let mut map = Map::new();
                map.insert("value".to_string(), other.clone());
                map
            }
        };

        Self {
            test,
            record_id: record_id.to_string(),
            timestamp,
            payload,
        }
    }

    /// Case-insensitive payload field lookup
    pub fn get(&self, key: &str) -> Option<&Value> {
        get_ignore_case(&self.payload, key)
    }

    /// First of `keys` holding a finite number (or numeric string)
    pub fn number(&self, keys: &[&str]) -> Option<f64> {
        keys.iter().find_map(|k| self.get(k).and_then(as_finite_number))
    }

    /// First of `keys` holding a boolean (or "true"/"false"/"yes"/"no")
    pub fn boolean(&self, keys: &[&str]) -> Option<bool> {
        keys.iter().find_map(|k| match self.get(k)? {
            Value::Bool(b) => Some(*b),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" => Some(true),
                "false" | "no" => Some(false),
                _ => None,
            },
            _ => None,
        })
    }

    /// First of `keys` holding a non-blank string
    pub fn text(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|k| {
            self.get(k)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        })
    }
}

/// Allow-list-filtered view of a raw record.
///
/// Tests not found in the source are absent, so "not administered" stays
/// distinguishable from "administered with a null value".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedRecord {
    pub record_id: String,
    pub timestamp: Option<String>,
    pub tests: BTreeMap<TestKind, TestResultBlob>,
}

impl NormalizedRecord {
    pub fn get(&self, test: TestKind) -> Option<&TestResultBlob> {
        self.tests.get(&test)
    }

    pub fn contains(&self, test: TestKind) -> bool {
        self.tests.contains_key(&test)
    }

    pub fn administered(&self) -> BTreeSet<TestKind> {
        self.tests.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }
}

/// Builds [`NormalizedRecord`]s from raw documents
#[derive(Debug, Clone, Default)]
pub struct RecordNormalizer {
    config: NormalizerConfig,
}

impl RecordNormalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    pub fn normalize(&self, record_id: &str, raw: &Map<String, Value>) -> NormalizedRecord {
        let index = Self::key_index(raw);
        let timestamp = self.normalize_timestamp(raw);

        let tests = self
            .config
            .tests
            .iter()
            .filter_map(|&test| {
                let key = index.get(test.name())?;
                let blob = TestResultBlob::new(test, record_id, timestamp.clone(), &raw[*key]);
                Some((test, blob))
            })
            .collect();

        NormalizedRecord {
            record_id: record_id.to_string(),
            timestamp,
            tests,
        }
    }

    /// Lowercased key -> original key. On keys differing only by case, the
    /// first one in iteration order wins.
    pub fn key_index(raw: &Map<String, Value>) -> HashMap<String, &str> {
        let mut index = HashMap::with_capacity(raw.len());
        for key in raw.keys() {
            index.entry(key.to_lowercase()).or_insert(key.as_str());
        }
        index
    }

    /// Record timestamp as ISO-8601, from the creation field when it is a
    /// structured (or RFC 3339) timestamp, else the raw fallback string
    pub fn normalize_timestamp(&self, raw: &Map<String, Value>) -> Option<String> {
        let created = get_ignore_case(raw, &self.config.created_at_field).and_then(|v| {
            structured_timestamp(v).or_else(|| v.as_str().and_then(parse_iso8601))
        });

        if let Some(dt) = created {
            return Some(to_iso8601(&dt));
        }

        get_ignore_case(raw, &self.config.timestamp_field)
            .and_then(Value::as_str)
            .map(str::to_string)
    }
}
