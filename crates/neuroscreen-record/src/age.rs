//! Chronological age from birth dates of mixed representation.
//!
//! Birth dates reach the engine as document-store timestamps, as free text
//! typed or exported by the portal (`"15 April 1961 at 00:00:00 UTC+7"`), or
//! as plain calendar dates. Each representation is parsed to a calendar date
//! first; the age arithmetic never sees the original shape.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Offset, Utc};
use neuroscreen_core::{structured_timestamp, Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Leading-date formats tried against free text, in order. Anything after
/// the date (time of day, zone) is ignored.
const TEXT_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%d %B %Y",
    "%B %d %Y",
    "%B %d, %Y",
    "%a %b %d %Y",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%d.%m.%Y",
];

/// A birth date in one of its stored representations
#[derive(Debug, Clone, PartialEq)]
pub enum BirthDate {
    Timestamp(DateTime<Utc>),
    Text(String),
    Date(NaiveDate),
}

impl BirthDate {
    /// Classify a raw value. Shapes that cannot hold a date yield `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        if let Some(ts) = structured_timestamp(value) {
            return Some(BirthDate::Timestamp(ts));
        }

        match value {
            Value::String(s) => Some(BirthDate::Text(s.clone())),
            Value::Object(obj) => {
                let year = obj.get("year")?.as_i64()?;
                let month = obj.get("month")?.as_u64()?;
                let day = obj.get("day")?.as_u64()?;
                NaiveDate::from_ymd_opt(
                    i32::try_from(year).ok()?,
                    u32::try_from(month).ok()?,
                    u32::try_from(day).ok()?,
                )
                .map(BirthDate::Date)
            }
            _ => None,
        }
    }

    /// Calendar date of birth. Timestamps are read in `offset`.
    pub fn to_date(&self, offset: &FixedOffset) -> Result<NaiveDate> {
        match self {
            BirthDate::Timestamp(ts) => Ok(ts.with_timezone(offset).date_naive()),
            BirthDate::Text(text) => parse_birth_text(text),
            BirthDate::Date(date) => Ok(*date),
        }
    }
}

/// Parse the leading calendar date of a free-text birth date.
///
/// The standalone word "at" (as in `"15 April 1961 at 00:00:00 UTC+7"`) is
/// removed first.
pub fn parse_birth_text(text: &str) -> Result<NaiveDate> {
    let cleaned = text
        .split_whitespace()
        .filter(|word| !word.eq_ignore_ascii_case("at"))
        .collect::<Vec<_>>()
        .join(" ");

    if cleaned.is_empty() {
        return Err(Error::BirthDate("empty birth date".into()));
    }

    TEXT_DATE_FORMATS
        .iter()
        .filter_map(|fmt| NaiveDate::parse_and_remainder(&cleaned, fmt).ok())
        // A digit right after the match means a field was split mid-number
        .find(|(_, rest)| !rest.starts_with(|c: char| c.is_ascii_digit()))
        .map(|(date, _)| date)
        .ok_or_else(|| Error::BirthDate(format!("unrecognised birth date: {:?}", text)))
}

/// Whole years between `birth` and `today`.
///
/// One is subtracted while today's (month, day) is still before the
/// birthday's. `None` for birth dates in the future.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> Option<u32> {
    if birth > today {
        return None;
    }

    let mut years = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }

    u32::try_from(years).ok()
}

/// Age calculator configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgeConfig {
    /// Offset used to read structured timestamps as calendar dates
    pub utc_offset_minutes: i32,
}

/// Computes ages from raw birth-date values
#[derive(Debug, Clone, Copy)]
pub struct AgeCalculator {
    offset: FixedOffset,
}

impl Default for AgeCalculator {
    fn default() -> Self {
        Self { offset: Utc.fix() }
    }
}

impl AgeCalculator {
    pub fn new(config: AgeConfig) -> Result<Self> {
        let offset = config
            .utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                Error::Config(format!("invalid UTC offset: {} minutes", config.utc_offset_minutes))
            })?;
        Ok(Self { offset })
    }

    pub fn birth_date(&self, value: &Value) -> Result<NaiveDate> {
        BirthDate::from_value(value)
            .ok_or_else(|| Error::BirthDate(format!("unsupported birth date shape: {}", value)))?
            .to_date(&self.offset)
    }

    /// Age in whole years, or `None` when the birth date cannot be read
    pub fn age(&self, value: &Value, today: NaiveDate) -> Option<u32> {
        match self.birth_date(value) {
            Ok(birth) => age_on(birth, today),
            Err(e) => {
                tracing::debug!("Age unavailable: {}", e);
                None
            }
        }
    }
}
