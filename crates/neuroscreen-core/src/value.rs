//! Coercion helpers for loosely-typed JSON payloads written by the
//! assessment app and the document store.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

/// Loose numeric coercion.
///
/// Numbers pass through, numeric strings are parsed (blank strings are 0),
/// booleans map to 0/1 and `null` to 0. Anything else is `NaN`, which the
/// caller is expected to filter.
pub fn coerce_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().unwrap_or(f64::NAN)
            }
        }
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::Null => 0.0,
        Value::Array(_) | Value::Object(_) => f64::NAN,
    }
}

/// Strict numeric read: only numbers and numeric strings, finite results
pub fn as_finite_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Case-insensitive key lookup. An exact match wins; otherwise the first
/// case-insensitive match in iteration order.
pub fn get_ignore_case<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).or_else(|| {
        map.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    })
}

/// Interpret a document-store timestamp object.
///
/// Accepts both the serialized admin form (`_seconds` / `_nanoseconds`) and
/// the client form (`seconds` / `nanoseconds`).
pub fn structured_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    let obj = value.as_object()?;

    let seconds = obj.get("_seconds").or_else(|| obj.get("seconds"))?;
    let seconds = seconds.as_i64().or_else(|| seconds.as_f64().map(|s| s.trunc() as i64))?;

    let nanos = obj
        .get("_nanoseconds")
        .or_else(|| obj.get("nanoseconds"))
        .and_then(Value::as_u64)
        .unwrap_or(0);

    DateTime::from_timestamp(seconds, u32::try_from(nanos).ok()?)
}

/// Parse an RFC 3339 / ISO-8601 string into UTC
pub fn parse_iso8601(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Millisecond-precision ISO-8601 rendering with a `Z` suffix
pub fn to_iso8601(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}
