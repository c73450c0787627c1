//! Receipt timestamp coercion.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::resolve::coerce_string;

/// `10/19/2026, 3:04:05 PM`
pub const RECEIPT_DATE_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Epoch numbers below this are seconds, above are milliseconds.
const EPOCH_MILLIS_THRESHOLD: f64 = 1e11;

pub fn render(at: &NaiveDateTime) -> String {
    at.format(RECEIPT_DATE_FORMAT).to_string()
}

/// Parse a raw date value into wall-clock time.
///
/// Offsets in RFC 3339 strings are kept: the receipt shows the time as it was
/// recorded upstream. Epoch numbers are rendered in UTC.
pub fn parse(value: &Value) -> Option<NaiveDateTime> {
    match value {
        Value::Number(n) => {
            let raw = n.as_f64()?;
            let millis = if raw.abs() < EPOCH_MILLIS_THRESHOLD {
                raw * 1000.0
            } else {
                raw
            };
            DateTime::from_timestamp_millis(millis as i64).map(|dt| dt.naive_utc())
        }
        Value::String(s) => parse_text(s.trim()),
        _ => None,
    }
}

fn parse_text(text: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_local());
    }
    if let Some(dt) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
    {
        return Some(dt);
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Render the resolved date field.
///
/// Absent → `now`; unparsable → the original text unchanged.
pub fn coerce_date(value: Option<&Value>, now: NaiveDateTime) -> String {
    match value {
        None => render(&now),
        Some(v) => match (parse(v), v) {
            (Some(at), _) => render(&at),
            (None, Value::String(raw)) => raw.clone(),
            (None, other) => coerce_string(other),
        },
    }
}
