//! Timestamp parsing for kitchen-stage transitions.
//!
//! Accepts the shapes order documents carry in practice:
//! - RFC 3339 strings (`2024-08-11T12:00:00Z`, `2024-08-11T14:00:00+02:00`)
//! - Naive date-times without offset (`2024-08-11T23:59:59`), read as local time
//! - Date-only strings (`2024-08-11`), read as UTC midnight
//! - Epoch milliseconds
//! - Firestore-style `{ "seconds": .., "nanoseconds": .. }` objects

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// A point in time as written in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Moment {
    /// Carries its own offset; an absolute instant
    Absolute(DateTime<Utc>),
    /// Wall-clock time with no offset; resolved against a [`crate::Zone`]
    Floating(NaiveDateTime),
}

/// A timestamp field: the raw text plus the parsed moment, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timestamp {
    pub raw: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moment: Option<Moment>,
}

impl Timestamp {
    /// Build from a string, keeping the text even when it does not parse.
    pub fn from_text(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let moment = parse_moment_str(&raw);
        Self { raw, moment }
    }

    /// Build from an arbitrary JSON value. Returns `None` for null, empty
    /// strings and shapes that carry no time at all.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => {
                let s = s.trim();
                if s.is_empty() {
                    None
                } else {
                    Some(Self::from_text(s))
                }
            }
            Value::Number(n) => {
                let millis = n.as_f64()?;
                if !millis.is_finite() {
                    return None;
                }
                let at = Utc.timestamp_millis_opt(millis as i64).single()?;
                Some(Self::absolute(at))
            }
            Value::Object(map) => {
                let seconds = map
                    .get("seconds")
                    .or_else(|| map.get("_seconds"))
                    .and_then(Value::as_i64)?;
                let nanos = map
                    .get("nanoseconds")
                    .or_else(|| map.get("_nanoseconds"))
                    .and_then(Value::as_u64)
                    .unwrap_or(0);
                let at = Utc.timestamp_opt(seconds, nanos.min(999_999_999) as u32).single()?;
                Some(Self::absolute(at))
            }
            _ => None,
        }
    }

    fn absolute(at: DateTime<Utc>) -> Self {
        Self {
            raw: at.to_rfc3339_opts(SecondsFormat::Millis, true),
            moment: Some(Moment::Absolute(at)),
        }
    }

    /// Date portion of the raw text (everything before the time separator).
    pub fn date_part(&self) -> &str {
        self.raw
            .split(|c| c == 'T' || c == ' ')
            .next()
            .unwrap_or("")
    }

    pub fn is_parsed(&self) -> bool {
        self.moment.is_some()
    }
}

/// Parse a timestamp string. `None` means the text is not a recognised time.
pub fn parse_moment_str(s: &str) -> Option<Moment> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(Moment::Absolute(dt.with_timezone(&Utc)));
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Moment::Floating(naive));
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Moment::Absolute(naive.and_utc()))
}
