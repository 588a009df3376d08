//! Deletion-tracking records.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::Record;
use crate::error::ApiError;

/// One entry of the `Deleted` endpoint.
///
/// The deletion timestamp is named `ts` on the wire. Records carry no
/// `ModificationTimestamp`, and one present on the record is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedRecord {
    /// Entity set the deleted record belonged to (e.g. `Property`).
    pub resource: String,

    /// Primary key of the deleted record.
    #[serde(deserialize_with = "string_or_number")]
    pub primary_key: String,

    /// When the deletion happened.
    #[serde(deserialize_with = "lenient_utc")]
    pub ts: DateTime<Utc>,
}

impl DeletedRecord {
    /// Parses a deletion record from a raw `value` entry.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Server`] if a required field is missing or malformed.
    pub fn from_record(record: &Record) -> Result<Self, ApiError> {
        serde_json::from_value(Value::Object(record.clone()))
            .map_err(|e| ApiError::server(format!("Malformed deletion record: {e}")))
    }

    /// Parses every record of a page, failing on the first malformed entry.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Server`] if any record is malformed.
    pub fn from_records(records: &[Record]) -> Result<Vec<Self>, ApiError> {
        records.iter().map(Self::from_record).collect()
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

// Offset-less timestamps are taken as UTC.
fn lenient_utc<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| serde::de::Error::custom(format!("invalid ts '{raw}': {e}")))
}

// ============================================================================
// Tests
// ============================================================================
