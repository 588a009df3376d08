//! OData response envelope types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single resource record: field name to JSON value, in server order.
///
/// Resource-specific fields are passed through untouched.
pub type Record = Map<String, Value>;

// ============================================================================
// Response Envelope
// ============================================================================

/// Parsed OData collection response.
///
/// `value` is always present, possibly empty. `odata_next_link` signals
/// that more pages exist; it is never followed automatically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// Metadata URL of the collection.
    #[serde(rename = "@odata.context", default)]
    pub odata_context: String,

    /// Records of this page.
    pub value: Vec<Record>,

    /// Total matching records, present when `$count=true` was requested.
    #[serde(
        rename = "@odata.count",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub odata_count: Option<u64>,

    /// Absolute URL of the next page.
    #[serde(
        rename = "@odata.nextLink",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub odata_next_link: Option<String>,
}

impl ResponseEnvelope {
    /// Creates an envelope holding the given records.
    pub fn new(value: Vec<Record>) -> Self {
        Self {
            odata_context: String::new(),
            value,
            odata_count: None,
            odata_next_link: None,
        }
    }

    /// Returns the number of records on this page.
    pub fn len(&self) -> usize {
        self.value.len()
    }

    /// Returns true if this page holds no records.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Returns true if the service advertised another page.
    pub fn has_next_page(&self) -> bool {
        self.odata_next_link.is_some()
    }

    /// Returns the records, consuming the envelope.
    pub fn into_records(self) -> Vec<Record> {
        self.value
    }

    /// Returns the string value of `field` for every record that has one.
    pub fn string_values<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.value
            .iter()
            .filter_map(move |record| record.get(field).and_then(Value::as_str))
    }
}

impl Default for ResponseEnvelope {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

// ============================================================================
// Tests
// ============================================================================
