//! Parses 2xx bodies into [`ResponseEnvelope`]s.
//!
//! A body that breaks the OData contract is reported as
//! [`ApiError::Server`]: the service, not the caller, is at fault.

use serde_json::{Map, Value};
use wfrmls_core::{ApiError, Record, ResponseEnvelope};

/// Expected body shape of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyShape {
    /// Collection endpoint: `value` is required.
    Collection,
    /// Single-entity endpoint: a bare object is wrapped as one record.
    Entity,
}

const CONTEXT_KEY: &str = "@odata.context";

/// Parses a 2xx body of the given shape.
///
/// # Errors
///
/// Returns [`ApiError::Server`] for malformed JSON, a non-object body, or a
/// collection body without a `value` array.
pub fn parse_body(body: &str, shape: BodyShape) -> Result<ResponseEnvelope, ApiError> {
    let json: Value = serde_json::from_str(body)
        .map_err(|e| contract_violation(format!("Response is not valid JSON: {e}"), None))?;

    let Value::Object(mut object) = json else {
        return Err(contract_violation("Response body is not a JSON object", Some(json)));
    };

    if object.contains_key("value") {
        return envelope_from_object(object);
    }

    match shape {
        BodyShape::Collection => Err(contract_violation(
            "Response is missing the 'value' array",
            Some(Value::Object(object)),
        )),
        BodyShape::Entity => {
            let odata_context = match object.remove(CONTEXT_KEY) {
                Some(Value::String(context)) => context,
                _ => String::new(),
            };
            Ok(ResponseEnvelope {
                odata_context,
                ..ResponseEnvelope::new(vec![object])
            })
        }
    }
}

/// Unwraps exactly one record from an envelope.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] for an empty `value`, or
/// [`ApiError::Server`] if more than one record came back.
pub fn single_record(envelope: ResponseEnvelope, what: &str) -> Result<Record, ApiError> {
    let count = envelope.len();
    let mut records = envelope.into_records().into_iter();

    match (records.next(), count) {
        (None, _) => Err(ApiError::not_found(format!("{what} not found"))),
        (Some(mut record), 1) => {
            record.remove(CONTEXT_KEY);
            Ok(record)
        }
        (Some(_), n) => Err(ApiError::server(format!(
            "Expected one record for {what}, got {n}"
        ))),
    }
}

fn envelope_from_object(object: Map<String, Value>) -> Result<ResponseEnvelope, ApiError> {
    let raw = Value::Object(object);
    match serde_json::from_value::<ResponseEnvelope>(raw.clone()) {
        Ok(envelope) => Ok(envelope),
        Err(e) => Err(contract_violation(format!("Malformed OData envelope: {e}"), Some(raw))),
    }
}

fn contract_violation(message: impl Into<String>, raw: Option<Value>) -> ApiError {
    ApiError::Server {
        message: message.into(),
        status_code: None,
        raw_response: raw,
    }
}

// ============================================================================
// Tests
// ============================================================================
