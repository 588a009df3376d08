//! Maps non-2xx responses onto [`ApiError`] variants.
//!
//! | status | error |
//! |---|---|
//! | 400, other 4xx | `Validation` |
//! | 401, 403 | `Authentication` |
//! | 404 | `NotFound` |
//! | 429 | `RateLimit` |
//! | 5xx, 1xx, 3xx | `Server` |

use serde_json::{Value, json};
use wfrmls_core::{ApiError, FieldErrors};

use crate::retry::parse_retry_after;
use crate::transport::HttpResponse;

/// Returns true if a response with `status` may succeed on retry.
pub fn is_transient_status(status: u16) -> bool {
    status == 429 || (500..600).contains(&status)
}

/// Converts a non-2xx response into the matching error.
pub fn error_for_response(response: &HttpResponse) -> ApiError {
    let status = response.status;
    let raw = parse_error_body(&response.body);
    let message = extract_message(raw.as_ref()).unwrap_or_else(|| default_message(status));
    let status_code = Some(status);

    match status {
        401 | 403 => ApiError::Authentication {
            message,
            status_code,
            raw_response: raw,
        },
        404 => ApiError::NotFound {
            message,
            status_code,
            raw_response: raw,
        },
        429 => ApiError::RateLimit {
            message,
            status_code,
            retry_after: response.header("retry-after").and_then(parse_retry_after),
            raw_response: raw,
        },
        400..=499 => ApiError::Validation {
            message,
            status_code,
            field_errors: raw.as_ref().and_then(extract_field_errors),
            raw_response: raw,
        },
        _ => ApiError::Server {
            message,
            status_code,
            raw_response: raw,
        },
    }
}

/// Parses an error body; non-JSON text is wrapped as `{"message": text}`.
pub fn parse_error_body(body: &str) -> Option<Value> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(serde_json::from_str(trimmed).unwrap_or_else(|_| json!({ "message": trimmed })))
}

/// Reads `message`, then the OData `error.message`.
fn extract_message(raw: Option<&Value>) -> Option<String> {
    let raw = raw?;
    raw.get("message")
        .and_then(Value::as_str)
        .or_else(|| raw.pointer("/error/message").and_then(Value::as_str))
        .map(ToString::to_string)
}

/// Reads per-field messages from `errors` or OData `error.details`.
fn extract_field_errors(raw: &Value) -> Option<FieldErrors> {
    let mut fields = FieldErrors::new();

    if let Some(errors) = raw.get("errors").and_then(Value::as_object) {
        for (field, messages) in errors {
            let messages: Vec<String> = match messages {
                Value::Array(items) => items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(ToString::to_string)
                    .collect(),
                Value::String(single) => vec![single.clone()],
                _ => continue,
            };
            fields.entry(field.clone()).or_default().extend(messages);
        }
    }

    if let Some(details) = raw.pointer("/error/details").and_then(Value::as_array) {
        for detail in details {
            let target = detail.get("target").and_then(Value::as_str);
            let message = detail.get("message").and_then(Value::as_str);
            if let (Some(target), Some(message)) = (target, message) {
                fields
                    .entry(target.to_string())
                    .or_default()
                    .push(message.to_string());
            }
        }
    }

    if fields.is_empty() { None } else { Some(fields) }
}

fn default_message(status: u16) -> String {
    match status {
        400 => "Bad request".to_string(),
        401 => "Invalid or expired bearer token".to_string(),
        403 => "Access forbidden".to_string(),
        404 => "Resource not found".to_string(),
        429 => "Rate limit exceeded".to_string(),
        500..=599 => format!("Server error ({status})"),
        _ => format!("Unexpected status code: {status}"),
    }
}

// ============================================================================
// Tests
// ============================================================================
