//! Error taxonomy for WFRMLS API operations.
//!
//! Every client operation resolves to either a parsed response or exactly
//! one [`ApiError`]. The variant tells the caller what to do next: fix the
//! input ([`ApiError::Validation`]), re-authenticate
//! ([`ApiError::Authentication`]), or retry later ([`ApiError::RateLimit`],
//! [`ApiError::Server`], [`ApiError::Network`]).

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

/// Per-field validation messages reported by the service.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Boxed error source for network failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

// ============================================================================
// Error Kind
// ============================================================================

/// Discriminant of an [`ApiError`], for matching without destructuring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Missing, invalid, or rejected credentials (401/403).
    Authentication,
    /// The requested record or endpoint does not exist (404).
    NotFound,
    /// The request was rejected as malformed, locally or by the service (400).
    Validation,
    /// The service throttled the client (429).
    RateLimit,
    /// The service failed or violated its response contract (5xx).
    Server,
    /// The request never produced an HTTP response (connect/timeout/DNS).
    Network,
}

impl ErrorKind {
    /// Returns true if the transport layer retries this kind.
    pub fn is_retryable(self) -> bool {
        matches!(self, Self::RateLimit | Self::Server | Self::Network)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Authentication => "authentication",
            Self::NotFound => "not_found",
            Self::Validation => "validation",
            Self::RateLimit => "rate_limit",
            Self::Server => "server",
            Self::Network => "network",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Api Error
// ============================================================================

/// Error returned by WFRMLS client operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Credentials were missing or rejected.
    #[error("Authentication failed: {message}")]
    Authentication {
        /// Human-readable description.
        message: String,
        /// HTTP status, absent for local failures such as a missing token.
        status_code: Option<u16>,
        /// Parsed response body, if one was received.
        raw_response: Option<Value>,
    },

    /// The requested resource does not exist.
    #[error("Resource not found: {message}")]
    NotFound {
        /// Human-readable description.
        message: String,
        /// HTTP status, absent when an empty result set was mapped locally.
        status_code: Option<u16>,
        /// Parsed response body, if one was received.
        raw_response: Option<Value>,
    },

    /// The request parameters were invalid.
    #[error("Validation failed: {message}")]
    Validation {
        /// Human-readable description.
        message: String,
        /// HTTP status, absent for local parameter checks.
        status_code: Option<u16>,
        /// Per-field messages, when the service reported them.
        field_errors: Option<FieldErrors>,
        /// Parsed response body, if one was received.
        raw_response: Option<Value>,
    },

    /// The service rate-limited the client and the retry budget ran out.
    #[error("Rate limit exceeded: {message}")]
    RateLimit {
        /// Human-readable description.
        message: String,
        /// HTTP status (429).
        status_code: Option<u16>,
        /// Wait hint from the `Retry-After` header.
        retry_after: Option<Duration>,
        /// Parsed response body, if one was received.
        raw_response: Option<Value>,
    },

    /// The service failed or returned a response that violates the OData contract.
    #[error("Server error: {message}")]
    Server {
        /// Human-readable description.
        message: String,
        /// HTTP status, absent when a 2xx body could not be parsed.
        status_code: Option<u16>,
        /// Parsed response body, if one was received.
        raw_response: Option<Value>,
    },

    /// The request failed below HTTP.
    #[error("Network error: {message}")]
    Network {
        /// Human-readable description.
        message: String,
        /// Underlying transport error.
        #[source]
        source: Option<BoxError>,
    },
}

impl ApiError {
    /// Creates a local authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
            status_code: None,
            raw_response: None,
        }
    }

    /// Creates a local not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            status_code: None,
            raw_response: None,
        }
    }

    /// Creates a local validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            status_code: None,
            field_errors: None,
            raw_response: None,
        }
    }

    /// Creates a server error without an HTTP status (contract violation).
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server {
            message: message.into(),
            status_code: None,
            raw_response: None,
        }
    }

    /// Creates a network error with an underlying cause.
    pub fn network(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Network {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Authentication { .. } => ErrorKind::Authentication,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::RateLimit { .. } => ErrorKind::RateLimit,
            Self::Server { .. } => ErrorKind::Server,
            Self::Network { .. } => ErrorKind::Network,
        }
    }

    /// Returns the human-readable message without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Authentication { message, .. }
            | Self::NotFound { message, .. }
            | Self::Validation { message, .. }
            | Self::RateLimit { message, .. }
            | Self::Server { message, .. }
            | Self::Network { message, .. } => message,
        }
    }

    /// Returns the HTTP status code, if the error came from an HTTP response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Authentication { status_code, .. }
            | Self::NotFound { status_code, .. }
            | Self::Validation { status_code, .. }
            | Self::RateLimit { status_code, .. }
            | Self::Server { status_code, .. } => *status_code,
            Self::Network { .. } => None,
        }
    }

    /// Returns the parsed response body, if one was received.
    pub fn raw_response(&self) -> Option<&Value> {
        match self {
            Self::Authentication { raw_response, .. }
            | Self::NotFound { raw_response, .. }
            | Self::Validation { raw_response, .. }
            | Self::RateLimit { raw_response, .. }
            | Self::Server { raw_response, .. } => raw_response.as_ref(),
            Self::Network { .. } => None,
        }
    }

    /// Returns the per-field messages of a validation error.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation { field_errors, .. } => field_errors.as_ref(),
            _ => None,
        }
    }

    /// Returns the `Retry-After` hint of a rate-limit error.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimit { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// Returns true if a later identical request might succeed.
    pub fn is_retryable(&self) -> bool {
        self.kind().is_retryable()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(ApiError::authentication("x").kind(), ErrorKind::Authentication);
        assert_eq!(ApiError::not_found("x").kind(), ErrorKind::NotFound);
        assert_eq!(ApiError::validation("x").kind(), ErrorKind::Validation);
        assert_eq!(ApiError::server("x").kind(), ErrorKind::Server);

        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out");
        assert_eq!(ApiError::network("x", io).kind(), ErrorKind::Network);
    }

    #[test]
    fn test_retryable_kinds() {
        assert!(ErrorKind::RateLimit.is_retryable());
        assert!(ErrorKind::Server.is_retryable());
        assert!(ErrorKind::Network.is_retryable());
        assert!(!ErrorKind::Authentication.is_retryable());
        assert!(!ErrorKind::NotFound.is_retryable());
        assert!(!ErrorKind::Validation.is_retryable());
    }

    #[test]
    fn test_accessors() {
        let err = ApiError::RateLimit {
            message: "Too many requests".to_string(),
            status_code: Some(429),
            retry_after: Some(Duration::from_secs(2)),
            raw_response: Some(json!({"message": "Too many requests"})),
        };

        assert_eq!(err.status_code(), Some(429));
        assert_eq!(err.retry_after(), Some(Duration::from_secs(2)));
        assert_eq!(err.message(), "Too many requests");
        assert_eq!(err.raw_response().unwrap()["message"], "Too many requests");
        assert!(err.field_errors().is_none());
    }

    #[test]
    fn test_display_includes_kind_prefix() {
        let err = ApiError::validation("top must be between 1 and 200");
        assert_eq!(err.to_string(), "Validation failed: top must be between 1 and 200");
    }

    #[test]
    fn test_network_error_keeps_source() {
        use std::error::Error as _;

        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = ApiError::network("connect failed", io);
        assert!(err.source().is_some());
        assert_eq!(err.status_code(), None);
    }
}
