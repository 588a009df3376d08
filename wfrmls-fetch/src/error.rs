//! Transport error types.

use std::time::Duration;

use thiserror::Error;
use wfrmls_core::ApiError;

// ============================================================================
// Transport Error
// ============================================================================

/// Failure below HTTP: no response was received.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The connection could not be established.
    #[error("Connection failed: {0}")]
    Connect(String),

    /// The attempt exceeded the configured timeout.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// The HTTP client reported an error while sending or reading.
    #[error("Request error: {0}")]
    Request(#[source] reqwest::Error),

    /// The request URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Build(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            Self::Connect(err.to_string())
        } else {
            Self::Request(err)
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        ApiError::network(err.to_string(), err)
    }
}

// ============================================================================
// Tests
// ============================================================================
