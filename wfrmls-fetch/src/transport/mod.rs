//! HTTP transport seam.
//!
//! [`Transport`] sends one GET and returns whatever came back. Status
//! handling, retries, and parsing live in [`ODataClient`](crate::ODataClient),
//! so a transport only has to move bytes.
//!
//! - [`reqwest::ReqwestTransport`] - production transport over HTTPS
//! - `mock::ScriptedTransport` - replays canned responses for tests
//!   (`test-util` feature)

use std::collections::BTreeMap;
use std::fmt;

use async_trait::async_trait;
use url::Url;

use crate::config::BearerToken;
use crate::error::TransportError;

#[cfg(any(test, feature = "test-util"))]
pub mod mock;
pub mod reqwest;

// ============================================================================
// Request
// ============================================================================

/// A single authenticated GET, created per call.
#[derive(Clone)]
pub struct RequestEnvelope {
    url: Url,
    token: BearerToken,
}

impl RequestEnvelope {
    /// Creates a GET request for `url` authenticated with `token`.
    pub fn get(url: Url, token: BearerToken) -> Self {
        Self { url, token }
    }

    /// Returns the HTTP method.
    pub fn method(&self) -> &'static str {
        "GET"
    }

    /// Returns the absolute URL including the query string.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Returns the `Authorization` header value.
    pub fn authorization(&self) -> String {
        self.token.header_value()
    }
}

impl fmt::Debug for RequestEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestEnvelope")
            .field("method", &self.method())
            .field("url", &self.url.as_str())
            .field("authorization", &"Bearer ***")
            .finish()
    }
}

// ============================================================================
// Response
// ============================================================================

/// A raw HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code.
    pub status: u16,
    /// Headers, keyed by lowercase name.
    pub headers: BTreeMap<String, String>,
    /// Response body as text.
    pub body: String,
}

impl HttpResponse {
    /// Creates a response with no headers.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: BTreeMap::new(),
            body: body.into(),
        }
    }

    /// Creates a response with a JSON body.
    pub fn json(status: u16, body: &serde_json::Value) -> Self {
        Self::new(status, body.to_string()).with_header("content-type", "application/json")
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// Returns a header value, matching the name case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Returns true for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// ============================================================================
// Transport Trait
// ============================================================================

/// Sends requests to the service.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request` and returns the response, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] if no response was received.
    async fn send(&self, request: &RequestEnvelope) -> Result<HttpResponse, TransportError>;
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_debug_hides_token() {
        let url = Url::parse("https://resoapi.utahrealestate.com/reso/odata/Property").unwrap();
        let request = RequestEnvelope::get(url, BearerToken::new("secret-token"));

        assert_eq!(request.authorization(), "Bearer secret-token");
        let debug = format!("{request:?}");
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("/reso/odata/Property"));
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let response = HttpResponse::new(429, "").with_header("Retry-After", "2");
        assert_eq!(response.header("retry-after"), Some("2"));
        assert_eq!(response.header("RETRY-AFTER"), Some("2"));
        assert!(!response.is_success());
    }
}
