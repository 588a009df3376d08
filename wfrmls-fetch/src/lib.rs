// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # WFRMLS Fetch
//!
//! Configuration, HTTP transport, and resilience for the WFRMLS client.
//!
//! ## Request Lifecycle
//!
//! Every call made through [`ODataClient`] goes through the same steps:
//!
//! 1. Parameters are validated locally ([`QueryParameters::validate`]);
//!    failures never reach the network
//! 2. An authenticated GET ([`transport::RequestEnvelope`]) is sent through
//!    a [`Transport`], each attempt bounded by the configured timeout
//! 3. 429, 5xx, and network failures are retried per [`RetryStrategy`],
//!    honoring `Retry-After` on 429
//! 4. Other statuses are mapped to an [`ApiError`] by [`mapper`]
//! 5. 2xx bodies are parsed into a [`ResponseEnvelope`] by [`parser`]
//!
//! ## Key Types
//!
//! - [`ClientConfig`] - Token, base URL, timeout, and retry settings
//! - [`ODataClient`] - Runs the request lifecycle
//! - [`Transport`] - Send seam; [`ReqwestTransport`] in production,
//!   `transport::mock::ScriptedTransport` in tests (`test-util` feature)
//!
//! [`QueryParameters::validate`]: wfrmls_core::QueryParameters::validate
//! [`ApiError`]: wfrmls_core::ApiError
//! [`ResponseEnvelope`]: wfrmls_core::ResponseEnvelope

pub mod client;
pub mod config;
pub mod error;
pub mod mapper;
pub mod parser;
pub mod retry;
pub mod transport;

// Re-export key types at crate root
pub use client::ODataClient;
pub use config::{BearerToken, ClientConfig, ClientConfigBuilder, DEFAULT_BASE_URL, FileConfig};
pub use error::TransportError;
pub use retry::RetryStrategy;
pub use transport::reqwest::ReqwestTransport;
pub use transport::{HttpResponse, RequestEnvelope, Transport};
