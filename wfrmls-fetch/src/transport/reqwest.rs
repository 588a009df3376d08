//! Production transport over `reqwest`.

use async_trait::async_trait;
use reqwest::{Client, header};
use tracing::{debug, instrument};

use super::{HttpResponse, RequestEnvelope, Transport};
use crate::config::ClientConfig;
use crate::error::TransportError;

/// User agent string for the WFRMLS client.
const USER_AGENT: &str = concat!("wfrmls-rs/", env!("CARGO_PKG_VERSION"));

/// HTTP transport backed by a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    inner: Client,
}

impl ReqwestTransport {
    /// Creates a transport for `config`.
    ///
    /// The per-attempt timeout is enforced by the caller; only the connect
    /// phase is bounded here.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Build`] if the TLS backend cannot be set up.
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let inner = Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(config.timeout())
            .danger_accept_invalid_certs(!config.verify_tls())
            .build()
            .map_err(|e| TransportError::Build(e.to_string()))?;

        Ok(Self { inner })
    }

    /// Returns the inner reqwest client.
    pub fn inner(&self) -> &Client {
        &self.inner
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    #[instrument(skip(self, request), fields(url = %request.url()))]
    async fn send(&self, request: &RequestEnvelope) -> Result<HttpResponse, TransportError> {
        debug!("GET request");

        let response = self
            .inner
            .get(request.url().clone())
            .header(header::AUTHORIZATION, request.authorization())
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.text().await?;

        debug!(status, bytes = body.len(), "Response received");
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
