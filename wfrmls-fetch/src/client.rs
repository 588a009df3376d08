//! OData client running the per-call request state machine.

use std::sync::Arc;

use tracing::{debug, instrument, warn};
use url::Url;
use wfrmls_core::odata::filter;
use wfrmls_core::{ApiError, QueryParameters, Record, ResponseEnvelope};

use crate::config::ClientConfig;
use crate::error::TransportError;
use crate::mapper;
use crate::parser::{self, BodyShape};
use crate::retry::RetryStrategy;
use crate::transport::reqwest::ReqwestTransport;
use crate::transport::{RequestEnvelope, Transport};

// ============================================================================
// OData Client
// ============================================================================

/// Authenticated OData client shared by every resource facade.
///
/// Each call validates its parameters, then sends one GET, retrying
/// transient failures (429, 5xx, network) with backoff until the
/// configured budget runs out. The caller receives one parsed envelope or
/// one [`ApiError`]. Dropping the returned future cancels the attempt and
/// any pending backoff.
#[derive(Clone)]
pub struct ODataClient {
    config: Arc<ClientConfig>,
    transport: Arc<dyn Transport>,
    retry: RetryStrategy,
}

impl std::fmt::Debug for ODataClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ODataClient")
            .field("config", &self.config)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl ODataClient {
    /// Creates a client using the `reqwest` transport.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Creates a client with a custom transport.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        let retry = config.retry_strategy();
        Self {
            config: Arc::new(config),
            transport,
            retry,
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the retry strategy.
    pub fn retry_strategy(&self) -> &RetryStrategy {
        &self.retry
    }

    /// Lists records of `entity_set`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for invalid parameters without
    /// sending anything, or the mapped error of the final attempt.
    pub async fn get_collection(
        &self,
        entity_set: &str,
        params: &QueryParameters,
    ) -> Result<ResponseEnvelope, ApiError> {
        params.validate(self.config.max_top())?;

        let mut url = self.entity_url(entity_set)?;
        let query = params.to_query_string();
        if !query.is_empty() {
            url.set_query(Some(&query));
        }

        self.execute(url, BodyShape::Collection).await
    }

    /// Fetches one record by key with `<EntitySet>('<key>')`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the service returns 404 or an empty
    /// `value`.
    pub async fn get_by_key(&self, entity_set: &str, key: &str) -> Result<Record, ApiError> {
        let segment = format!("{entity_set}({})", filter::quote(key));
        let url = self.entity_url(&segment)?;

        let envelope = self.execute(url, BodyShape::Entity).await?;
        parser::single_record(envelope, &format!("{entity_set} '{key}'"))
    }

    /// Fetches the page at an `@odata.nextLink`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if the link is not an absolute URL
    /// on the configured service's scheme, host, and port.
    pub async fn get_next_link(&self, link: &str) -> Result<ResponseEnvelope, ApiError> {
        let url = Url::parse(link)
            .map_err(|e| ApiError::validation(format!("Invalid next link '{link}': {e}")))?;
        self.check_same_origin(&url)?;

        self.execute(url, BodyShape::Collection).await
    }

    fn entity_url(&self, segment: &str) -> Result<Url, ApiError> {
        let mut url = self.config.base_url().clone();
        url.set_query(None);
        url.path_segments_mut()
            .map_err(|()| {
                ApiError::from(TransportError::InvalidUrl(format!(
                    "Base URL cannot have path segments: {}",
                    self.config.base_url()
                )))
            })?
            .pop_if_empty()
            .push(segment);
        Ok(url)
    }

    fn check_same_origin(&self, url: &Url) -> Result<(), ApiError> {
        let base = self.config.base_url();
        let same = url.scheme() == base.scheme()
            && url.host_str() == base.host_str()
            && url.port_or_known_default() == base.port_or_known_default();

        if same {
            Ok(())
        } else {
            Err(ApiError::validation(format!(
                "Next link points outside the configured service: {}",
                url.origin().ascii_serialization()
            )))
        }
    }

    #[instrument(skip(self, url), fields(url = %url))]
    async fn execute(&self, url: Url, shape: BodyShape) -> Result<ResponseEnvelope, ApiError> {
        let request = RequestEnvelope::get(url, self.config.bearer_token().clone());
        let timeout = self.config.timeout();
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            debug!(attempt, "Sending request");

            let sent = tokio::time::timeout(timeout, self.transport.send(&request)).await;
            let (error, transient) = match sent {
                Ok(Ok(response)) if response.is_success() => {
                    let envelope = parser::parse_body(&response.body, shape)?;
                    debug!(status = response.status, records = envelope.len(), "Request succeeded");
                    return Ok(envelope);
                }
                Ok(Ok(response)) => (
                    mapper::error_for_response(&response),
                    mapper::is_transient_status(response.status),
                ),
                Ok(Err(err)) => (ApiError::from(err), true),
                Err(_) => (ApiError::from(TransportError::Timeout(timeout)), true),
            };

            if !transient || !self.retry.can_retry(attempt) {
                debug!(attempt, error = %error, "Request failed");
                return Err(error);
            }

            let delay = self.retry.delay_for(&error, attempt);
            warn!(
                attempt,
                error = %error,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                "Transient failure, retrying"
            );
            tokio::time::sleep(delay).await;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::HttpResponse;
    use crate::transport::mock::ScriptedTransport;
    use serde_json::json;
    use wfrmls_core::ErrorKind;

    fn client_with(transport: &Arc<ScriptedTransport>) -> ODataClient {
        let config = ClientConfig::builder()
            .bearer_token("test-token")
            .base_url("https://api.example.com/reso/odata")
            .build_with_env(|_| None)
            .unwrap();
        ODataClient::with_transport(config, transport.clone())
    }

    #[tokio::test]
    async fn test_collection_url_and_auth_header() {
        let transport = Arc::new(ScriptedTransport::new().then_json(200, &json!({"value": []})));
        let client = client_with(&transport);

        let params = QueryParameters::new().top(5).filter("City eq 'Provo'");
        client.get_collection("Property", &params).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].authorization, "Bearer test-token");
        assert_eq!(
            requests[0].url.as_str(),
            "https://api.example.com/reso/odata/Property?%24top=5&%24filter=City+eq+%27Provo%27"
        );
    }

    #[tokio::test]
    async fn test_no_query_string_without_parameters() {
        let transport = Arc::new(ScriptedTransport::new().then_json(200, &json!({"value": []})));
        let client = client_with(&transport);

        client.get_collection("Member", &QueryParameters::new()).await.unwrap();
        assert_eq!(
            transport.last_url().unwrap().as_str(),
            "https://api.example.com/reso/odata/Member"
        );
    }

    #[tokio::test]
    async fn test_get_by_key_uses_quoted_path_segment() {
        let transport = Arc::new(
            ScriptedTransport::new().then_json(200, &json!({"MemberKey": "O'Neil 1"})),
        );
        let client = client_with(&transport);

        let record = client.get_by_key("Member", "O'Neil 1").await.unwrap();
        assert_eq!(record["MemberKey"], "O'Neil 1");
        assert_eq!(
            transport.last_url().unwrap().path(),
            "/reso/odata/Member('O''Neil%201')"
        );
    }

    #[tokio::test]
    async fn test_next_link_must_stay_on_service() {
        let transport = Arc::new(ScriptedTransport::always(HttpResponse::json(200, &json!({"value": []}))));
        let client = client_with(&transport);

        let err = client
            .get_next_link("https://evil.example.net/reso/odata/Property?$skip=200")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err = client
            .get_next_link("http://api.example.com/reso/odata/Property?$skip=200")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(transport.calls(), 0);

        client
            .get_next_link("https://api.example.com/reso/odata/Property?$skip=200")
            .await
            .unwrap();
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_not_retried() {
        let transport = Arc::new(ScriptedTransport::always(HttpResponse::new(200, "<html>")));
        let client = client_with(&transport);

        let err = client
            .get_collection("Office", &QueryParameters::new())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Server);
        assert_eq!(transport.calls(), 1);
    }
}
