//! Retry and error-mapping behavior against a scripted transport.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use wfrmls_core::{ErrorKind, QueryParameters};
use wfrmls_fetch::transport::mock::ScriptedTransport;
use wfrmls_fetch::{
    ClientConfig, HttpResponse, ODataClient, RequestEnvelope, Transport, TransportError,
};

fn client(transport: &Arc<ScriptedTransport>, max_retries: u32) -> ODataClient {
    let config = ClientConfig::builder()
        .bearer_token("test-token")
        .base_url("https://resoapi.example.com/reso/odata")
        .max_retries(max_retries)
        .build_with_env(|_| None)
        .unwrap();
    ODataClient::with_transport(config, transport.clone())
}

fn page() -> serde_json::Value {
    json!({
        "@odata.context": "https://resoapi.example.com/reso/odata/$metadata#Property",
        "value": [{"ListingKey": "1611952"}]
    })
}

#[tokio::test(start_paused = true)]
async fn test_rate_limit_honors_retry_after() {
    let transport = Arc::new(
        ScriptedTransport::new()
            .then(HttpResponse::new(429, "").with_header("Retry-After", "2"))
            .then_json(200, &page()),
    );
    let client = client(&transport, 3);

    let envelope = client
        .get_collection("Property", &QueryParameters::new())
        .await
        .unwrap();
    assert_eq!(envelope.len(), 1);

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    let waited = requests[1].at - requests[0].at;
    assert!(waited >= Duration::from_secs(2), "waited {waited:?}");
    assert!(waited < Duration::from_secs(3), "waited {waited:?}");
}

#[tokio::test(start_paused = true)]
async fn test_server_error_exhausts_retry_budget() {
    let transport = Arc::new(ScriptedTransport::always(HttpResponse::json(
        500,
        &json!({"message": "Internal error"}),
    )));
    let client = client(&transport, 3);

    let err = client
        .get_collection("Property", &QueryParameters::new())
        .await
        .unwrap_err();

    assert_eq!(transport.calls(), 4);
    assert_eq!(err.kind(), ErrorKind::Server);
    assert_eq!(err.status_code(), Some(500));
    assert_eq!(err.message(), "Internal error");
}

#[tokio::test(start_paused = true)]
async fn test_backoff_doubles_between_attempts() {
    let transport = Arc::new(ScriptedTransport::always(HttpResponse::new(503, "")));
    let client = client(&transport, 3);

    client
        .get_collection("Member", &QueryParameters::new())
        .await
        .unwrap_err();

    let at: Vec<_> = transport.requests().iter().map(|r| r.at).collect();
    let gaps: Vec<Duration> = at.windows(2).map(|w| w[1] - w[0]).collect();
    assert_eq!(gaps.len(), 3);
    for (gap, base) in gaps.iter().zip([1u64, 2, 4]) {
        let base = Duration::from_secs(base);
        assert!(*gap >= base && *gap <= base.mul_f64(1.25), "gap {gap:?}");
    }
}

#[tokio::test(start_paused = true)]
async fn test_rate_limit_surfaces_after_budget() {
    let transport = Arc::new(ScriptedTransport::always(
        HttpResponse::new(429, "").with_header("Retry-After", "1"),
    ));
    let client = client(&transport, 2);

    let err = client
        .get_collection("Office", &QueryParameters::new())
        .await
        .unwrap_err();

    assert_eq!(transport.calls(), 3);
    assert_eq!(err.kind(), ErrorKind::RateLimit);
    assert_eq!(err.retry_after(), Some(Duration::from_secs(1)));
}

#[tokio::test]
async fn test_not_found_is_not_retried() {
    let transport = Arc::new(ScriptedTransport::always(HttpResponse::new(404, "")));
    let client = client(&transport, 3);

    let err = client.get_by_key("Property", "missing").await.unwrap_err();

    assert_eq!(transport.calls(), 1);
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.status_code(), Some(404));
}

#[tokio::test]
async fn test_client_errors_are_not_retried() {
    for (status, kind) in [
        (400, ErrorKind::Validation),
        (401, ErrorKind::Authentication),
        (403, ErrorKind::Authentication),
    ] {
        let transport = Arc::new(ScriptedTransport::always(HttpResponse::new(status, "")));
        let client = client(&transport, 3);

        let err = client
            .get_collection("Property", &QueryParameters::new())
            .await
            .unwrap_err();
        assert_eq!(transport.calls(), 1, "status {status}");
        assert_eq!(err.kind(), kind);
    }
}

#[tokio::test]
async fn test_top_above_maximum_sends_nothing() {
    let transport = Arc::new(ScriptedTransport::always(HttpResponse::json(200, &page())));
    let client = client(&transport, 3);

    let err = client
        .get_collection("Property", &QueryParameters::new().top(201))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(transport.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_network_error_then_success() {
    let transport = Arc::new(
        ScriptedTransport::new()
            .then_error(TransportError::Connect("connection refused".to_string()))
            .then_json(200, &page()),
    );
    let client = client(&transport, 3);

    let envelope = client
        .get_collection("Property", &QueryParameters::new())
        .await
        .unwrap();
    assert_eq!(envelope.len(), 1);
    assert_eq!(transport.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_network_error_exhausts_budget() {
    let transport = Arc::new(ScriptedTransport::new());
    let client = client(&transport, 1);

    let err = client
        .get_collection("Property", &QueryParameters::new())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Network);
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn test_empty_value_on_key_lookup_is_not_found() {
    let transport = Arc::new(ScriptedTransport::always(HttpResponse::json(
        200,
        &json!({"value": []}),
    )));
    let client = client(&transport, 3);

    let err = client.get_by_key("Member", "42").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.status_code(), None);
}

/// Never answers the first `stalls` requests, then serves a page.
struct StallingTransport {
    stalls: usize,
    calls: AtomicUsize,
}

impl StallingTransport {
    fn new(stalls: usize) -> Self {
        Self {
            stalls,
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for StallingTransport {
    async fn send(&self, _request: &RequestEnvelope) -> Result<HttpResponse, TransportError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.stalls {
            std::future::pending::<()>().await;
        }
        Ok(HttpResponse::json(200, &page()))
    }
}

fn stalling_client(transport: &Arc<StallingTransport>, max_retries: u32) -> ODataClient {
    let config = ClientConfig::builder()
        .bearer_token("test-token")
        .base_url("https://resoapi.example.com/reso/odata")
        .timeout(Duration::from_secs(5))
        .max_retries(max_retries)
        .build_with_env(|_| None)
        .unwrap();
    ODataClient::with_transport(config, transport.clone())
}

#[tokio::test(start_paused = true)]
async fn test_timed_out_attempt_is_retried() {
    let transport = Arc::new(StallingTransport::new(1));
    let client = stalling_client(&transport, 2);

    let envelope = client
        .get_collection("Property", &QueryParameters::new())
        .await
        .unwrap();

    assert_eq!(envelope.len(), 1);
    assert_eq!(transport.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_timeout_surfaces_as_network_error() {
    let transport = Arc::new(StallingTransport::new(usize::MAX));
    let client = stalling_client(&transport, 1);

    let err = client
        .get_collection("Property", &QueryParameters::new())
        .await
        .unwrap_err();

    assert_eq!(transport.calls(), 2);
    assert_eq!(err.kind(), ErrorKind::Network);
    assert!(err.message().contains("timed out"), "message: {}", err.message());
}
