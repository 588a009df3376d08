//! End-to-end tests of `ReqwestTransport` against a mock HTTP server.

use std::time::Duration;

use httpmock::prelude::*;
use serde_json::json;
use wfrmls_core::{ErrorKind, QueryParameters};
use wfrmls_fetch::{ClientConfig, ODataClient};

fn client(server: &MockServer, max_retries: u32) -> ODataClient {
    let config = ClientConfig::builder()
        .bearer_token("http-test-token")
        .base_url(format!("{}/reso/odata", server.base_url()))
        .max_retries(max_retries)
        .retry_delay(Duration::from_millis(10))
        .timeout(Duration::from_secs(5))
        .build_with_env(|_| None)
        .unwrap();
    ODataClient::new(config).unwrap()
}

#[tokio::test]
async fn test_collection_request_on_the_wire() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/reso/odata/Property")
            .header("authorization", "Bearer http-test-token")
            .query_param("$top", "2")
            .query_param("$filter", "StandardStatus eq 'Active'")
            .query_param("$select", "ListingKey,ListPrice")
            .query_param("$count", "true");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "@odata.context": "ctx",
                "@odata.count": 2,
                "@odata.nextLink": format!("{}/reso/odata/Property?$skip=2", server.base_url()),
                "value": [
                    {"ListingKey": "1", "ListPrice": 450000},
                    {"ListingKey": "2", "ListPrice": 525000}
                ]
            }));
    });

    let params = QueryParameters::new()
        .top(2)
        .filter("StandardStatus eq 'Active'")
        .select(["ListingKey", "ListPrice"])
        .count(true);
    let envelope = client(&server, 0)
        .get_collection("Property", &params)
        .await
        .unwrap();

    mock.assert_calls(1);
    assert_eq!(envelope.len(), 2);
    assert_eq!(envelope.odata_count, Some(2));
    assert!(envelope.has_next_page());
}

#[tokio::test]
async fn test_entity_by_key() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/reso/odata/Member('42')");
        then.status(200).json_body(json!({
            "@odata.context": "ctx/$entity",
            "MemberKey": "42",
            "MemberFirstName": "Jane"
        }));
    });

    let record = client(&server, 0).get_by_key("Member", "42").await.unwrap();

    mock.assert_calls(1);
    assert_eq!(record["MemberFirstName"], "Jane");
    assert!(!record.contains_key("@odata.context"));
}

#[tokio::test]
async fn test_follows_next_link() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/reso/odata/Office")
            .query_param("$skip", "200");
        then.status(200).json_body(json!({"value": [{"OfficeKey": "7"}]}));
    });

    let link = format!("{}/reso/odata/Office?$skip=200", server.base_url());
    let envelope = client(&server, 0).get_next_link(&link).await.unwrap();

    mock.assert_calls(1);
    assert_eq!(envelope.value[0]["OfficeKey"], "7");
}

#[tokio::test]
async fn test_validation_error_body() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/reso/odata/Property");
        then.status(400).json_body(json!({
            "error": {
                "code": "BadRequest",
                "message": "The query specified in the URI is not valid.",
                "details": [{"target": "$filter", "message": "Unknown property 'Foo'"}]
            }
        }));
    });

    let err = client(&server, 3)
        .get_collection("Property", &QueryParameters::new().filter("Foo eq 1"))
        .await
        .unwrap_err();

    mock.assert_calls(1);
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.status_code(), Some(400));
    assert_eq!(err.message(), "The query specified in the URI is not valid.");
    assert_eq!(err.field_errors().unwrap()["$filter"], vec!["Unknown property 'Foo'"]);
}

#[tokio::test]
async fn test_server_errors_are_retried() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/reso/odata/Lookup");
        then.status(503).body("Service Unavailable");
    });

    let err = client(&server, 2)
        .get_collection("Lookup", &QueryParameters::new())
        .await
        .unwrap_err();

    mock.assert_calls(3);
    assert_eq!(err.kind(), ErrorKind::Server);
    assert_eq!(err.message(), "Service Unavailable");
}

#[tokio::test]
async fn test_unauthorized() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/reso/odata/Property");
        then.status(401).json_body(json!({"message": "Invalid token"}));
    });

    let err = client(&server, 3)
        .get_collection("Property", &QueryParameters::new())
        .await
        .unwrap_err();

    mock.assert_calls(1);
    assert_eq!(err.kind(), ErrorKind::Authentication);
    assert_eq!(err.message(), "Invalid token");
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let base = format!("http://127.0.0.1:{port}/reso/odata");

    let config = ClientConfig::builder()
        .bearer_token("t")
        .base_url(base)
        .max_retries(0)
        .build_with_env(|_| None)
        .unwrap();
    let err = ODataClient::new(config)
        .unwrap()
        .get_collection("Property", &QueryParameters::new())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Network);
}
