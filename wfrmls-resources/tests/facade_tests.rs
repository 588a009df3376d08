//! Facade behavior through the top-level client.

use std::sync::Arc;

use serde_json::json;
use wfrmls_core::{ErrorKind, QueryParameters, ResourceKind};
use wfrmls_fetch::transport::mock::ScriptedTransport;
use wfrmls_fetch::{ClientConfig, HttpResponse};
use wfrmls_resources::resources::DEFAULT_SYNC_RESOURCES;
use wfrmls_resources::{ResourceRegistry, WfrmlsClient};

fn client(transport: &Arc<ScriptedTransport>) -> WfrmlsClient {
    let config = ClientConfig::builder()
        .bearer_token("facade-token")
        .base_url("https://resoapi.example.com/reso/odata")
        .max_retries(0)
        .build_with_env(|_| None)
        .unwrap();
    WfrmlsClient::with_transport(config, transport.clone())
}

fn sent_param(transport: &ScriptedTransport, key: &str) -> Option<String> {
    transport
        .last_url()?
        .query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

#[tokio::test]
async fn test_existing_adus_keep_caller_filter() {
    let transport = Arc::new(ScriptedTransport::always(HttpResponse::json(
        200,
        &json!({"value": []}),
    )));
    let client = client(&transport);

    client
        .adu()
        .existing(QueryParameters::new().filter("PropertyKey eq '1'"))
        .await
        .unwrap();

    let filter = sent_param(&transport, "$filter").unwrap();
    assert!(filter.contains("AduStatus eq 'Existing'"), "filter: {filter}");
    assert!(filter.contains("PropertyKey eq '1'"), "filter: {filter}");
    assert_eq!(filter, "AduStatus eq 'Existing' and PropertyKey eq '1'");
}

#[tokio::test]
async fn test_get_unwraps_single_entity() {
    let transport = Arc::new(ScriptedTransport::new().then_json(
        200,
        &json!({
            "@odata.context": "https://resoapi.example.com/reso/odata/$metadata#Property/$entity",
            "ListingKey": "1611952",
            "ListPrice": 450000
        }),
    ));
    let client = client(&transport);

    let record = client.property().get("1611952").await.unwrap();
    assert_eq!(record["ListingKey"], "1611952");
    assert_eq!(record["ListPrice"], 450_000);
    assert_eq!(
        transport.last_url().unwrap().path(),
        "/reso/odata/Property('1611952')"
    );
}

#[tokio::test]
async fn test_get_on_empty_value_is_not_found() {
    let transport = Arc::new(ScriptedTransport::always(HttpResponse::json(
        200,
        &json!({"value": []}),
    )));
    let client = client(&transport);

    let err = client.office().get("missing").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_deleted_get_uses_filter_lookup() {
    let transport = Arc::new(ScriptedTransport::always(HttpResponse::json(
        200,
        &json!({"value": [{"resource": "Property", "primary_key": "9", "ts": "2024-01-15T00:00:00Z"}]}),
    )));
    let client = client(&transport);

    let record = client.deleted().get("9").await.unwrap();
    assert_eq!(record["primary_key"], "9");
    assert_eq!(transport.last_url().unwrap().path(), "/reso/odata/Deleted");
    assert_eq!(sent_param(&transport, "$filter").as_deref(), Some("primary_key eq '9'"));
}

#[test]
fn test_missing_token_fails_at_construction() {
    let err = ClientConfig::builder()
        .base_url("https://resoapi.example.com/reso/odata")
        .build_with_env(|_| None)
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Authentication);
    assert_eq!(err.status_code(), None);
}

#[test]
fn test_accessors_are_memoized() {
    let transport = Arc::new(ScriptedTransport::new());
    let client = client(&transport);

    assert!(std::ptr::eq(client.property(), client.property()));
    assert!(std::ptr::eq(client.deleted(), client.deleted()));
    assert_eq!(client.media().descriptor().kind, ResourceKind::Media);
    assert_eq!(client.history().descriptor().entity_set, "HistoryTransactional");
}

#[test]
fn test_accessors_match_registry() {
    let transport = Arc::new(ScriptedTransport::new());
    let client = client(&transport);

    let descriptors = [
        client.property().descriptor(),
        client.member().descriptor(),
        client.office().descriptor(),
        client.openhouse().descriptor(),
        client.lookup().descriptor(),
        client.adu().descriptor(),
        client.deleted().descriptor(),
        client.data_system().descriptor(),
        client.resource().descriptor(),
        client.property_unit_types().descriptor(),
        client.media().descriptor(),
        client.history().descriptor(),
        client.green_verification().descriptor(),
    ];

    assert_eq!(descriptors.len(), ResourceRegistry::count());
    for desc in descriptors {
        assert_eq!(ResourceRegistry::get(desc.kind), Some(&desc));
    }
}

#[tokio::test]
async fn test_collect_pages_follows_links() {
    let next = "https://resoapi.example.com/reso/odata/Member?$top=2&$skip=2";
    let transport = Arc::new(
        ScriptedTransport::new()
            .then_json(
                200,
                &json!({
                    "@odata.count": 3,
                    "@odata.nextLink": next,
                    "value": [{"MemberKey": "1"}, {"MemberKey": "2"}]
                }),
            )
            .then_json(200, &json!({"value": [{"MemberKey": "3"}]})),
    );
    let client = client(&transport);

    let result = client
        .member()
        .collect_pages(QueryParameters::new().top(2), 10)
        .await
        .unwrap();

    assert_eq!(result.pages_fetched, 2);
    assert_eq!(result.value.len(), 3);
    assert_eq!(result.odata_count, Some(3));
    assert_eq!(result.last_next_link, None);
    assert_eq!(transport.requests()[1].url.as_str(), next);
}

#[tokio::test]
async fn test_collect_pages_stops_at_bound() {
    let next = "https://resoapi.example.com/reso/odata/Property?$skip=1";
    let transport = Arc::new(ScriptedTransport::always(HttpResponse::json(
        200,
        &json!({"@odata.nextLink": next, "value": [{"ListingKey": "1"}]}),
    )));
    let client = client(&transport);

    let result = client
        .property()
        .collect_pages(QueryParameters::new().top(1), 2)
        .await
        .unwrap();

    assert_eq!(result.pages_fetched, 2);
    assert!(result.is_truncated());
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn test_deletion_sync_keeps_partial_failures() {
    let ok = HttpResponse::json(
        200,
        &json!({"value": [{"resource": "Property", "primary_key": 1, "ts": "2024-01-15T08:00:00"}]}),
    );
    let transport = Arc::new(
        ScriptedTransport::new()
            .then(ok.clone())
            .then(HttpResponse::new(500, "boom"))
            .then(ok),
    );
    let client = client(&transport);

    let sync = client
        .deleted()
        .sync_since(
            "2024-01-01",
            &[ResourceKind::Property, ResourceKind::Member, ResourceKind::Office],
            QueryParameters::new(),
        )
        .await
        .unwrap();

    assert_eq!(transport.calls(), 3);
    assert_eq!(sync.by_resource.len(), 3);
    assert_eq!(sync.total(), 2);
    assert_eq!(sync.failures().count(), 1);
    assert_eq!(sync.failures().next().unwrap().1.kind(), ErrorKind::Server);
    assert!(DEFAULT_SYNC_RESOURCES.contains(&ResourceKind::Property));
}
