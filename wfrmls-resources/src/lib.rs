// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # WFRMLS Resources
//!
//! Typed facades over the WFRMLS RESO OData entity sets.
//!
//! Every entity set is described by a static [`ResourceDescriptor`] and
//! served by the generic [`ResourceClient`], which provides listing, key
//! lookup, filtering, incremental sync, and pagination. Per-resource
//! modules in [`resources`] add convenience methods whose filter
//! templates are combined with the caller's own filter using `and`.
//!
//! ## Supported Resources (13 total)
//!
//! | Resource | Key | Accessor |
//! |----------|-----|----------|
//! | Property | `ListingKey` | [`WfrmlsClient::property`] |
//! | Member | `MemberKey` | [`WfrmlsClient::member`] |
//! | Office | `OfficeKey` | [`WfrmlsClient::office`] |
//! | OpenHouse | `OpenHouseKey` | [`WfrmlsClient::openhouse`] |
//! | Lookup | `LookupKey` | [`WfrmlsClient::lookup`] |
//! | Adu | `AduKey` | [`WfrmlsClient::adu`] |
//! | Deleted | `primary_key` | [`WfrmlsClient::deleted`] |
//! | DataSystem | `DataSystemKey` | [`WfrmlsClient::data_system`] |
//! | Resource | `ResourceKey` | [`WfrmlsClient::resource`] |
//! | PropertyUnitTypes | `UnitTypeKey` | [`WfrmlsClient::property_unit_types`] |
//! | Media | `MediaKey` | [`WfrmlsClient::media`] |
//! | HistoryTransactional | `HistoryTransactionalKey` | [`WfrmlsClient::history`] |
//! | PropertyGreenVerification | `GreenBuildingVerificationKey` | [`WfrmlsClient::green_verification`] |
//!
//! ## Usage
//!
//! ```ignore
//! use wfrmls_core::QueryParameters;
//! use wfrmls_resources::WfrmlsClient;
//!
//! let client = WfrmlsClient::new()?;
//!
//! let active = client
//!     .property()
//!     .active(QueryParameters::new().filter("City eq 'Provo'").top(50))
//!     .await?;
//!
//! let mut pages = client.member().pages(QueryParameters::new().top(200));
//! while let Some(page) = pages.next().await? {
//!     println!("{} members", page.len());
//! }
//! ```

pub mod client;
pub mod descriptor;
pub mod facade;
pub mod pager;
pub mod registry;
pub mod resources;

// Re-export key types at crate root
pub use client::WfrmlsClient;
pub use descriptor::{KeyLookup, ResourceDescriptor};
pub use facade::{EntitySet, ResourceClient};
pub use pager::{PagedResult, Pager};
pub use registry::ResourceRegistry;

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use serde_json::{Value, json};
    use wfrmls_fetch::transport::mock::ScriptedTransport;
    use wfrmls_fetch::{ClientConfig, HttpResponse, ODataClient};

    use crate::facade::{EntitySet, ResourceClient};

    pub fn page(records: Value) -> HttpResponse {
        HttpResponse::json(200, &json!({"value": records}))
    }

    pub fn scripted(response: HttpResponse) -> Arc<ScriptedTransport> {
        Arc::new(ScriptedTransport::always(response))
    }

    pub fn facade<R: EntitySet>(transport: &Arc<ScriptedTransport>) -> ResourceClient<R> {
        let config = ClientConfig::builder()
            .bearer_token("test-token")
            .base_url("https://api.example.com/reso/odata")
            .max_retries(0)
            .build_with_env(|_| None)
            .unwrap();
        ResourceClient::new(ODataClient::with_transport(config, transport.clone()))
    }

    pub fn capture_param(transport: &ScriptedTransport, key: &str) -> Option<String> {
        transport
            .last_url()?
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    pub fn capture_filter(transport: &ScriptedTransport) -> Option<String> {
        capture_param(transport, "$filter")
    }
}
