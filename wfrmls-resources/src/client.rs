//! Top-level WFRMLS client.

use std::fmt;
use std::sync::{Arc, OnceLock};

use tracing::debug;
use wfrmls_core::ApiError;
use wfrmls_fetch::{ClientConfig, ODataClient, Transport};

use crate::facade::{EntitySet, ResourceClient};
use crate::resources::{
    AduClient, DataSystemClient, DeletedClient, GreenVerificationClient, HistoryClient,
    LookupClient, MediaClient, MemberClient, OfficeClient, OpenHouseClient, PropertyClient,
    PropertyUnitTypesClient, ResourceMetadataClient,
};

// ============================================================================
// WFRMLS Client
// ============================================================================

/// Entry point to every WFRMLS resource.
///
/// Resource facades are created on first use and then reused. All of them
/// share one configuration and one connection pool, and the client may be
/// used from many tasks at once.
pub struct WfrmlsClient {
    odata: ODataClient,
    property: OnceLock<PropertyClient>,
    member: OnceLock<MemberClient>,
    office: OnceLock<OfficeClient>,
    openhouse: OnceLock<OpenHouseClient>,
    lookup: OnceLock<LookupClient>,
    adu: OnceLock<AduClient>,
    deleted: OnceLock<DeletedClient>,
    data_system: OnceLock<DataSystemClient>,
    resource: OnceLock<ResourceMetadataClient>,
    property_unit_types: OnceLock<PropertyUnitTypesClient>,
    media: OnceLock<MediaClient>,
    history: OnceLock<HistoryClient>,
    green_verification: OnceLock<GreenVerificationClient>,
}

impl fmt::Debug for WfrmlsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WfrmlsClient")
            .field("odata", &self.odata)
            .finish_non_exhaustive()
    }
}

impl WfrmlsClient {
    /// Creates a client from the environment, `.env`, and the default
    /// config file.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Authentication`] if no bearer token is
    /// configured, or [`ApiError::Validation`] for invalid settings.
    pub fn new() -> Result<Self, ApiError> {
        Self::from_config(ClientConfig::from_env()?)
    }

    /// Creates a client from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] if the HTTP client cannot be built.
    pub fn from_config(config: ClientConfig) -> Result<Self, ApiError> {
        Ok(Self::from_odata(ODataClient::new(config)?))
    }

    /// Creates a client with a custom transport.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self::from_odata(ODataClient::with_transport(config, transport))
    }

    fn from_odata(odata: ODataClient) -> Self {
        debug!(base_url = %odata.config().base_url(), "Created WFRMLS client");
        Self {
            odata,
            property: OnceLock::new(),
            member: OnceLock::new(),
            office: OnceLock::new(),
            openhouse: OnceLock::new(),
            lookup: OnceLock::new(),
            adu: OnceLock::new(),
            deleted: OnceLock::new(),
            data_system: OnceLock::new(),
            resource: OnceLock::new(),
            property_unit_types: OnceLock::new(),
            media: OnceLock::new(),
            history: OnceLock::new(),
            green_verification: OnceLock::new(),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ClientConfig {
        self.odata.config()
    }

    /// Returns the shared OData client.
    pub fn odata(&self) -> &ODataClient {
        &self.odata
    }

    fn facade<'a, R: EntitySet>(
        &self,
        cell: &'a OnceLock<ResourceClient<R>>,
    ) -> &'a ResourceClient<R> {
        cell.get_or_init(|| ResourceClient::new(self.odata.clone()))
    }

    /// Property listings.
    pub fn property(&self) -> &PropertyClient {
        self.facade(&self.property)
    }

    /// Agents and brokers.
    pub fn member(&self) -> &MemberClient {
        self.facade(&self.member)
    }

    /// Brokerage offices.
    pub fn office(&self) -> &OfficeClient {
        self.facade(&self.office)
    }

    /// Open houses.
    pub fn openhouse(&self) -> &OpenHouseClient {
        self.facade(&self.openhouse)
    }

    /// Lookup values.
    pub fn lookup(&self) -> &LookupClient {
        self.facade(&self.lookup)
    }

    /// Accessory dwelling units.
    pub fn adu(&self) -> &AduClient {
        self.facade(&self.adu)
    }

    /// Deletion records.
    pub fn deleted(&self) -> &DeletedClient {
        self.facade(&self.deleted)
    }

    /// Data system metadata.
    pub fn data_system(&self) -> &DataSystemClient {
        self.facade(&self.data_system)
    }

    /// Resource metadata.
    pub fn resource(&self) -> &ResourceMetadataClient {
        self.facade(&self.resource)
    }

    /// Property unit types.
    pub fn property_unit_types(&self) -> &PropertyUnitTypesClient {
        self.facade(&self.property_unit_types)
    }

    /// Listing media.
    pub fn media(&self) -> &MediaClient {
        self.facade(&self.media)
    }

    /// Historical transactions.
    pub fn history(&self) -> &HistoryClient {
        self.facade(&self.history)
    }

    /// Green building verifications.
    pub fn green_verification(&self) -> &GreenVerificationClient {
        self.facade(&self.green_verification)
    }
}
