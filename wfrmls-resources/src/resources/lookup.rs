//! Lookup (enumeration) values.
//!
//! Lookups describe the allowed values of enumerated fields, grouped by
//! `LookupName` (for example `PropertyType` or `StandardStatus`).

use wfrmls_core::{ApiError, QueryParameters, ResourceKind, ResponseEnvelope};

use crate::descriptor::ResourceDescriptor;
use crate::facade::{EntitySet, ResourceClient};

/// `Lookup` entity set.
#[derive(Debug, Clone, Copy)]
pub struct Lookup;

impl EntitySet for Lookup {
    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor::new(ResourceKind::Lookup, "LookupKey")
        .description("Enumeration values");
}

/// Client for lookups.
pub type LookupClient = ResourceClient<Lookup>;

impl ResourceClient<Lookup> {
    /// Lists the values of one lookup.
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::list`].
    pub async fn by_name(
        &self,
        lookup_name: &str,
        params: QueryParameters,
    ) -> Result<ResponseEnvelope, ApiError> {
        self.get_by("LookupName", lookup_name, params).await
    }

    /// Lists `PropertyType` values.
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::list`].
    pub async fn property_types(&self, params: QueryParameters) -> Result<ResponseEnvelope, ApiError> {
        self.by_name("PropertyType", params).await
    }

    /// Lists `PropertyStatus` values.
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::list`].
    pub async fn property_statuses(
        &self,
        params: QueryParameters,
    ) -> Result<ResponseEnvelope, ApiError> {
        self.by_name("PropertyStatus", params).await
    }

    /// Lists values mapped to a RESO standard value.
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::list`].
    pub async fn standard(&self, params: QueryParameters) -> Result<ResponseEnvelope, ApiError> {
        self.filtered("StandardLookupValue ne null", params).await
    }

    /// Lists enabled values.
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::list`].
    pub async fn active_values(&self, params: QueryParameters) -> Result<ResponseEnvelope, ApiError> {
        self.filtered("IsActive eq true", params).await
    }

    /// Lists lookup names only, sorted.
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::list`].
    pub async fn names(&self, params: QueryParameters) -> Result<ResponseEnvelope, ApiError> {
        let template = QueryParameters::new()
            .select("LookupName")
            .orderby("LookupName asc");
        self.templated(template, params).await
    }
}
