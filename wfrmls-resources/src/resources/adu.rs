//! Accessory dwelling units.

use wfrmls_core::{ApiError, AduStatus, AduType, QueryParameters, ResourceKind, ResponseEnvelope};

use crate::descriptor::ResourceDescriptor;
use crate::facade::{EntitySet, ResourceClient};

/// `Adu` entity set.
#[derive(Debug, Clone, Copy)]
pub struct Adu;

impl EntitySet for Adu {
    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor::new(ResourceKind::Adu, "AduKey")
        .description("Accessory dwelling units");
}

/// Client for ADUs.
pub type AduClient = ResourceClient<Adu>;

impl ResourceClient<Adu> {
    /// Lists ADUs on a listing.
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::list`].
    pub async fn for_property(
        &self,
        listing_key: &str,
        params: QueryParameters,
    ) -> Result<ResponseEnvelope, ApiError> {
        self.get_by("ListingKey", listing_key, params).await
    }

    /// Lists ADUs of one type.
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::list`].
    pub async fn by_type(
        &self,
        adu_type: &AduType,
        params: QueryParameters,
    ) -> Result<ResponseEnvelope, ApiError> {
        self.get_by("AduType", adu_type.as_str(), params).await
    }

    /// Lists ADUs with one status.
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::list`].
    pub async fn by_status(
        &self,
        status: &AduStatus,
        params: QueryParameters,
    ) -> Result<ResponseEnvelope, ApiError> {
        self.get_by("AduStatus", status.as_str(), params).await
    }

    /// Lists existing ADUs.
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::list`].
    pub async fn existing(&self, params: QueryParameters) -> Result<ResponseEnvelope, ApiError> {
        self.by_status(&AduStatus::Existing, params).await
    }

    /// Lists permitted ADUs.
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::list`].
    pub async fn permitted(&self, params: QueryParameters) -> Result<ResponseEnvelope, ApiError> {
        self.by_status(&AduStatus::Permitted, params).await
    }

    /// Lists ADUs with their `Property` expanded.
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::list`].
    pub async fn with_property(&self, params: QueryParameters) -> Result<ResponseEnvelope, ApiError> {
        self.templated(QueryParameters::new().expand("Property"), params)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{capture_filter, facade, page, scripted};
    use serde_json::json;

    #[tokio::test]
    async fn test_by_type_uses_wire_value() {
        let transport = scripted(page(json!([])));
        let adus: AduClient = facade(&transport);

        adus.by_type(&AduType::GarageConversion, QueryParameters::new())
            .await
            .unwrap();
        assert_eq!(
            capture_filter(&transport).as_deref(),
            Some("AduType eq 'Garage Conversion'")
        );
    }

    #[tokio::test]
    async fn test_unknown_status_passes_through() {
        let transport = scripted(page(json!([])));
        let adus: AduClient = facade(&transport);

        adus.by_status(&AduStatus::from("Proposed"), QueryParameters::new())
            .await
            .unwrap();
        assert_eq!(capture_filter(&transport).as_deref(), Some("AduStatus eq 'Proposed'"));
    }
}
