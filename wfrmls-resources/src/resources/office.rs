//! Brokerage offices.

use wfrmls_core::odata::filter;
use wfrmls_core::{ApiError, OfficeStatus, QueryParameters, ResourceKind, ResponseEnvelope};

use crate::descriptor::ResourceDescriptor;
use crate::facade::{EntitySet, ResourceClient};

/// `Office` entity set.
#[derive(Debug, Clone, Copy)]
pub struct Office;

impl EntitySet for Office {
    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor::new(ResourceKind::Office, "OfficeKey")
        .description("Brokerage offices");
}

/// Client for offices.
pub type OfficeClient = ResourceClient<Office>;

impl ResourceClient<Office> {
    /// Lists active offices.
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::list`].
    pub async fn active(&self, params: QueryParameters) -> Result<ResponseEnvelope, ApiError> {
        self.get_by("OfficeStatus", OfficeStatus::Active.as_str(), params)
            .await
    }

    /// Lists offices in `city`.
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::list`].
    pub async fn by_city(
        &self,
        city: &str,
        params: QueryParameters,
    ) -> Result<ResponseEnvelope, ApiError> {
        self.get_by("OfficeCity", city, params).await
    }

    /// Lists offices in a postal code.
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::list`].
    pub async fn by_postal_code(
        &self,
        postal_code: &str,
        params: QueryParameters,
    ) -> Result<ResponseEnvelope, ApiError> {
        self.get_by("OfficePostalCode", postal_code, params).await
    }

    /// Lists offices whose name contains `name`.
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::list`].
    pub async fn search_by_name(
        &self,
        name: &str,
        params: QueryParameters,
    ) -> Result<ResponseEnvelope, ApiError> {
        self.filtered(&filter::contains("OfficeName", name), params)
            .await
    }

    /// Lists offices with their `Member`s expanded.
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::list`].
    pub async fn with_members(&self, params: QueryParameters) -> Result<ResponseEnvelope, ApiError> {
        self.templated(QueryParameters::new().expand("Member"), params)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{capture_filter, capture_param, facade, page, scripted};
    use serde_json::json;

    #[tokio::test]
    async fn test_search_by_name() {
        let transport = scripted(page(json!([])));
        let offices: OfficeClient = facade(&transport);

        offices
            .search_by_name("Realty", QueryParameters::new().orderby("OfficeName"))
            .await
            .unwrap();
        assert_eq!(
            capture_filter(&transport).as_deref(),
            Some("contains(OfficeName, 'Realty')")
        );
        assert_eq!(capture_param(&transport, "$orderby").as_deref(), Some("OfficeName"));
    }

    #[tokio::test]
    async fn test_active_by_postal_code() {
        let transport = scripted(page(json!([])));
        let offices: OfficeClient = facade(&transport);

        offices
            .by_postal_code("84101", QueryParameters::new().filter("OfficeStatus eq 'Active'"))
            .await
            .unwrap();
        assert_eq!(
            capture_filter(&transport).as_deref(),
            Some("OfficePostalCode eq '84101' and OfficeStatus eq 'Active'")
        );
    }
}
