//! Resource metadata.
//!
//! Describes the entity sets the service exposes. Not to be confused with
//! [`ResourceClient`], the facade every entity set shares.

use wfrmls_core::{ApiError, QueryParameters, ResourceKind, ResponseEnvelope};

use crate::descriptor::ResourceDescriptor;
use crate::facade::{EntitySet, ResourceClient};

/// `Resource` entity set.
#[derive(Debug, Clone, Copy)]
pub struct Resource;

impl EntitySet for Resource {
    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor::new(ResourceKind::Resource, "ResourceKey")
        .description("Resource metadata");
}

/// Client for resource metadata.
pub type ResourceMetadataClient = ResourceClient<Resource>;

impl ResourceClient<Resource> {
    /// Lists metadata for one entity set.
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::list`].
    pub async fn by_name(
        &self,
        resource_name: &str,
        params: QueryParameters,
    ) -> Result<ResponseEnvelope, ApiError> {
        self.get_by("ResourceName", resource_name, params).await
    }

    /// Lists resources mapped to a RESO standard name.
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::list`].
    pub async fn standard(&self, params: QueryParameters) -> Result<ResponseEnvelope, ApiError> {
        self.filtered("StandardName ne null", params).await
    }

    /// Lists resources with their `Fields` expanded.
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::list`].
    pub async fn with_fields(&self, params: QueryParameters) -> Result<ResponseEnvelope, ApiError> {
        self.templated(QueryParameters::new().expand("Fields"), params)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{capture_filter, capture_param, facade, page, scripted};
    use serde_json::json;

    #[tokio::test]
    async fn test_by_name_and_fields() {
        let transport = scripted(page(json!([])));
        let resources: ResourceMetadataClient = facade(&transport);

        resources.by_name("Property", QueryParameters::new()).await.unwrap();
        assert_eq!(capture_filter(&transport).as_deref(), Some("ResourceName eq 'Property'"));

        resources.with_fields(QueryParameters::new().top(1)).await.unwrap();
        assert_eq!(capture_param(&transport, "$expand").as_deref(), Some("Fields"));
        assert_eq!(capture_param(&transport, "$top").as_deref(), Some("1"));
    }
}
