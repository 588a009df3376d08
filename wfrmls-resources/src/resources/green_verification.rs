//! Green building verifications.

use wfrmls_core::{ApiError, GreenVerificationType, QueryParameters, ResourceKind, ResponseEnvelope};

use crate::descriptor::ResourceDescriptor;
use crate::facade::{EntitySet, ResourceClient};

/// `PropertyGreenVerification` entity set.
#[derive(Debug, Clone, Copy)]
pub struct GreenVerification;

impl EntitySet for GreenVerification {
    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor::new(
        ResourceKind::PropertyGreenVerification,
        "GreenBuildingVerificationKey",
    )
    .description("Green building verifications");
}

/// Client for green verifications.
pub type GreenVerificationClient = ResourceClient<GreenVerification>;

impl ResourceClient<GreenVerification> {
    /// Lists verifications of a listing.
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

    /// Lists verifications of one program.
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::list`].
    pub async fn by_type(
        &self,
        verification_type: &GreenVerificationType,
        params: QueryParameters,
    ) -> Result<ResponseEnvelope, ApiError> {
        self.get_by("GreenVerificationType", verification_type.as_str(), params)
            .await
    }
}
