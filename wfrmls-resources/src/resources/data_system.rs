//! Data system metadata.

use wfrmls_core::{ApiError, QueryParameters, ResourceKind, ResponseEnvelope};

use crate::descriptor::ResourceDescriptor;
use crate::facade::{EntitySet, ResourceClient};

/// `DataSystem` entity set.
#[derive(Debug, Clone, Copy)]
pub struct DataSystem;

impl EntitySet for DataSystem {
    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor::new(ResourceKind::DataSystem, "DataSystemKey")
        .description("Data system metadata");
}

/// Client for data system metadata.
pub type DataSystemClient = ResourceClient<DataSystem>;

impl ResourceClient<DataSystem> {
    /// Returns the first few data systems, enough to describe the service.
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::list`].
    pub async fn system_info(&self) -> Result<ResponseEnvelope, ApiError> {
        self.list(QueryParameters::new().top(10)).await
    }
}
