//! Deletion tracking.
//!
//! The `Deleted` entity set records which keys disappeared from other
//! resources and when. Each entry names the `resource`, its `primary_key`,
//! and the deletion timestamp `ts`. Replicas poll it with
//! [`ResourceClient::sync_since`] to remove records locally.

use std::collections::BTreeMap;

use futures::future::join_all;
use tracing::{debug, instrument, warn};
use wfrmls_core::odata::filter;
use wfrmls_core::{
    ApiError, DeletedRecord, IntoSince, QueryParameters, ResourceKind, ResponseEnvelope, Since,
};

use crate::descriptor::{KeyLookup, ResourceDescriptor};
use crate::facade::{EntitySet, ResourceClient};

/// `Deleted` entity set.
#[derive(Debug, Clone, Copy)]
pub struct Deleted;

impl EntitySet for Deleted {
    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor::new(ResourceKind::Deleted, "primary_key")
        .modification_field(Some("ts"))
        .key_lookup(KeyLookup::Filter)
        .description("Deletion tracking");
}

/// Client for deletion records.
pub type DeletedClient = ResourceClient<Deleted>;

/// Resources checked by a typical replica sync.
pub const DEFAULT_SYNC_RESOURCES: &[ResourceKind] = &[
    ResourceKind::Property,
    ResourceKind::Member,
    ResourceKind::Office,
    ResourceKind::Media,
    ResourceKind::OpenHouse,
];

const RESOURCE_FIELD: &str = "resource";

// ============================================================================
// Deletion Sync
// ============================================================================

/// Deletions across several resources since one cutoff.
///
/// A failure for one resource does not hide the others: each resource
/// keeps its own result.
#[derive(Debug)]
pub struct DeletionSync {
    /// Cutoff used for every resource.
    pub since: Since,
    /// Per-resource outcome.
    pub by_resource: BTreeMap<ResourceKind, Result<Vec<DeletedRecord>, ApiError>>,
}

impl DeletionSync {
    /// Returns the number of deletions fetched successfully.
    pub fn total(&self) -> usize {
        self.by_resource
            .values()
            .filter_map(|result| result.as_ref().ok())
            .map(Vec::len)
            .sum()
    }

    /// Iterates every deletion fetched successfully.
    pub fn records(&self) -> impl Iterator<Item = &DeletedRecord> {
        self.by_resource
            .values()
            .filter_map(|result| result.as_ref().ok())
            .flatten()
    }

    /// Iterates the resources that failed, with their errors.
    pub fn failures(&self) -> impl Iterator<Item = (ResourceKind, &ApiError)> {
        self.by_resource
            .iter()
            .filter_map(|(kind, result)| result.as_ref().err().map(|err| (*kind, err)))
    }

    /// Returns true if every resource was fetched.
    pub fn is_complete(&self) -> bool {
        self.failures().next().is_none()
    }

    /// Returns the number of resources with at least one deletion.
    pub fn resources_with_deletions(&self) -> usize {
        self.by_resource
            .values()
            .filter(|result| result.as_ref().is_ok_and(|records| !records.is_empty()))
            .count()
    }
}

// ============================================================================
// Convenience Methods
// ============================================================================

impl ResourceClient<Deleted> {
    /// Lists deletions from one resource.
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::list`].
    pub async fn by_resource(
        &self,
        resource: impl AsRef<str>,
        params: QueryParameters,
    ) -> Result<ResponseEnvelope, ApiError> {
        self.get_by(RESOURCE_FIELD, resource.as_ref(), params).await
    }

    /// Lists deletions after `since`, optionally from one resource only.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if `since` cannot be parsed.
    pub async fn since(
        &self,
        since: impl IntoSince,
        resource: Option<&str>,
        params: QueryParameters,
    ) -> Result<ResponseEnvelope, ApiError> {
        let since = since.into_since()?;
        let predicate = match resource {
            Some(name) => format!("{} and {}", since.after("ts"), filter::eq(RESOURCE_FIELD, name)),
            None => since.after("ts"),
        };

        self.filtered(&predicate, params).await
    }

    /// Like [`ResourceClient::since`], parsed into [`DeletedRecord`]s.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Server`] if an entry is malformed.
    pub async fn records_since(
        &self,
        since: impl IntoSince,
        resource: Option<&str>,
        params: QueryParameters,
    ) -> Result<Vec<DeletedRecord>, ApiError> {
        let envelope = self.since(since, resource, params).await?;
        DeletedRecord::from_records(&envelope.value)
    }

    /// Fetches deletions for each resource concurrently.
    ///
    /// `params` applies to every per-resource request. Use
    /// [`DEFAULT_SYNC_RESOURCES`] for the usual set.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if `since` cannot be parsed.
    /// Per-resource failures are kept in the result.
    #[instrument(skip(self, since, params))]
    pub async fn sync_since(
        &self,
        since: impl IntoSince,
        resources: &[ResourceKind],
        params: QueryParameters,
    ) -> Result<DeletionSync, ApiError> {
        let since = since.into_since()?;

        let requests = resources.iter().map(|kind| {
            let params = params.clone();
            async move {
                let result = self.records_since(since, Some(kind.as_str()), params).await;
                (*kind, result)
            }
        });

        let mut by_resource = BTreeMap::new();
        for (kind, result) in join_all(requests).await {
            if let Err(err) = &result {
                warn!(resource = %kind, error = %err, "Deletion sync failed for resource");
            }
            by_resource.insert(kind, result);
        }

        let sync = DeletionSync { since, by_resource };
        debug!(total = sync.total(), complete = sync.is_complete(), "Deletion sync finished");
        Ok(sync)
    }
}
