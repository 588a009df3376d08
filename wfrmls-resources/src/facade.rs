//! Generic resource facade.
//!
//! [`ResourceClient`] provides the operations every entity set shares:
//! listing, key lookup, filtering, incremental sync, and pagination. The
//! per-resource modules add convenience methods on top by implementing
//! inherent methods for `ResourceClient<TheirMarker>`.

use std::fmt;
use std::marker::PhantomData;

use tracing::{debug, instrument};
use wfrmls_core::odata::filter;
use wfrmls_core::{ApiError, IntoSince, QueryParameters, Record, ResponseEnvelope};
use wfrmls_fetch::ODataClient;
use wfrmls_fetch::parser::single_record;

use crate::descriptor::{KeyLookup, ResourceDescriptor};
use crate::pager::{PagedResult, Pager};

// ============================================================================
// Entity Set Marker
// ============================================================================

/// Marker trait tying a zero-sized type to its descriptor.
pub trait EntitySet: Send + Sync + 'static {
    /// Static description of the entity set.
    const DESCRIPTOR: ResourceDescriptor;
}

// ============================================================================
// Resource Client
// ============================================================================

/// Client for one entity set.
///
/// Cheap to clone; every clone shares the underlying [`ODataClient`].
pub struct ResourceClient<R: EntitySet> {
    client: ODataClient,
    _resource: PhantomData<fn() -> R>,
}

impl<R: EntitySet> Clone for ResourceClient<R> {
    fn clone(&self) -> Self {
        Self::new(self.client.clone())
    }
}

impl<R: EntitySet> fmt::Debug for ResourceClient<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceClient")
            .field("entity_set", &R::DESCRIPTOR.entity_set)
            .finish_non_exhaustive()
    }
}

impl<R: EntitySet> ResourceClient<R> {
    /// Creates a facade over a shared OData client.
    pub fn new(client: ODataClient) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }

    /// Returns the descriptor of this entity set.
    pub fn descriptor(&self) -> ResourceDescriptor {
        R::DESCRIPTOR
    }

    /// Returns the underlying OData client.
    pub fn odata(&self) -> &ODataClient {
        &self.client
    }

    /// Lists records.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for invalid parameters, or the
    /// error of the final attempt.
    #[instrument(skip(self, params), fields(resource = R::DESCRIPTOR.entity_set))]
    pub async fn list(&self, params: QueryParameters) -> Result<ResponseEnvelope, ApiError> {
        self.client
            .get_collection(R::DESCRIPTOR.entity_set, &params)
            .await
    }

    /// Fetches exactly one record by primary key.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if no record has this key.
    #[instrument(skip(self), fields(resource = R::DESCRIPTOR.entity_set))]
    pub async fn get(&self, key: &str) -> Result<Record, ApiError> {
        let desc = R::DESCRIPTOR;
        match desc.key_lookup {
            KeyLookup::Path => self.client.get_by_key(desc.entity_set, key).await,
            KeyLookup::Filter => {
                let params = QueryParameters::new()
                    .filter(filter::eq(desc.key_field, key))
                    .top(1);
                let envelope = self.client.get_collection(desc.entity_set, &params).await?;
                single_record(envelope, &format!("{} '{key}'", desc.entity_set))
            }
        }
    }

    /// Lists records whose `field` equals `value`.
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::list`].
    pub async fn get_by(
        &self,
        field: &str,
        value: &str,
        params: QueryParameters,
    ) -> Result<ResponseEnvelope, ApiError> {
        self.filtered(&filter::eq(field, value), params).await
    }

    /// Lists records matching `predicate`, combined with any caller filter.
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::list`].
    pub async fn filtered(
        &self,
        predicate: &str,
        params: QueryParameters,
    ) -> Result<ResponseEnvelope, ApiError> {
        self.templated(QueryParameters::new().filter(predicate), params)
            .await
    }

    /// Lists records modified after `since`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if `since` cannot be parsed or the
    /// resource has no modification field.
    pub async fn modified_since(
        &self,
        since: impl IntoSince,
        params: QueryParameters,
    ) -> Result<ResponseEnvelope, ApiError> {
        let since = since.into_since()?;
        let field = R::DESCRIPTOR.modification_field.ok_or_else(|| {
            ApiError::validation(format!(
                "{} has no modification timestamp",
                R::DESCRIPTOR.entity_set
            ))
        })?;

        debug!(resource = R::DESCRIPTOR.entity_set, since = %since, "Listing modified records");
        self.filtered(&since.after(field), params).await
    }

    /// Fetches the page after `envelope`, if the service linked one.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if the link leaves the configured
    /// service.
    pub async fn next_page(
        &self,
        envelope: &ResponseEnvelope,
    ) -> Result<Option<ResponseEnvelope>, ApiError> {
        match envelope.odata_next_link.as_deref() {
            Some(link) => self.client.get_next_link(link).await.map(Some),
            None => Ok(None),
        }
    }

    /// Returns a pager starting at `params`.
    pub fn pages(&self, params: QueryParameters) -> Pager<R> {
        Pager::new(self.clone(), params)
    }

    /// Fetches at most `max_pages` pages and concatenates their records.
    ///
    /// # Errors
    ///
    /// Returns the first error; records already fetched are discarded.
    pub async fn collect_pages(
        &self,
        params: QueryParameters,
        max_pages: usize,
    ) -> Result<PagedResult, ApiError> {
        let mut pager = self.pages(params);
        let mut result = PagedResult::default();

        while result.pages_fetched < max_pages {
            let Some(page) = pager.next().await? else {
                break;
            };
            result.push(page);
        }
        result.truncated = !pager.is_done();

        debug!(
            resource = R::DESCRIPTOR.entity_set,
            pages = result.pages_fetched,
            records = result.value.len(),
            "Collected pages"
        );
        Ok(result)
    }

    /// Lists with a method's `template` layered under the caller's
    /// `params`.
    pub(crate) async fn templated(
        &self,
        template: QueryParameters,
        params: QueryParameters,
    ) -> Result<ResponseEnvelope, ApiError> {
        self.list(template.merge(params)).await
    }
}

// ============================================================================
// Tests
// ============================================================================
