//! Photos, videos, and documents attached to listings.
//!
//! Media rows reference their listing through the numeric
//! `ResourceRecordKeyNumeric`, so listing keys passed here must be numeric.

use wfrmls_core::odata::filter;
use wfrmls_core::{
    ApiError, MediaCategory, MediaType, QueryParameters, Record, ResourceKind, ResponseEnvelope,
};
use wfrmls_fetch::parser::single_record;

use crate::descriptor::ResourceDescriptor;
use crate::facade::{EntitySet, ResourceClient};

/// `Media` entity set.
#[derive(Debug, Clone, Copy)]
pub struct Media;

impl EntitySet for Media {
    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor::new(ResourceKind::Media, "MediaKey")
        .description("Listing photos, videos, and documents");
}

/// Client for media.
pub type MediaClient = ResourceClient<Media>;

fn property_filter(listing_key: &str) -> Result<String, ApiError> {
    let key: u64 = listing_key.trim().parse().map_err(|_| {
        ApiError::validation(format!(
            "Media listing key must be numeric, got '{listing_key}'"
        ))
    })?;
    Ok(format!("ResourceRecordKeyNumeric eq {key}"))
}

fn photos_filter(listing_key: &str) -> Result<String, ApiError> {
    Ok(format!(
        "{} and {}",
        property_filter(listing_key)?,
        filter::eq("MediaType", MediaType::Photo.as_str())
    ))
}

impl ResourceClient<Media> {
    /// Lists media of a listing.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if `listing_key` is not numeric.
    pub async fn for_property(
        &self,
        listing_key: &str,
        params: QueryParameters,
    ) -> Result<ResponseEnvelope, ApiError> {
        let predicate = property_filter(listing_key)?;
        self.filtered(&predicate, params).await
    }

    /// Lists photos of a listing.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if `listing_key` is not numeric.
    pub async fn photos_for_property(
        &self,
        listing_key: &str,
        params: QueryParameters,
    ) -> Result<ResponseEnvelope, ApiError> {
        let predicate = photos_filter(listing_key)?;
        self.filtered(&predicate, params).await
    }

    /// Returns the first photo (`Order eq 1`) of a listing, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if `listing_key` is not numeric.
    pub async fn primary_photo(&self, listing_key: &str) -> Result<Option<Record>, ApiError> {
        let params = QueryParameters::new()
            .filter(format!("{} and Order eq 1", photos_filter(listing_key)?))
            .top(1);
        let envelope = self.list(params).await?;
        if envelope.is_empty() {
            return Ok(None);
        }
        single_record(envelope, &format!("primary photo of '{listing_key}'")).map(Some)
    }

    /// Returns the `MediaURL` of each media item of a listing, in display
    /// order, optionally restricted to one media type.
    ///
    /// Items without a URL are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if `listing_key` is not numeric.
    pub async fn urls_for_property(
        &self,
        listing_key: &str,
        media_type: Option<&MediaType>,
    ) -> Result<Vec<String>, ApiError> {
        let mut predicate = property_filter(listing_key)?;
        if let Some(media_type) = media_type {
            predicate = format!("{predicate} and {}", filter::eq("MediaType", media_type.as_str()));
        }
        let params = QueryParameters::new()
            .filter(predicate)
            .select(["MediaURL"])
            .orderby("Order asc")
            .top(self.odata().config().max_top());

        let envelope = self.list(params).await?;
        Ok(envelope
            .value
            .iter()
            .filter_map(|record| record.get("MediaURL").and_then(|url| url.as_str()))
            .map(str::to_owned)
            .collect())
    }

    /// Lists media with their `Property` expanded.
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::list`].
    pub async fn with_property(&self, params: QueryParameters) -> Result<ResponseEnvelope, ApiError> {
        self.templated(QueryParameters::new().expand("Property"), params)
            .await
    }

    /// Lists media of a listing in one category.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if `listing_key` is not numeric.
    pub async fn by_category(
        &self,
        listing_key: &str,
        category: &MediaCategory,
        params: QueryParameters,
    ) -> Result<ResponseEnvelope, ApiError> {
        let predicate = format!(
            "{} and {}",
            property_filter(listing_key)?,
            filter::eq("MediaCategory", category.as_str())
        );
        self.filtered(&predicate, params).await
    }
}
