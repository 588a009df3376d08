//! Historical transactions.
//!
//! `CloseDate` is a date, so date filters here use plain `YYYY-MM-DD`
//! literals rather than timestamps.

use chrono::{Days, NaiveDate, Utc};
use wfrmls_core::odata::filter;
use wfrmls_core::{
    ApiError, HistoryStatus, HistoryTransactionType, QueryParameters, ResourceKind,
    ResponseEnvelope,
};

use crate::descriptor::ResourceDescriptor;
use crate::facade::{EntitySet, ResourceClient};

/// `HistoryTransactional` entity set.
#[derive(Debug, Clone, Copy)]
pub struct History;

impl EntitySet for History {
    const DESCRIPTOR: ResourceDescriptor =
        ResourceDescriptor::new(ResourceKind::HistoryTransactional, "HistoryTransactionalKey")
            .description("Historical transactions");
}

/// Client for historical transactions.
pub type HistoryClient = ResourceClient<History>;

const DATE_FORMAT: &str = "%Y-%m-%d";

fn sales() -> String {
    filter::eq("TransactionType", HistoryTransactionType::Sale.as_str())
}

fn price_filter(min: Option<u64>, max: Option<u64>) -> String {
    let mut parts = vec![sales()];
    if let Some(min) = min {
        parts.push(format!("ClosePrice ge {min}"));
    }
    if let Some(max) = max {
        parts.push(format!("ClosePrice le {max}"));
    }
    parts.join(" and ")
}

fn between_filter(start: NaiveDate, end: NaiveDate) -> Result<String, ApiError> {
    if start > end {
        return Err(ApiError::validation(format!(
            "Start date {start} is after end date {end}"
        )));
    }
    Ok(format!(
        "{} and CloseDate ge {} and CloseDate le {}",
        sales(),
        start.format(DATE_FORMAT),
        end.format(DATE_FORMAT)
    ))
}

fn recent_filter(today: NaiveDate, days_back: u32) -> String {
    let cutoff = today
        .checked_sub_days(Days::new(u64::from(days_back)))
        .unwrap_or(NaiveDate::MIN);
    format!("{} and CloseDate ge {}", sales(), cutoff.format(DATE_FORMAT))
}

impl ResourceClient<History> {
    /// Lists transactions of a listing.
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

    /// Lists sales closed within the price bounds.
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::list`].
    pub async fn sales_by_price_range(
        &self,
        min: Option<u64>,
        max: Option<u64>,
        params: QueryParameters,
    ) -> Result<ResponseEnvelope, ApiError> {
        self.filtered(&price_filter(min, max), params).await
    }

    /// Lists sales closed between two dates, inclusive.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if `start` is after `end`.
    pub async fn sales_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        params: QueryParameters,
    ) -> Result<ResponseEnvelope, ApiError> {
        let predicate = between_filter(start, end)?;
        self.filtered(&predicate, params).await
    }

    /// Lists sales closed in the last `days_back` days.
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::list`].
    pub async fn recent_sales(
        &self,
        days_back: u32,
        params: QueryParameters,
    ) -> Result<ResponseEnvelope, ApiError> {
        let today = Utc::now().date_naive();
        self.filtered(&recent_filter(today, days_back), params).await
    }

    /// Lists transactions in `city`.
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::list`].
    pub async fn by_city(
        &self,
        city: &str,
        params: QueryParameters,
    ) -> Result<ResponseEnvelope, ApiError> {
        self.get_by("City", city, params).await
    }

    /// Lists closed transactions.
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::list`].
    pub async fn closed(&self, params: QueryParameters) -> Result<ResponseEnvelope, ApiError> {
        self.get_by("Status", HistoryStatus::Closed.as_str(), params).await
    }

    /// Lists transactions with their `Property` expanded.
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::list`].
    pub async fn with_property(&self, params: QueryParameters) -> Result<ResponseEnvelope, ApiError> {
        self.templated(QueryParameters::new().expand("Property"), params)
            .await
    }
}
