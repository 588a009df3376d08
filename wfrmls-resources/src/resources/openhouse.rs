//! Open house schedules.

use chrono::{DateTime, Days, Utc};
use wfrmls_core::{ApiError, OpenHouseStatus, QueryParameters, ResourceKind, ResponseEnvelope, Since};

use crate::descriptor::ResourceDescriptor;
use crate::facade::{EntitySet, ResourceClient};

/// `OpenHouse` entity set.
#[derive(Debug, Clone, Copy)]
pub struct OpenHouse;

impl EntitySet for OpenHouse {
    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor::new(ResourceKind::OpenHouse, "OpenHouseKey")
        .description("Open house schedules");
}

/// Client for open houses.
pub type OpenHouseClient = ResourceClient<OpenHouse>;

const START_TIME: &str = "OpenHouseStartTime";

/// Open houses starting after `now` and before `now + days_ahead`.
fn upcoming_template(now: DateTime<Utc>, days_ahead: u32) -> Result<QueryParameters, ApiError> {
    let until = now
        .checked_add_days(Days::new(u64::from(days_ahead)))
        .ok_or_else(|| {
            ApiError::validation(format!("days_ahead {days_ahead} is out of range"))
        })?;
    Ok(QueryParameters::new()
        .filter(format!(
            "{START_TIME} gt {} and {START_TIME} lt {}",
            Since::from(now).literal(),
            Since::from(until).literal()
        ))
        .orderby(format!("{START_TIME} asc")))
}

impl ResourceClient<OpenHouse> {
    /// Lists open houses starting within the next `days_ahead` days,
    /// soonest first unless the caller orders otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if the window ends past the latest
    /// representable date.
    pub async fn upcoming(
        &self,
        days_ahead: u32,
        params: QueryParameters,
    ) -> Result<ResponseEnvelope, ApiError> {
        self.templated(upcoming_template(Utc::now(), days_ahead)?, params)
            .await
    }

    /// Lists open houses for a listing.
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

    /// Lists open houses hosted by an agent.
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::list`].
    pub async fn by_agent(
        &self,
        agent_key: &str,
        params: QueryParameters,
    ) -> Result<ResponseEnvelope, ApiError> {
        self.get_by("ShowingAgentKey", agent_key, params).await
    }

    /// Lists active open houses.
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::list`].
    pub async fn active(&self, params: QueryParameters) -> Result<ResponseEnvelope, ApiError> {
        self.get_by("OpenHouseStatus", OpenHouseStatus::Active.as_str(), params)
            .await
    }

    /// Lists open houses with their `Property` expanded.
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::list`].
    pub async fn with_property(&self, params: QueryParameters) -> Result<ResponseEnvelope, ApiError> {
        self.templated(QueryParameters::new().expand("Property"), params)
            .await
    }
}
