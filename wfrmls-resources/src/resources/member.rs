//! Agents and brokers.

use wfrmls_core::odata::filter;
use wfrmls_core::{ApiError, MemberStatus, QueryParameters, ResourceKind, ResponseEnvelope};

use crate::descriptor::ResourceDescriptor;
use crate::facade::{EntitySet, ResourceClient};

/// `Member` entity set.
#[derive(Debug, Clone, Copy)]
pub struct Member;

impl EntitySet for Member {
    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor::new(ResourceKind::Member, "MemberKey")
        .description("Agents and brokers");
}

/// Client for members.
pub type MemberClient = ResourceClient<Member>;

fn name_filter(first: Option<&str>, last: Option<&str>) -> Result<String, ApiError> {
    let parts = [
        first.map(|name| filter::contains("MemberFirstName", name)),
        last.map(|name| filter::contains("MemberLastName", name)),
    ];
    filter::and_all(parts.into_iter().flatten())
        .ok_or_else(|| ApiError::validation("Provide a first name, a last name, or both"))
}

impl ResourceClient<Member> {
    /// Lists active members.
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::list`].
    pub async fn active(&self, params: QueryParameters) -> Result<ResponseEnvelope, ApiError> {
        self.get_by("MemberStatus", MemberStatus::Active.as_str(), params)
            .await
    }

    /// Lists members of an office.
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::list`].
    pub async fn by_office(
        &self,
        office_key: &str,
        params: QueryParameters,
    ) -> Result<ResponseEnvelope, ApiError> {
        self.get_by("OfficeKey", office_key, params).await
    }

    /// Lists members whose names contain the given parts.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if both names are absent.
    pub async fn search_by_name(
        &self,
        first: Option<&str>,
        last: Option<&str>,
        params: QueryParameters,
    ) -> Result<ResponseEnvelope, ApiError> {
        let predicate = name_filter(first, last)?;
        self.filtered(&predicate, params).await
    }

    /// Lists members with their `Office` expanded.
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::list`].
    pub async fn with_office(&self, params: QueryParameters) -> Result<ResponseEnvelope, ApiError> {
        self.templated(QueryParameters::new().expand("Office"), params)
            .await
    }
}
