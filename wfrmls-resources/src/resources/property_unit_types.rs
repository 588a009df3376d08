//! Unit types within multi-unit listings.

use wfrmls_core::odata::filter;
use wfrmls_core::{ApiError, QueryParameters, ResourceKind, ResponseEnvelope};

use crate::descriptor::ResourceDescriptor;
use crate::facade::{EntitySet, ResourceClient};

/// `PropertyUnitTypes` entity set.
#[derive(Debug, Clone, Copy)]
pub struct PropertyUnitTypes;

impl EntitySet for PropertyUnitTypes {
    const DESCRIPTOR: ResourceDescriptor =
        ResourceDescriptor::new(ResourceKind::PropertyUnitTypes, "UnitTypeKey")
            .description("Unit types of multi-unit listings");
}

/// Client for property unit types.
pub type PropertyUnitTypesClient = ResourceClient<PropertyUnitTypes>;

/// Unit types treated as residential.
pub const RESIDENTIAL_UNIT_TYPES: &[&str] = &[
    "Condo",
    "Townhome",
    "Apartment",
    "Single Family",
    "Duplex",
    "Triplex",
    "Fourplex",
];

fn residential_filter() -> String {
    filter::any_of(RESIDENTIAL_UNIT_TYPES.iter().map(|t| filter::eq("UnitType", t)))
        .unwrap_or_default()
}

impl ResourceClient<PropertyUnitTypes> {
    /// Lists unit types of a listing.
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

    /// Lists units of one type.
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::list`].
    pub async fn by_unit_type(
        &self,
        unit_type: &str,
        params: QueryParameters,
    ) -> Result<ResponseEnvelope, ApiError> {
        self.get_by("UnitType", unit_type, params).await
    }

    /// Lists residential units (see [`RESIDENTIAL_UNIT_TYPES`]).
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::list`].
    pub async fn residential(&self, params: QueryParameters) -> Result<ResponseEnvelope, ApiError> {
        self.filtered(&residential_filter(), params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{capture_filter, facade, page, scripted};
    use serde_json::json;

    #[test]
    fn test_residential_filter_is_grouped() {
        let predicate = residential_filter();
        assert!(predicate.starts_with("(UnitType eq 'Condo' or UnitType eq 'Townhome'"));
        assert!(predicate.ends_with("UnitType eq 'Fourplex')"));
    }

    #[tokio::test]
    async fn test_residential_with_caller_filter() {
        let transport = scripted(page(json!([])));
        let units: PropertyUnitTypesClient = facade(&transport);

        units
            .residential(QueryParameters::new().filter("UnitsTotal ge 2"))
            .await
            .unwrap();
        let sent = capture_filter(&transport).unwrap();
        assert!(sent.starts_with("(UnitType eq 'Condo' or "));
        assert!(sent.ends_with(") and UnitsTotal ge 2"));
    }
}
