//! Property listings.
//!
//! The `Property` entity set is the heart of the WFRMLS feed. Besides the
//! generic operations, listings can be searched by status, location,
//! price, geography, or a combination of criteria.

use chrono::{DateTime, Days, Utc};
use wfrmls_core::odata::filter;
use wfrmls_core::{
    ApiError, PropertyStatus, PropertyType, QueryParameters, ResourceKind, ResponseEnvelope, Since,
};

use crate::descriptor::ResourceDescriptor;
use crate::facade::{EntitySet, ResourceClient};

/// `Property` entity set.
#[derive(Debug, Clone, Copy)]
pub struct Property;

impl EntitySet for Property {
    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor::new(ResourceKind::Property, "ListingKey")
        .description("Property listings");
}

/// Client for property listings.
pub type PropertyClient = ResourceClient<Property>;

// ============================================================================
// Geography
// ============================================================================

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lon: f64,
}

impl GeoPoint {
    /// Creates a point.
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    fn validate(self) -> Result<Self, ApiError> {
        if self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
        {
            Ok(self)
        } else {
            Err(ApiError::validation(format!(
                "Invalid coordinates: {}, {}",
                self.lat, self.lon
            )))
        }
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self::new(lat, lon)
    }
}

fn radius_filter(center: GeoPoint, miles: f64) -> Result<String, ApiError> {
    let center = center.validate()?;
    if !miles.is_finite() || miles <= 0.0 {
        return Err(ApiError::validation(format!(
            "Radius must be a positive number of miles, got {miles}"
        )));
    }
    Ok(format!(
        "geo.distance(Latitude, Longitude, {}, {}) le {miles}",
        center.lat, center.lon
    ))
}

/// Builds a `geo.intersects` predicate, closing the ring if needed.
fn polygon_filter(points: &[GeoPoint]) -> Result<String, ApiError> {
    if points.len() < 3 {
        return Err(ApiError::validation(format!(
            "A polygon needs at least 3 points, got {}",
            points.len()
        )));
    }

    let mut ring = points
        .iter()
        .map(|p| p.validate())
        .collect::<Result<Vec<_>, _>>()?;
    if ring.first() != ring.last() {
        ring.push(ring[0]);
    }

    let coords = ring
        .iter()
        .map(|p| format!("{} {}", p.lat, p.lon))
        .collect::<Vec<_>>()
        .join(",");
    Ok(format!(
        "geo.intersects(Latitude, Longitude, geography'POLYGON(({coords}))')"
    ))
}

fn range_filter<T: std::fmt::Display>(field: &str, min: Option<T>, max: Option<T>) -> Vec<String> {
    let mut parts = Vec::with_capacity(2);
    if let Some(min) = min {
        parts.push(format!("{field} ge {min}"));
    }
    if let Some(max) = max {
        parts.push(format!("{field} le {max}"));
    }
    parts
}

// ============================================================================
// Search Criteria
// ============================================================================

/// Combined listing search. Every criterion is optional; set criteria are
/// joined with `and`.
///
/// ```
/// use wfrmls_core::PropertyStatus;
/// use wfrmls_resources::resources::PropertyCriteria;
///
/// let criteria = PropertyCriteria::new()
///     .status(PropertyStatus::Active)
///     .city("Park City")
///     .price(Some(500_000), None)
///     .bedrooms(Some(3), None);
///
/// assert_eq!(
///     criteria.to_filter().as_deref(),
///     Some("StandardStatus eq 'Active' and ListPrice ge 500000 and City eq 'Park City' and BedroomsTotal ge 3")
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyCriteria {
    /// `StandardStatus`.
    pub status: Option<PropertyStatus>,
    /// Minimum `ListPrice`.
    pub min_price: Option<u64>,
    /// Maximum `ListPrice`.
    pub max_price: Option<u64>,
    /// `City`.
    pub city: Option<String>,
    /// `PostalCode`.
    pub postal_code: Option<String>,
    /// `SchoolDistrict`.
    pub school_district: Option<String>,
    /// `PropertyType`.
    pub property_type: Option<PropertyType>,
    /// Minimum `BedroomsTotal`.
    pub min_bedrooms: Option<u32>,
    /// Maximum `BedroomsTotal`.
    pub max_bedrooms: Option<u32>,
    /// Minimum `BathroomsTotalInteger`.
    pub min_bathrooms: Option<u32>,
    /// Maximum `BathroomsTotalInteger`.
    pub max_bathrooms: Option<u32>,
    /// Minimum `LivingArea` in square feet.
    pub min_square_feet: Option<u32>,
    /// Maximum `LivingArea` in square feet.
    pub max_square_feet: Option<u32>,
    /// Earliest `YearBuilt`.
    pub min_year_built: Option<u16>,
    /// Latest `YearBuilt`.
    pub max_year_built: Option<u16>,
}

impl PropertyCriteria {
    /// Creates empty criteria.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the listing status.
    #[must_use]
    pub fn status(mut self, status: PropertyStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the list price bounds.
    #[must_use]
    pub fn price(mut self, min: Option<u64>, max: Option<u64>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    /// Sets the city.
    #[must_use]
    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Sets the postal code.
    #[must_use]
    pub fn postal_code(mut self, postal_code: impl Into<String>) -> Self {
        self.postal_code = Some(postal_code.into());
        self
    }

    /// Sets the school district.
    #[must_use]
    pub fn school_district(mut self, district: impl Into<String>) -> Self {
        self.school_district = Some(district.into());
        self
    }

    /// Sets the property type.
    #[must_use]
    pub fn property_type(mut self, property_type: PropertyType) -> Self {
        self.property_type = Some(property_type);
        self
    }

    /// Sets the bedroom count bounds.
    #[must_use]
    pub fn bedrooms(mut self, min: Option<u32>, max: Option<u32>) -> Self {
        self.min_bedrooms = min;
        self.max_bedrooms = max;
        self
    }

    /// Sets the bathroom count bounds.
    #[must_use]
    pub fn bathrooms(mut self, min: Option<u32>, max: Option<u32>) -> Self {
        self.min_bathrooms = min;
        self.max_bathrooms = max;
        self
    }

    /// Sets the living area bounds.
    #[must_use]
    pub fn square_feet(mut self, min: Option<u32>, max: Option<u32>) -> Self {
        self.min_square_feet = min;
        self.max_square_feet = max;
        self
    }

    /// Sets the year built bounds.
    #[must_use]
    pub fn year_built(mut self, min: Option<u16>, max: Option<u16>) -> Self {
        self.min_year_built = min;
        self.max_year_built = max;
        self
    }

    /// Renders the criteria as one predicate, or `None` if nothing is set.
    pub fn to_filter(&self) -> Option<String> {
        let mut parts = Vec::new();

        if let Some(status) = &self.status {
            parts.push(filter::eq("StandardStatus", status.as_str()));
        }
        parts.extend(range_filter("ListPrice", self.min_price, self.max_price));
        if let Some(city) = &self.city {
            parts.push(filter::eq("City", city));
        }
        if let Some(postal_code) = &self.postal_code {
            parts.push(filter::eq("PostalCode", postal_code));
        }
        if let Some(district) = &self.school_district {
            parts.push(filter::eq("SchoolDistrict", district));
        }
        if let Some(property_type) = &self.property_type {
            parts.push(filter::eq("PropertyType", property_type.as_str()));
        }
        parts.extend(range_filter("BedroomsTotal", self.min_bedrooms, self.max_bedrooms));
        parts.extend(range_filter(
            "BathroomsTotalInteger",
            self.min_bathrooms,
            self.max_bathrooms,
        ));
        parts.extend(range_filter("LivingArea", self.min_square_feet, self.max_square_feet));
        parts.extend(range_filter("YearBuilt", self.min_year_built, self.max_year_built));

        filter::and_all(parts)
    }
}

// ============================================================================
// Convenience Methods
// ============================================================================

/// Default lower price bound for [`ResourceClient::luxury`].
pub const LUXURY_MIN_PRICE: u64 = 1_000_000;

fn luxury_filter(min_price: u64) -> String {
    format!(
        "ListPrice ge {min_price} and {}",
        filter::eq("StandardStatus", PropertyStatus::Active.as_str())
    )
}

fn new_listings_filter(now: DateTime<Utc>, days_back: u32) -> String {
    let cutoff = now
        .checked_sub_days(Days::new(u64::from(days_back)))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    Since::from(cutoff).after("ListingContractDate")
}

impl ResourceClient<Property> {
    /// Lists active listings.
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::list`].
    pub async fn active(&self, params: QueryParameters) -> Result<ResponseEnvelope, ApiError> {
        self.by_status(&PropertyStatus::Active, params).await
    }

    /// Lists listings with the given `StandardStatus`.
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::list`].
    pub async fn by_status(
        &self,
        status: &PropertyStatus,
        params: QueryParameters,
    ) -> Result<ResponseEnvelope, ApiError> {
        self.get_by("StandardStatus", status.as_str(), params).await
    }

    /// Lists listings in `city`.
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

    /// Lists listings priced within the bounds. With neither bound this is
    /// a plain listing.
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::list`].
    pub async fn by_price_range(
        &self,
        min: Option<u64>,
        max: Option<u64>,
        params: QueryParameters,
    ) -> Result<ResponseEnvelope, ApiError> {
        match filter::and_all(range_filter("ListPrice", min, max)) {
            Some(predicate) => self.filtered(&predicate, params).await,
            None => self.list(params).await,
        }
    }

    /// Lists active listings priced at or above `min_price`.
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::list`].
    pub async fn luxury(
        &self,
        min_price: u64,
        params: QueryParameters,
    ) -> Result<ResponseEnvelope, ApiError> {
        self.filtered(&luxury_filter(min_price), params).await
    }

    /// Lists listings whose contract date falls within the last
    /// `days_back` days.
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::list`].
    pub async fn new_listings(
        &self,
        days_back: u32,
        params: QueryParameters,
    ) -> Result<ResponseEnvelope, ApiError> {
        self.filtered(&new_listings_filter(Utc::now(), days_back), params)
            .await
    }

    /// Lists listings within `miles` of `center`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for out-of-range coordinates or a
    /// non-positive radius.
    pub async fn within_radius(
        &self,
        center: GeoPoint,
        miles: f64,
        params: QueryParameters,
    ) -> Result<ResponseEnvelope, ApiError> {
        let predicate = radius_filter(center, miles)?;
        self.filtered(&predicate, params).await
    }

    /// Lists listings inside the polygon. An open ring is closed
    /// automatically.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for fewer than 3 points or
    /// out-of-range coordinates.
    pub async fn within_polygon(
        &self,
        points: &[GeoPoint],
        params: QueryParameters,
    ) -> Result<ResponseEnvelope, ApiError> {
        let predicate = polygon_filter(points)?;
        self.filtered(&predicate, params).await
    }

    /// Lists listings with their `Media` expanded.
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::list`].
    pub async fn with_media(&self, params: QueryParameters) -> Result<ResponseEnvelope, ApiError> {
        self.templated(QueryParameters::new().expand("Media"), params)
            .await
    }

    /// Lists listings matching every set criterion.
    ///
    /// # Errors
    ///
    /// See [`ResourceClient::list`].
    pub async fn search(
        &self,
        criteria: &PropertyCriteria,
        params: QueryParameters,
    ) -> Result<ResponseEnvelope, ApiError> {
        match criteria.to_filter() {
            Some(predicate) => self.filtered(&predicate, params).await,
            None => self.list(params).await,
        }
    }
}
