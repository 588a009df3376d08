//! OData query parameters.

use url::form_urlencoded;

use super::filter;
use crate::error::ApiError;

/// Largest `$top` the service accepts.
pub const MAX_TOP: u32 = 200;

// ============================================================================
// Field List
// ============================================================================

/// A `$select` or `$expand` value: one raw string or an ordered list.
///
/// Lists are joined with commas in the order given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldList {
    /// Pre-joined value, sent as-is.
    Single(String),
    /// Field names, joined with `,`.
    List(Vec<String>),
}

impl FieldList {
    /// Returns the wire value.
    pub fn render(&self) -> String {
        match self {
            Self::Single(value) => value.clone(),
            Self::List(values) => values.join(","),
        }
    }

    fn validate(&self, name: &str) -> Result<(), ApiError> {
        if let Self::List(values) = self {
            if values.is_empty() {
                return Err(ApiError::validation(format!("{name} list must not be empty")));
            }
            if values.iter().any(|v| v.trim().is_empty()) {
                return Err(ApiError::validation(format!(
                    "{name} list contains an empty name"
                )));
            }
        }
        Ok(())
    }
}

impl From<&str> for FieldList {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<String> for FieldList {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<String>> for FieldList {
    fn from(values: Vec<String>) -> Self {
        Self::List(values)
    }
}

impl From<Vec<&str>> for FieldList {
    fn from(values: Vec<&str>) -> Self {
        Self::List(values.into_iter().map(String::from).collect())
    }
}

impl From<&[&str]> for FieldList {
    fn from(values: &[&str]) -> Self {
        Self::List(values.iter().map(|v| (*v).to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for FieldList {
    fn from(values: [&str; N]) -> Self {
        Self::List(values.iter().map(|v| (*v).to_string()).collect())
    }
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Typed OData system query options.
///
/// Absent fields are omitted from the query string. `count` is only ever
/// sent as `$count=true`.
///
/// ```
/// use wfrmls_core::QueryParameters;
///
/// let params = QueryParameters::new()
///     .top(10)
///     .filter("City eq 'Provo'")
///     .select(["ListingKey", "ListPrice"]);
///
/// assert_eq!(
///     params.to_query_string(),
///     "%24top=10&%24filter=City+eq+%27Provo%27&%24select=ListingKey%2CListPrice"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParameters {
    /// `$top`: page size, 1 to the configured maximum.
    pub top: Option<u32>,
    /// `$skip`: records to skip.
    pub skip: Option<u32>,
    /// `$filter`: opaque OData expression.
    pub filter: Option<String>,
    /// `$select`: fields to return.
    pub select: Option<FieldList>,
    /// `$orderby`: sort expression.
    pub orderby: Option<String>,
    /// `$expand`: related resources to inline.
    pub expand: Option<FieldList>,
    /// `$count`: request `@odata.count`.
    pub count: Option<bool>,
}

impl QueryParameters {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `$top`.
    pub fn top(mut self, top: u32) -> Self {
        self.top = Some(top);
        self
    }

    /// Sets `$skip`.
    pub fn skip(mut self, skip: u32) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Sets `$filter`.
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Sets `$select`.
    pub fn select(mut self, select: impl Into<FieldList>) -> Self {
        self.select = Some(select.into());
        self
    }

    /// Sets `$orderby`.
    pub fn orderby(mut self, orderby: impl Into<String>) -> Self {
        self.orderby = Some(orderby.into());
        self
    }

    /// Sets `$expand`.
    pub fn expand(mut self, expand: impl Into<FieldList>) -> Self {
        self.expand = Some(expand.into());
        self
    }

    /// Sets `$count`.
    pub fn count(mut self, count: bool) -> Self {
        self.count = Some(count);
        self
    }

    /// Returns true if no option is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Checks the parameters before anything is sent.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if `top` is zero or above `max_top`,
    /// or if a `select`/`expand` list is empty or has a blank entry.
    pub fn validate(&self, max_top: u32) -> Result<(), ApiError> {
        if let Some(top) = self.top {
            if top == 0 {
                return Err(ApiError::validation("top must be a positive integer"));
            }
            if top > max_top {
                return Err(ApiError::validation(format!(
                    "top must be at most {max_top}, got {top}"
                )));
            }
        }
        if let Some(select) = &self.select {
            select.validate("select")?;
        }
        if let Some(expand) = &self.expand {
            expand.validate("expand")?;
        }
        Ok(())
    }

    /// Returns the `($name, value)` pairs in canonical order.
    ///
    /// The order is `$top`, `$skip`, `$filter`, `$select`, `$orderby`,
    /// `$expand`, `$count`.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(7);
        if let Some(top) = self.top {
            pairs.push(("$top", top.to_string()));
        }
        if let Some(skip) = self.skip {
            pairs.push(("$skip", skip.to_string()));
        }
        if let Some(filter) = &self.filter {
            pairs.push(("$filter", filter.clone()));
        }
        if let Some(select) = &self.select {
            pairs.push(("$select", select.render()));
        }
        if let Some(orderby) = &self.orderby {
            pairs.push(("$orderby", orderby.clone()));
        }
        if let Some(expand) = &self.expand {
            pairs.push(("$expand", expand.render()));
        }
        if self.count == Some(true) {
            pairs.push(("$count", "true".to_string()));
        }
        pairs
    }

    /// Encodes the parameters as an `application/x-www-form-urlencoded` query.
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs())
            .finish()
    }

    /// Layers caller parameters over a method's base parameters.
    ///
    /// Caller values win for every option except `filter`, where both are
    /// combined with `and` (see [`filter::compose`]).
    #[must_use]
    pub fn merge(self, caller: QueryParameters) -> Self {
        let filter = match (self.filter, caller.filter) {
            (Some(template), caller_filter) => {
                Some(filter::compose(&template, caller_filter.as_deref()))
            }
            (None, caller_filter) => caller_filter,
        };

        Self {
            top: caller.top.or(self.top),
            skip: caller.skip.or(self.skip),
            filter,
            select: caller.select.or(self.select),
            orderby: caller.orderby.or(self.orderby),
            expand: caller.expand.or(self.expand),
            count: caller.count.or(self.count),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_parameters_encode_to_nothing() {
        let params = QueryParameters::new();
        assert!(params.is_empty());
        assert!(params.pairs().is_empty());
        assert_eq!(params.to_query_string(), "");
    }

    #[test]
    fn test_pairs_follow_canonical_order() {
        let params = QueryParameters::new()
            .count(true)
            .expand("Media")
            .orderby("ListPrice desc")
            .select(vec!["ListingKey", "ListPrice"])
            .filter("ListPrice gt 100000")
            .skip(20)
            .top(10);

        let keys: Vec<&str> = params.pairs().iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            vec!["$top", "$skip", "$filter", "$select", "$orderby", "$expand", "$count"]
        );
    }

    #[test]
    fn test_count_false_is_omitted() {
        let params = QueryParameters::new().count(false);
        assert!(params.pairs().is_empty());
    }

    #[test]
    fn test_empty_filter_is_sent() {
        let params = QueryParameters::new().filter("");
        assert_eq!(params.pairs(), vec![("$filter", String::new())]);
    }

    #[test]
    fn test_select_list_preserves_order() {
        let params = QueryParameters::new().select(["ListPrice", "ListingKey", "City"]);
        assert_eq!(params.pairs()[0].1, "ListPrice,ListingKey,City");

        let single = QueryParameters::new().select("ListingKey,City");
        assert_eq!(single.pairs()[0].1, "ListingKey,City");
    }

    #[test]
    fn test_validate_top_bounds() {
        assert!(QueryParameters::new().top(1).validate(MAX_TOP).is_ok());
        assert!(QueryParameters::new().top(200).validate(MAX_TOP).is_ok());

        let err = QueryParameters::new().top(201).validate(MAX_TOP).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Validation);
        assert_eq!(err.status_code(), None);

        assert!(QueryParameters::new().top(0).validate(MAX_TOP).is_err());
        assert!(QueryParameters::new().top(150).validate(100).is_err());
    }

    #[test]
    fn test_validate_rejects_empty_lists() {
        let empty: Vec<String> = Vec::new();
        assert!(QueryParameters::new().select(empty).validate(MAX_TOP).is_err());
        assert!(QueryParameters::new().expand(vec!["Media", " "]).validate(MAX_TOP).is_err());
    }

    #[test]
    fn test_merge_caller_wins_except_filter() {
        let base = QueryParameters::new()
            .filter("AduStatus eq 'Existing'")
            .orderby("ModificationTimestamp desc")
            .top(50);
        let caller = QueryParameters::new()
            .filter("PropertyKey eq '1'")
            .top(5)
            .count(true);

        let merged = base.merge(caller);
        assert_eq!(merged.top, Some(5));
        assert_eq!(merged.orderby.as_deref(), Some("ModificationTimestamp desc"));
        assert_eq!(merged.count, Some(true));
        assert_eq!(
            merged.filter.as_deref(),
            Some("AduStatus eq 'Existing' and PropertyKey eq '1'")
        );
    }

    #[test]
    fn test_merge_without_base_filter_keeps_caller_filter() {
        let merged = QueryParameters::new().top(10).merge(QueryParameters::new().filter("A eq 1"));
        assert_eq!(merged.filter.as_deref(), Some("A eq 1"));
        assert_eq!(merged.top, Some(10));
    }
}
