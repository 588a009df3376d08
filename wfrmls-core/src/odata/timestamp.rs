//! Date-like cutoffs for `... gt <timestamp>` filters.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::error::ApiError;

const LITERAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// A point in time, rendered as an OData `DateTimeOffset` literal.
///
/// ```
/// use chrono::NaiveDate;
/// use wfrmls_core::Since;
///
/// let since = Since::from(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
/// assert_eq!(since.literal(), "2024-01-15T00:00:00Z");
/// assert_eq!("2024-01-15T10:30:00+02:00".parse::<Since>().unwrap().literal(), "2024-01-15T08:30:00Z");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Since(DateTime<Utc>);

impl Since {
    /// Parses RFC 3339, `YYYY-MM-DDTHH:MM:SS`, or `YYYY-MM-DD`.
    ///
    /// Values without an offset are taken as UTC.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if no format matches.
    pub fn parse(value: &str) -> Result<Self, ApiError> {
        let value = value.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
            return Ok(Self(dt.with_timezone(&Utc)));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(Self(naive.and_utc()));
        }
        if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            return Ok(Self::from(date));
        }

        Err(ApiError::validation(format!(
            "Invalid date '{value}': expected RFC 3339, YYYY-MM-DDTHH:MM:SS, or YYYY-MM-DD"
        )))
    }

    /// Returns the instant in UTC.
    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// Returns the literal, e.g. `2024-01-15T10:30:00Z`.
    pub fn literal(&self) -> String {
        self.0.format(LITERAL_FORMAT).to_string()
    }

    /// Builds `field gt <literal>`.
    pub fn after(&self, field: &str) -> String {
        format!("{field} gt {}", self.literal())
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Since {
    fn from(dt: DateTime<Tz>) -> Self {
        Self(dt.with_timezone(&Utc))
    }
}

impl From<NaiveDateTime> for Since {
    fn from(naive: NaiveDateTime) -> Self {
        Self(naive.and_utc())
    }
}

impl From<NaiveDate> for Since {
    fn from(date: NaiveDate) -> Self {
        Self(date.and_time(chrono::NaiveTime::MIN).and_utc())
    }
}

impl FromStr for Since {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Since {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literal())
    }
}

// ============================================================================
// Conversion
// ============================================================================

/// Values accepted wherever a cutoff is expected.
///
/// Infallible for chrono types; strings are parsed with [`Since::parse`].
pub trait IntoSince {
    /// Converts into a [`Since`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for unparseable strings.
    fn into_since(self) -> Result<Since, ApiError>;
}

impl IntoSince for Since {
    fn into_since(self) -> Result<Since, ApiError> {
        Ok(self)
    }
}

impl<Tz: TimeZone> IntoSince for DateTime<Tz> {
    fn into_since(self) -> Result<Since, ApiError> {
        Ok(Since::from(self))
    }
}

impl IntoSince for NaiveDateTime {
    fn into_since(self) -> Result<Since, ApiError> {
        Ok(Since::from(self))
    }
}

impl IntoSince for NaiveDate {
    fn into_since(self) -> Result<Since, ApiError> {
        Ok(Since::from(self))
    }
}

impl IntoSince for &str {
    fn into_since(self) -> Result<Since, ApiError> {
        Since::parse(self)
    }
}

impl IntoSince for String {
    fn into_since(self) -> Result<Since, ApiError> {
        Since::parse(&self)
    }
}

impl IntoSince for &String {
    fn into_since(self) -> Result<Since, ApiError> {
        Since::parse(self)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_chrono_inputs() {
        let utc = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(Since::from(utc).literal(), "2024-01-15T10:30:00Z");

        let mountain = FixedOffset::west_opt(7 * 3600).unwrap();
        let local = mountain.with_ymd_and_hms(2024, 1, 15, 3, 30, 0).unwrap();
        assert_eq!(Since::from(local).literal(), "2024-01-15T10:30:00Z");

        let naive = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        assert_eq!(Since::from(naive).literal(), "2024-01-15T10:30:00Z");
    }

    #[test]
    fn test_string_inputs() {
        assert_eq!(Since::parse("2024-01-15T10:30:00Z").unwrap().literal(), "2024-01-15T10:30:00Z");
        assert_eq!(Since::parse("2024-01-15T10:30:00").unwrap().literal(), "2024-01-15T10:30:00Z");
        assert_eq!(Since::parse("2024-01-15").unwrap().literal(), "2024-01-15T00:00:00Z");
        assert_eq!(
            Since::parse("2024-01-15T10:30:00.999Z").unwrap().literal(),
            "2024-01-15T10:30:00Z"
        );
    }

    #[test]
    fn test_invalid_string_is_validation_error() {
        let err = Since::parse("last tuesday").unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Validation);
        assert!("2024-13-40".into_since().is_err());
    }

    #[test]
    fn test_after_is_unquoted() {
        let since = Since::parse("2024-01-15").unwrap();
        assert_eq!(since.after("ts"), "ts gt 2024-01-15T00:00:00Z");
    }
}
