//! Resource families exposed by the WFRMLS OData service.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

// ============================================================================
// Resource Kind
// ============================================================================

/// Resource families (OData entity sets) the client knows about.
///
/// Serializes as the entity-set name used on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResourceKind {
    /// Property listings.
    Property,
    /// Agents and brokers.
    Member,
    /// Brokerage offices.
    Office,
    /// Open house schedules.
    OpenHouse,
    /// Lookup (enumeration) values.
    Lookup,
    /// Accessory dwelling units.
    Adu,
    /// Deletion tracking.
    Deleted,
    /// Data system metadata.
    DataSystem,
    /// Resource metadata.
    Resource,
    /// Property unit types.
    PropertyUnitTypes,
    /// Photos, videos, and documents.
    Media,
    /// Historical transactions.
    HistoryTransactional,
    /// Green building verifications.
    PropertyGreenVerification,
}

impl ResourceKind {
    /// Returns the OData entity-set name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Property => "Property",
            Self::Member => "Member",
            Self::Office => "Office",
            Self::OpenHouse => "OpenHouse",
            Self::Lookup => "Lookup",
            Self::Adu => "Adu",
            Self::Deleted => "Deleted",
            Self::DataSystem => "DataSystem",
            Self::Resource => "Resource",
            Self::PropertyUnitTypes => "PropertyUnitTypes",
            Self::Media => "Media",
            Self::HistoryTransactional => "HistoryTransactional",
            Self::PropertyGreenVerification => "PropertyGreenVerification",
        }
    }

    /// Returns the display name for this resource.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Property => "Property",
            Self::Member => "Member",
            Self::Office => "Office",
            Self::OpenHouse => "Open House",
            Self::Lookup => "Lookup",
            Self::Adu => "ADU",
            Self::Deleted => "Deleted",
            Self::DataSystem => "Data System",
            Self::Resource => "Resource",
            Self::PropertyUnitTypes => "Property Unit Types",
            Self::Media => "Media",
            Self::HistoryTransactional => "History Transactional",
            Self::PropertyGreenVerification => "Property Green Verification",
        }
    }

    /// Returns all resource kinds.
    pub fn all() -> &'static [ResourceKind] {
        &[
            Self::Property,
            Self::Member,
            Self::Office,
            Self::OpenHouse,
            Self::Lookup,
            Self::Adu,
            Self::Deleted,
            Self::DataSystem,
            Self::Resource,
            Self::PropertyUnitTypes,
            Self::Media,
            Self::HistoryTransactional,
            Self::PropertyGreenVerification,
        ]
    }
}

impl AsRef<str> for ResourceKind {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = ApiError;

    /// Parses an entity-set name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ApiError::validation(format!("Unknown resource: {s}")))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!("openhouse".parse::<ResourceKind>().unwrap(), ResourceKind::OpenHouse);
        assert_eq!(" ADU ".parse::<ResourceKind>().unwrap(), ResourceKind::Adu);
        assert!("Listing".parse::<ResourceKind>().is_err());
    }

    #[test]
    fn test_all_names_are_unique() {
        let mut names: Vec<&str> = ResourceKind::all().iter().map(|kind| kind.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ResourceKind::all().len());
    }
}
