//! Resource registry for looking up descriptors.
//!
//! The registry provides static access to every resource descriptor and
//! is the single place that lists the resources this client supports.

use std::collections::HashMap;
use std::sync::OnceLock;

use wfrmls_core::ResourceKind;

use crate::descriptor::ResourceDescriptor;
use crate::facade::EntitySet;
use crate::resources::{
    Adu, DataSystem, Deleted, GreenVerification, History, Lookup, Media, Member, Office,
    OpenHouse, Property, PropertyUnitTypes, Resource,
};

// ============================================================================
// Static Registry
// ============================================================================

/// Static storage for all resource descriptors.
static DESCRIPTORS: OnceLock<Vec<ResourceDescriptor>> = OnceLock::new();

/// Static storage for lowercase entity-set name to kind mapping.
static NAME_MAP: OnceLock<HashMap<String, ResourceKind>> = OnceLock::new();

/// Initializes all resource descriptors.
///
/// Listing resources first, then reference data, then sync and metadata.
fn init_descriptors() -> Vec<ResourceDescriptor> {
    vec![
        // Listings
        Property::DESCRIPTOR,
        Media::DESCRIPTOR,
        OpenHouse::DESCRIPTOR,
        Adu::DESCRIPTOR,
        PropertyUnitTypes::DESCRIPTOR,
        GreenVerification::DESCRIPTOR,
        History::DESCRIPTOR,
        // People
        Member::DESCRIPTOR,
        Office::DESCRIPTOR,
        // Reference data
        Lookup::DESCRIPTOR,
        // Sync and metadata
        Deleted::DESCRIPTOR,
        DataSystem::DESCRIPTOR,
        Resource::DESCRIPTOR,
    ]
}

fn build_name_map(descriptors: &[ResourceDescriptor]) -> HashMap<String, ResourceKind> {
    descriptors
        .iter()
        .map(|desc| (desc.entity_set.to_ascii_lowercase(), desc.kind))
        .collect()
}

// ============================================================================
// Resource Registry
// ============================================================================

/// Global registry of all resource descriptors.
///
/// Initialized lazily on first access.
pub struct ResourceRegistry;

impl ResourceRegistry {
    /// Returns all resource descriptors.
    pub fn all() -> &'static [ResourceDescriptor] {
        DESCRIPTORS.get_or_init(init_descriptors)
    }

    /// Gets a descriptor by kind.
    pub fn get(kind: ResourceKind) -> Option<&'static ResourceDescriptor> {
        Self::all().iter().find(|d| d.kind == kind)
    }

    /// Returns the lowercase entity-set name to kind mapping.
    pub fn name_map() -> &'static HashMap<String, ResourceKind> {
        NAME_MAP.get_or_init(|| build_name_map(Self::all()))
    }

    /// Looks up a descriptor by entity-set name, ignoring case.
    pub fn get_by_name(name: &str) -> Option<&'static ResourceDescriptor> {
        let kind = Self::name_map().get(&name.trim().to_ascii_lowercase())?;
        Self::get(*kind)
    }

    /// Returns the number of registered resources.
    pub fn count() -> usize {
        Self::all().len()
    }

    /// Returns all registered kinds.
    pub fn kinds() -> Vec<ResourceKind> {
        Self::all().iter().map(|d| d.kind).collect()
    }

    /// Returns resources that support incremental sync.
    pub fn with_modification_field() -> Vec<&'static ResourceDescriptor> {
        Self::all()
            .iter()
            .filter(|d| d.modification_field.is_some())
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::KeyLookup;

    #[test]
    fn test_registry_covers_every_kind() {
        assert_eq!(ResourceRegistry::count(), ResourceKind::all().len());

        for kind in ResourceKind::all() {
            let desc = ResourceRegistry::get(*kind);
            assert!(desc.is_some(), "missing descriptor for {kind}");
            assert_eq!(desc.unwrap().entity_set, kind.as_str());
        }
    }

    #[test]
    fn test_get_by_name() {
        let desc = ResourceRegistry::get_by_name("openhouse").unwrap();
        assert_eq!(desc.kind, ResourceKind::OpenHouse);
        assert_eq!(desc.key_field, "OpenHouseKey");

        let desc = ResourceRegistry::get_by_name(" PropertyGreenVerification ").unwrap();
        assert_eq!(desc.key_field, "GreenBuildingVerificationKey");

        assert!(ResourceRegistry::get_by_name("Listing").is_none());
    }

    #[test]
    fn test_key_fields() {
        let expected = [
            (ResourceKind::Property, "ListingKey"),
            (ResourceKind::Member, "MemberKey"),
            (ResourceKind::Office, "OfficeKey"),
            (ResourceKind::Media, "MediaKey"),
            (ResourceKind::HistoryTransactional, "HistoryTransactionalKey"),
        ];
        for (kind, key) in expected {
            assert_eq!(ResourceRegistry::get(kind).unwrap().key_field, key);
        }
    }

    #[test]
    fn test_deleted_uses_ts_and_filter_lookup() {
        let desc = ResourceRegistry::get(ResourceKind::Deleted).unwrap();
        assert_eq!(desc.modification_field, Some("ts"));
        assert_eq!(desc.key_lookup, KeyLookup::Filter);

        let syncable = ResourceRegistry::with_modification_field();
        assert_eq!(syncable.len(), ResourceRegistry::count());
    }

    #[test]
    fn test_kinds_are_unique() {
        let mut kinds = ResourceRegistry::kinds();
        kinds.sort();
        kinds.dedup();
        assert_eq!(kinds.len(), ResourceRegistry::count());
    }
}
