//! Resource descriptor system.
//!
//! A descriptor holds the static facts the generic facade needs about one
//! entity set:
//! - The entity-set name used in request paths
//! - The key field and how single records are looked up
//! - The timestamp field used for incremental sync

use wfrmls_core::ResourceKind;

/// Field most resources use for incremental sync.
pub const MODIFICATION_TIMESTAMP: &str = "ModificationTimestamp";

// ============================================================================
// Key Lookup
// ============================================================================

/// How a single record is fetched by key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyLookup {
    /// `GET <EntitySet>('<key>')`.
    #[default]
    Path,
    /// `GET <EntitySet>?$filter=<KeyField> eq '<key>'&$top=1`.
    Filter,
}

// ============================================================================
// Resource Descriptor
// ============================================================================

/// Static description of one OData entity set.
///
/// Descriptors are compile-time constants built with the `const` builder
/// methods:
///
/// ```
/// use wfrmls_core::ResourceKind;
/// use wfrmls_resources::descriptor::{KeyLookup, ResourceDescriptor};
///
/// const MEMBER: ResourceDescriptor = ResourceDescriptor::new(ResourceKind::Member, "MemberKey")
///     .description("Agents and brokers");
///
/// assert_eq!(MEMBER.entity_set, "Member");
/// assert_eq!(MEMBER.key_lookup, KeyLookup::Path);
/// assert_eq!(MEMBER.modification_field, Some("ModificationTimestamp"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceDescriptor {
    /// Resource family.
    pub kind: ResourceKind,
    /// Entity-set name in request paths.
    pub entity_set: &'static str,
    /// Primary key field.
    pub key_field: &'static str,
    /// Timestamp field for `modified_since`, if the resource has one.
    pub modification_field: Option<&'static str>,
    /// Single-record lookup strategy.
    pub key_lookup: KeyLookup,
    /// Short human-readable description.
    pub description: &'static str,
}

impl ResourceDescriptor {
    /// Creates a descriptor with path key lookup and
    /// `ModificationTimestamp` as the modification field.
    pub const fn new(kind: ResourceKind, key_field: &'static str) -> Self {
        Self {
            kind,
            entity_set: kind.as_str(),
            key_field,
            modification_field: Some(MODIFICATION_TIMESTAMP),
            key_lookup: KeyLookup::Path,
            description: "",
        }
    }

    /// Sets the modification field, or `None` if the resource has none.
    #[must_use]
    pub const fn modification_field(mut self, field: Option<&'static str>) -> Self {
        self.modification_field = field;
        self
    }

    /// Sets the key lookup strategy.
    #[must_use]
    pub const fn key_lookup(mut self, lookup: KeyLookup) -> Self {
        self.key_lookup = lookup;
        self
    }

    /// Sets the description.
    #[must_use]
    pub const fn description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    /// Returns the display name.
    pub fn display_name(&self) -> &'static str {
        self.kind.display_name()
    }
}
