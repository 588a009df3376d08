//! Response and resource models for the WFRMLS API.
//!
//! Business fields (`ListPrice`, `AduType`, ...) are never interpreted by
//! the client; records are opaque field maps. The typed models here cover
//! only the transport-level shapes and the handful of value sets that
//! convenience filters accept.
//!
//! ## Submodules
//!
//! - [`envelope`] - OData response envelope and opaque records
//! - [`resource`] - Resource families exposed by the service
//! - [`deleted`] - Deletion-tracking records
//! - [`enums`] - Open string enums with an `Other` fallback

mod deleted;
mod envelope;
mod enums;
mod resource;

// Re-export everything at the models level
pub use deleted::DeletedRecord;
pub use envelope::{Record, ResponseEnvelope};
pub use enums::{
    AduStatus, AduType, GreenVerificationType, HistoryStatus, HistoryTransactionType,
    MediaCategory, MediaType, MemberStatus, MemberType, OfficeStatus, OfficeType,
    OpenHouseAttendedBy, OpenHouseStatus, OpenHouseType, PropertyStatus, PropertyType,
};
pub use resource::ResourceKind;

#[cfg(test)]
mod serde_tests;
