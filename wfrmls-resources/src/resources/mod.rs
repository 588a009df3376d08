//! Per-resource markers and convenience methods.
//!
//! Each module defines a marker type implementing
//! [`EntitySet`](crate::facade::EntitySet) and adds inherent methods to
//! [`ResourceClient`](crate::facade::ResourceClient) for that marker.

mod adu;
mod data_system;
mod deleted;
mod green_verification;
mod history;
mod lookup;
mod media;
mod member;
mod office;
mod openhouse;
mod property;
mod property_unit_types;
mod resource;

pub use adu::{Adu, AduClient};
pub use data_system::{DataSystem, DataSystemClient};
pub use deleted::{DEFAULT_SYNC_RESOURCES, Deleted, DeletedClient, DeletionSync};
pub use green_verification::{GreenVerification, GreenVerificationClient};
pub use history::{History, HistoryClient};
pub use lookup::{Lookup, LookupClient};
pub use media::{Media, MediaClient};
pub use member::{Member, MemberClient};
pub use office::{Office, OfficeClient};
pub use openhouse::{OpenHouse, OpenHouseClient};
pub use property::{GeoPoint, LUXURY_MIN_PRICE, Property, PropertyClient, PropertyCriteria};
pub use property_unit_types::{PropertyUnitTypes, PropertyUnitTypesClient, RESIDENTIAL_UNIT_TYPES};
pub use resource::{Resource, ResourceMetadataClient};
