// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # WFRMLS Core
//!
//! Core types, errors, and OData query building for the WFRMLS client.
//!
//! This crate has no I/O. It provides the pieces shared by the transport
//! and resource layers:
//!
//! - The [`ApiError`] taxonomy returned by every client operation
//! - Response models ([`ResponseEnvelope`], [`Record`], [`DeletedRecord`])
//! - Resource identifiers ([`ResourceKind`]) and open string enums
//! - The OData toolkit in [`odata`]: query parameters, filter
//!   composition, and timestamp literals
//!
//! ## Key Types
//!
//! ### Errors
//! - [`ApiError`] - One variant per error kind, with status and raw body
//! - [`ErrorKind`] - Discriminant for programmatic handling
//!
//! ### Models
//! - [`ResponseEnvelope`] - Parsed `{@odata.context, value, ...}` wrapper
//! - [`Record`] - Opaque field map for a single resource record
//! - [`DeletedRecord`] - Deletion-tracking entry (`resource`, `primary_key`, `ts`)
//!
//! ### OData
//! - [`QueryParameters`] - `$top`/`$skip`/`$filter`/... with validation
//! - [`Since`] - Date-like cutoff normalized to an OData timestamp literal

pub mod error;
pub mod models;
pub mod odata;

// Re-export error types
pub use error::{ApiError, ErrorKind, FieldErrors};

// Re-export all model types
pub use models::{
    // Envelope
    Record,
    ResponseEnvelope,
    // Resources
    ResourceKind,
    // Deletions
    DeletedRecord,
    // Open enums
    AduStatus,
    AduType,
    GreenVerificationType,
    HistoryStatus,
    HistoryTransactionType,
    MediaCategory,
    MediaType,
    MemberStatus,
    MemberType,
    OfficeStatus,
    OfficeType,
    OpenHouseAttendedBy,
    OpenHouseStatus,
    OpenHouseType,
    PropertyStatus,
    PropertyType,
};

// Re-export the OData toolkit
pub use odata::{FieldList, IntoSince, MAX_TOP, QueryParameters, Since};
