//! OData v4 query toolkit.
//!
//! - [`QueryParameters`] - typed `$top`/`$skip`/`$filter`/`$select`/
//!   `$orderby`/`$expand`/`$count` with validation and canonical encoding
//! - [`filter`] - literal quoting and `and` composition of filter predicates
//! - [`Since`] - date-like cutoffs normalized to `YYYY-MM-DDTHH:MM:SSZ`
//!
//! `$filter` expressions supplied by callers are opaque: they are never
//! parsed, escaped, or validated here.

pub mod filter;
mod query;
mod timestamp;

pub use query::{FieldList, MAX_TOP, QueryParameters};
pub use timestamp::{IntoSince, Since};
