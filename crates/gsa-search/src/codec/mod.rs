//! Conversions between a [`FilterSpec`](crate::filter::FilterSpec) and its
//! external forms.
//!
//! - [`url`] maps a spec to and from a shareable query string
//! - [`blob`] maps a spec to and from the JSON blob kept in the state store
//! - [`startup`] decides which of the two seeds the session at launch
//!
//! Every decoder here is tolerant: malformed input degrades to "no state"
//! rather than an error.

pub mod blob;
pub mod startup;
pub mod url;

pub use blob::{from_blob, to_blob};
pub use startup::{resolve_initial_filters, FilterSource, ResolvedFilters};
pub use url::{from_query_string, share_url, to_query_string};
