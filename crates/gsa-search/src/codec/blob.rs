//! JSON blob encoding of a filter specification for the state store.

use tracing::debug;

use crate::filter::FilterSpec;

/// Serializes a spec to its stored JSON form.
pub fn to_blob(spec: &FilterSpec) -> serde_json::Result<String> {
    serde_json::to_string(spec)
}

/// Parses a stored blob. Returns `None` if the blob is not a valid spec.
pub fn from_blob(blob: &str) -> Option<FilterSpec> {
    match serde_json::from_str(blob) {
        Ok(spec) => Some(spec),
        Err(e) => {
            debug!(error = %e, "discarding unparseable filter blob");
            None
        }
    }
}
