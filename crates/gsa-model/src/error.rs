//! Error types for dataset loading.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for dataset operations.
pub type Result<T> = std::result::Result<T, DatasetError>;

/// Errors that can occur while loading the opportunity dataset.
///
/// A dataset that fails to load is a precondition violation: the records are
/// supplied externally and are expected to be well-formed.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The dataset file could not be read.
    #[error("failed to read dataset '{path}': {source}")]
    Read {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The dataset is not a valid list of opportunity records.
    #[error("invalid dataset: {0}")]
    Json(#[from] serde_json::Error),

    /// Two records share the same identifier.
    #[error("duplicate opportunity id '{id}'")]
    DuplicateId {
        /// The repeated identifier.
        id: String,
    },
}
