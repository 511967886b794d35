//! Error types for filter editing and parsing.

use thiserror::Error;

/// A specialized Result type for filter operations.
pub type FilterResult<T> = Result<T, FilterError>;

/// Errors raised while validating or parsing filter input.
///
/// None of these come from evaluation itself: matching and sorting are total
/// over well-formed records.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    /// The ceiling constraint has its bounds the wrong way round.
    #[error("ceiling min ({min}) must be less than or equal to max ({max})")]
    CeilingInverted {
        /// The entered minimum.
        min: i64,
        /// The entered maximum.
        max: i64,
    },

    /// An unrecognized quick filter name.
    #[error("unknown quick filter: {name} (expected due30, due60, due90 or fit80)")]
    UnknownQuickFilter {
        /// The name that was given.
        name: String,
    },

    /// An unrecognized sort field name.
    #[error("unknown sort field: {name} (expected dueDate, percentComplete or fitScore)")]
    UnknownSortField {
        /// The name that was given.
        name: String,
    },
}

impl FilterError {
    /// Creates an unknown quick filter error.
    pub fn unknown_quick_filter(name: impl Into<String>) -> Self {
        FilterError::UnknownQuickFilter { name: name.into() }
    }

    /// Creates an unknown sort field error.
    pub fn unknown_sort_field(name: impl Into<String>) -> Self {
        FilterError::UnknownSortField { name: name.into() }
    }
}
