//! Filter specification, predicate engine, quick filters and sorting.
//!
//! A search runs in three steps:
//!
//! 1. [`FilterEvaluator`] keeps the opportunities matching a [`FilterSpec`]
//! 2. [`apply_quick_filter`] narrows that list by the active [`QuickFilter`]
//! 3. [`sort_opportunities`] orders the result by a [`SortConfig`]
//!
//! # Matching rules
//!
//! A record matches when every constrained field matches (AND across fields).
//! Multi-valued fields match when any selected value matches (OR within a
//! field). A field with no constraint never excludes anything, so
//! `FilterSpec::default()` matches every record.
//!
//! - `naics`, `vehicle` - exact equality
//! - `set_aside` - the record shares at least one label
//! - `agencies` - the record's agency is selected
//! - `period` - inclusive date range, or open quick window of N days from now
//! - `ceiling` - inclusive interval overlap; records without a ceiling pass
//! - `keywords` - case-insensitive substring of title, description and keywords
//!
//! # Example
//!
//! ```
//! use gsa_search::filter::{FilterContext, FilterEvaluator, FilterSpec, SortConfig};
//!
//! let mut spec = FilterSpec::default();
//! spec.toggle_agency("DHS");
//! spec.toggle_set_aside("8(a)");
//!
//! let context = FilterContext::now_local();
//! let evaluator = FilterEvaluator::new(&spec, &context);
//!
//! let items: Vec<gsa_model::Opportunity> = vec![];
//! let mut results = evaluator.filter_items(&items);
//! gsa_search::filter::sort_opportunities(&mut results, SortConfig::default());
//! ```

pub mod dates;
mod error;
mod evaluator;
mod quick;
mod sort;
mod spec;

pub use dates::{Clock, FilterContext, FixedClock, SystemClock};
pub use error::{FilterError, FilterResult};
pub use evaluator::FilterEvaluator;
pub use quick::{apply_quick_filter, QuickFilter, QuickFilterSelector, FIT_SCORE_THRESHOLD};
pub use sort::{sort_opportunities, SortConfig, SortDirection, SortField};
pub use spec::{FilterSpec, Period};
