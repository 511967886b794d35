//! Search engine for GSA contracting opportunities.
//!
//! This crate holds everything between the opportunity dataset and the user
//! interface:
//!
//! - [`filter`] - Filter specification, predicate engine, quick filters and sorting
//! - [`codec`] - Filter state to/from URL query strings and storage blobs
//! - [`store`] - Best-effort local persistence of filters, presets and preferences
//! - [`presets`] - Named, timestamped filter snapshots
//! - [`export`] - CSV export of a result list
//! - [`controller`] - The search session that ties the pieces together
//! - [`assistant`] - Question answering about a single opportunity
//! - [`summary`] - Progress and facet summaries over the dataset
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use gsa_model::{Opportunity, Status};
//! use gsa_search::filter::{FilterContext, FilterEvaluator, FilterSpec};
//!
//! let opp = Opportunity::new(
//!     "a1",
//!     "Cloud Migration Services",
//!     "DHS",
//!     "541512",
//!     "GSA MAS",
//!     NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
//!     Status::Ready,
//! );
//!
//! let mut spec = FilterSpec::default();
//! spec.add_keyword("cloud");
//!
//! let context = FilterContext::now_local();
//! let evaluator = FilterEvaluator::new(&spec, &context);
//! assert!(evaluator.matches(&opp));
//! ```

pub mod assistant;
pub mod codec;
pub mod controller;
pub mod export;
pub mod filter;
pub mod presets;
pub mod store;
pub mod summary;

pub use assistant::{Assistant, CannedAssistant};
pub use codec::FilterSource;
pub use controller::{FixedLatency, JitterLatency, Latency, SearchSession, SessionError};
pub use export::ExportError;
pub use presets::Preset;
pub use store::{StateStore, StorageKey, StoreError, ViewMode};
pub use summary::{FacetOptions, ProgressSummary};
