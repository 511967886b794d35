//! Data model for GSA contracting opportunities.
//!
//! This crate defines the opportunity record that every other part of the
//! search tool consumes, plus loading of the read-only opportunity dataset.
//!
//! # Example
//!
//! ```
//! use gsa_model::{Dataset, Status};
//!
//! let json = r#"[{
//!     "id": "opp-1",
//!     "title": "Cloud Migration Services",
//!     "agency": "DHS",
//!     "naics": "541512",
//!     "setAside": ["8(a)"],
//!     "vehicle": "GSA MAS",
//!     "dueDate": "2026-03-01",
//!     "status": "Ready",
//!     "percentComplete": 80,
//!     "fitScore": 91,
//!     "ceiling": {"min": 1000000, "max": 5000000}
//! }]"#;
//!
//! let dataset = Dataset::from_json(json).unwrap();
//! assert_eq!(dataset.len(), 1);
//! assert_eq!(dataset.opportunities()[0].status, Status::Ready);
//! ```

pub mod dataset;
pub mod error;
pub mod models;

pub use dataset::Dataset;
pub use error::{DatasetError, Result};
pub use models::{Ceiling, CeilingRange, Opportunity, Stage, Status, TimelineEntry};
