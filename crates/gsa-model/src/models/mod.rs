//! Opportunity model types.
//!
//! - [`opportunity`] - The opportunity record and its stage list
//! - [`ceiling`] - Contract ceiling values (single figure or range)
//! - [`status`] - Application status, transitions and timeline

mod ceiling;
mod opportunity;
mod status;

pub use ceiling::{Ceiling, CeilingRange};
pub use opportunity::{Opportunity, Stage};
pub use status::{Status, TimelineEntry};
