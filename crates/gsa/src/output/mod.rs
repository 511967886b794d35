//! Output formatting utilities for the gsa CLI.
//!
//! This module provides functions for formatting data as text or JSON.
//! It is organized into submodules by entity type:
//!
//! - [`opportunities`] - Opportunity output (list cards/table, details)
//! - [`presets`] - Saved preset output
//! - [`summary`] - Progress summary and facet output
//! - [`helpers`] - Common formatting utilities (truncation, money, due dates)

pub mod helpers;
mod opportunities;
mod presets;
mod summary;

pub use opportunities::{
    format_opportunities_json, format_opportunities_table, format_opportunity_cards,
    format_opportunity_details, format_opportunity_details_json,
};

pub use presets::{format_preset_json, format_presets_json, format_presets_table};

pub use summary::{
    format_agency_matches, format_facets, format_facets_json, format_summary, format_summary_json,
};
