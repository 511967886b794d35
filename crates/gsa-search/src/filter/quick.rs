//! Quick filters: a single optional narrowing rule applied after the main filter.

use std::fmt;
use std::str::FromStr;

use gsa_model::Opportunity;
use serde::{Deserialize, Serialize};

use super::dates::{in_quick_window, FilterContext};
use super::error::FilterError;

/// Minimum fit score kept by [`QuickFilter::Fit80`] (inclusive).
pub const FIT_SCORE_THRESHOLD: i32 = 80;

/// A secondary narrowing rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuickFilter {
    /// Due within the next 30 days.
    Due30,
    /// Due within the next 60 days.
    Due60,
    /// Due within the next 90 days.
    Due90,
    /// Fit score of at least 80.
    Fit80,
}

impl QuickFilter {
    /// All quick filters in display order.
    pub const ALL: [QuickFilter; 4] = [
        QuickFilter::Due30,
        QuickFilter::Due60,
        QuickFilter::Due90,
        QuickFilter::Fit80,
    ];

    /// Wire name, as used in storage and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            QuickFilter::Due30 => "due30",
            QuickFilter::Due60 => "due60",
            QuickFilter::Due90 => "due90",
            QuickFilter::Fit80 => "fit80",
        }
    }

    /// Button label.
    pub fn label(&self) -> &'static str {
        match self {
            QuickFilter::Due30 => "Due in 30 days",
            QuickFilter::Due60 => "Due in 60 days",
            QuickFilter::Due90 => "Due in 90 days",
            QuickFilter::Fit80 => "≥80 Fit Score",
        }
    }

    /// Length of the due window in days, for the due-date filters.
    pub fn window_days(&self) -> Option<u32> {
        match self {
            QuickFilter::Due30 => Some(30),
            QuickFilter::Due60 => Some(60),
            QuickFilter::Due90 => Some(90),
            QuickFilter::Fit80 => None,
        }
    }

    /// Returns true if the opportunity passes this quick filter.
    ///
    /// Due windows use the same open interval as quick periods; the fit
    /// threshold is a closed lower bound.
    pub fn matches(&self, opp: &Opportunity, context: &FilterContext) -> bool {
        match self.window_days() {
            Some(days) => in_quick_window(opp.due_date, days, context.now()),
            None => opp.fit_score >= FIT_SCORE_THRESHOLD,
        }
    }
}

impl fmt::Display for QuickFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuickFilter {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        QuickFilter::ALL
            .iter()
            .find(|q| q.as_str() == lower)
            .copied()
            .ok_or_else(|| FilterError::unknown_quick_filter(s))
    }
}

/// Holds at most one active quick filter.
///
/// Selecting a filter replaces any other; selecting the active one again
/// turns it off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuickFilterSelector {
    active: Option<QuickFilter>,
}

impl QuickFilterSelector {
    /// Creates a selector with `active` selected.
    pub fn new(active: Option<QuickFilter>) -> Self {
        Self { active }
    }

    /// The active quick filter, if any.
    pub fn active(&self) -> Option<QuickFilter> {
        self.active
    }

    /// Toggles a quick filter and returns the new selection.
    pub fn toggle(&mut self, filter: QuickFilter) -> Option<QuickFilter> {
        self.active = if self.active == Some(filter) {
            None
        } else {
            Some(filter)
        };
        self.active
    }

    /// Sets the selection directly.
    pub fn select(&mut self, filter: Option<QuickFilter>) {
        self.active = filter;
    }

    /// Deselects any quick filter.
    pub fn clear(&mut self) {
        self.active = None;
    }
}

/// Narrows the output of the main filter by the active quick filter.
///
/// Returns the input unchanged when no quick filter is active.
pub fn apply_quick_filter<'a>(
    items: Vec<&'a Opportunity>,
    filter: Option<QuickFilter>,
    context: &FilterContext,
) -> Vec<&'a Opportunity> {
    match filter {
        None => items,
        Some(filter) => items
            .into_iter()
            .filter(|opp| filter.matches(opp, context))
            .collect(),
    }
}
