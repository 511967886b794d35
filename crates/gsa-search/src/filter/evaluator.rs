//! Filter evaluation against opportunities.
//!
//! This module provides the [`FilterEvaluator`] for testing opportunities
//! against a [`FilterSpec`].
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use gsa_model::{Opportunity, Status};
//! use gsa_search::filter::{FilterContext, FilterEvaluator, FilterSpec};
//!
//! let mut opp = Opportunity::new(
//!     "a1",
//!     "Network Modernization",
//!     "DHS",
//!     "541512",
//!     "CIO-SP4",
//!     NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
//!     Status::Draft,
//! );
//! opp.set_aside = vec!["8(a)".to_string()];
//!
//! let mut spec = FilterSpec::default();
//! spec.toggle_agency("DHS");
//! spec.toggle_set_aside("8(a)");
//!
//! let context = FilterContext::now_local();
//! let evaluator = FilterEvaluator::new(&spec, &context);
//! assert!(evaluator.matches(&opp));
//! ```

use gsa_model::Opportunity;

use super::dates::{in_quick_window, in_range, FilterContext};
use super::spec::{non_empty, FilterSpec, Period};

/// Evaluates a filter specification against opportunities.
///
/// Matching is pure: the evaluator holds no state besides the lower-cased
/// keywords it prepares once at construction.
#[derive(Debug)]
pub struct FilterEvaluator<'a> {
    spec: &'a FilterSpec,
    context: &'a FilterContext,
    keywords: Vec<String>,
}

impl<'a> FilterEvaluator<'a> {
    /// Creates a new filter evaluator.
    ///
    /// # Arguments
    ///
    /// * `spec` - The filter specification to evaluate
    /// * `context` - The context holding the reference instant for quick windows
    pub fn new(spec: &'a FilterSpec, context: &'a FilterContext) -> Self {
        let keywords = spec.keywords.iter().map(|k| k.to_lowercase()).collect();
        Self {
            spec,
            context,
            keywords,
        }
    }

    /// Returns true if the opportunity satisfies every constraint.
    pub fn matches(&self, opp: &Opportunity) -> bool {
        self.matches_naics(opp)
            && self.matches_set_aside(opp)
            && self.matches_vehicle(opp)
            && self.matches_agency(opp)
            && self.matches_period(opp)
            && self.matches_ceiling(opp)
            && self.matches_keywords(opp)
    }

    /// Filters a slice of opportunities, returning only those that match.
    ///
    /// Input order is preserved.
    pub fn filter_items<'b>(&self, items: &'b [Opportunity]) -> Vec<&'b Opportunity> {
        items.iter().filter(|opp| self.matches(opp)).collect()
    }

    fn matches_naics(&self, opp: &Opportunity) -> bool {
        non_empty(&self.spec.naics).map_or(true, |naics| naics == opp.naics)
    }

    /// At least one selected label is on the record.
    fn matches_set_aside(&self, opp: &Opportunity) -> bool {
        self.spec.set_aside.is_empty()
            || self
                .spec
                .set_aside
                .iter()
                .any(|label| opp.set_aside.contains(label))
    }

    fn matches_vehicle(&self, opp: &Opportunity) -> bool {
        non_empty(&self.spec.vehicle).map_or(true, |vehicle| vehicle == opp.vehicle)
    }

    fn matches_agency(&self, opp: &Opportunity) -> bool {
        self.spec.agencies.is_empty() || self.spec.agencies.contains(&opp.agency)
    }

    fn matches_period(&self, opp: &Opportunity) -> bool {
        match self.spec.period {
            None => true,
            Some(Period::Range {
                start_date,
                end_date,
            }) => in_range(opp.due_date, start_date, end_date),
            // A zero-day window is treated as no window at all.
            Some(Period::Quick { quick_days: 0 }) => true,
            Some(Period::Quick { quick_days }) => {
                in_quick_window(opp.due_date, quick_days, self.context.now())
            }
        }
    }

    /// Records without a ceiling pass; otherwise the intervals must overlap.
    fn matches_ceiling(&self, opp: &Opportunity) -> bool {
        match (&self.spec.ceiling, &opp.ceiling) {
            (Some(wanted), Some(ceiling)) => ceiling.bounds().overlaps(wanted),
            _ => true,
        }
    }

    fn matches_keywords(&self, opp: &Opportunity) -> bool {
        if self.keywords.is_empty() {
            return true;
        }

        let haystack = format!(
            "{} {} {}",
            opp.title,
            opp.description.as_deref().unwrap_or_default(),
            opp.keyword_list().join(" ")
        )
        .to_lowercase();

        self.keywords.iter().any(|k| haystack.contains(k.as_str()))
    }
}

#[cfg(test)]
#[path = "evaluator_tests.rs"]
mod tests;
