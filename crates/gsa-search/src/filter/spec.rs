//! The filter specification edited by the user.

use chrono::NaiveDate;
use gsa_model::CeilingRange;
use serde::{Deserialize, Serialize};

use super::error::{FilterError, FilterResult};

/// Due date constraint: an explicit date range or a window of days from now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Period {
    /// Inclusive date range; either bound may be absent.
    Range {
        #[serde(rename = "startDate", default, skip_serializing_if = "Option::is_none")]
        start_date: Option<NaiveDate>,
        #[serde(rename = "endDate", default, skip_serializing_if = "Option::is_none")]
        end_date: Option<NaiveDate>,
    },
    /// Due strictly within the next `quick_days` days.
    Quick {
        #[serde(rename = "quickDays")]
        quick_days: u32,
    },
}

/// A set of search constraints.
///
/// Multi-valued fields are sets for matching purposes but keep insertion
/// order for display. Empty or absent fields do not constrain, so the
/// default value matches every opportunity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterSpec {
    /// Exact NAICS code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub naics: Option<String>,

    /// Selected set-aside labels.
    pub set_aside: Vec<String>,

    /// Exact contract vehicle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle: Option<String>,

    /// Selected agency names.
    pub agencies: Vec<String>,

    /// Due date constraint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,

    /// Ceiling interval that a record's ceiling must overlap.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ceiling: Option<CeilingRange>,

    /// Keywords, any of which must appear in the record text.
    pub keywords: Vec<String>,
}

/// Returns the string when present and non-empty.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Adds `value` to `list` if absent, removes it otherwise. Returns true if added.
fn toggle(list: &mut Vec<String>, value: &str) -> bool {
    if let Some(pos) = list.iter().position(|v| v == value) {
        list.remove(pos);
        false
    } else {
        list.push(value.to_string());
        true
    }
}

impl FilterSpec {
    /// Returns true if no field constrains the search.
    pub fn is_identity(&self) -> bool {
        non_empty(&self.naics).is_none()
            && self.set_aside.is_empty()
            && non_empty(&self.vehicle).is_none()
            && self.agencies.is_empty()
            && self.period.is_none()
            && self.ceiling.is_none()
            && self.keywords.is_empty()
    }

    /// Number of fields that carry a constraint.
    pub fn active_constraints(&self) -> usize {
        [
            non_empty(&self.naics).is_some(),
            !self.set_aside.is_empty(),
            non_empty(&self.vehicle).is_some(),
            !self.agencies.is_empty(),
            self.period.is_some(),
            self.ceiling.is_some(),
            !self.keywords.is_empty(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    /// Resets every field.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Selects or deselects a set-aside label. Returns true if now selected.
    pub fn toggle_set_aside(&mut self, label: &str) -> bool {
        toggle(&mut self.set_aside, label)
    }

    /// Selects a set-aside label if not already selected.
    pub fn select_set_aside(&mut self, label: &str) {
        if !self.set_aside.iter().any(|l| l == label) {
            self.set_aside.push(label.to_string());
        }
    }

    /// Selects or deselects an agency. Returns true if now selected.
    pub fn toggle_agency(&mut self, agency: &str) -> bool {
        toggle(&mut self.agencies, agency)
    }

    /// Selects an agency if not already selected.
    pub fn select_agency(&mut self, agency: &str) {
        if !self.agencies.iter().any(|a| a == agency) {
            self.agencies.push(agency.to_string());
        }
    }

    /// Adds a keyword.
    ///
    /// The keyword is trimmed; blank input and exact duplicates are ignored.
    /// Returns true if the keyword was added.
    pub fn add_keyword(&mut self, keyword: &str) -> bool {
        let keyword = keyword.trim();
        if keyword.is_empty() || self.keywords.iter().any(|k| k == keyword) {
            return false;
        }
        self.keywords.push(keyword.to_string());
        true
    }

    /// Removes a keyword. Returns true if it was present.
    pub fn remove_keyword(&mut self, keyword: &str) -> bool {
        let before = self.keywords.len();
        self.keywords.retain(|k| k != keyword);
        self.keywords.len() != before
    }

    /// Constrains the due date to the next `days` days.
    pub fn set_quick_period(&mut self, days: u32) {
        self.period = Some(Period::Quick { quick_days: days });
    }

    /// Constrains the due date to an inclusive range.
    ///
    /// Clears the period when both bounds are absent.
    pub fn set_date_range(&mut self, start_date: Option<NaiveDate>, end_date: Option<NaiveDate>) {
        self.period = if start_date.is_none() && end_date.is_none() {
            None
        } else {
            Some(Period::Range {
                start_date,
                end_date,
            })
        };
    }

    /// Checks the specification can be applied.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::CeilingInverted` if the ceiling minimum exceeds
    /// the maximum. The specification itself is left untouched.
    pub fn validate(&self) -> FilterResult<()> {
        match self.ceiling {
            Some(range) if !range.is_ordered() => Err(FilterError::CeilingInverted {
                min: range.min,
                max: range.max,
            }),
            _ => Ok(()),
        }
    }
}
