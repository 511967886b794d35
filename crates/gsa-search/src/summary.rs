//! Aggregates over a list of opportunities: progress counts and the option
//! lists offered when editing filters.

use std::collections::{BTreeMap, BTreeSet};

use gsa_model::{Opportunity, Status};
use serde::Serialize;
use strsim::levenshtein;

/// Maximum Levenshtein distance to consider a value as a suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Status distribution and average completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressSummary {
    pub total: usize,
    /// Counts per status, in status order. Statuses with no records are absent.
    pub by_status: BTreeMap<Status, usize>,
    /// Mean completion percentage, rounded; 0 for an empty list.
    pub average_percent_complete: u8,
}

impl ProgressSummary {
    pub fn from_opportunities<'a>(items: impl IntoIterator<Item = &'a Opportunity>) -> Self {
        let mut by_status = BTreeMap::new();
        let mut total = 0usize;
        let mut percent_sum = 0u64;

        for opp in items {
            *by_status.entry(opp.status).or_insert(0) += 1;
            total += 1;
            percent_sum += u64::from(opp.percent_complete);
        }

        let average_percent_complete = if total == 0 {
            0
        } else {
            let total = total as u64;
            // Round half up.
            u8::try_from((percent_sum * 2 + total) / (total * 2)).unwrap_or(u8::MAX)
        };

        Self {
            total,
            by_status,
            average_percent_complete,
        }
    }

    /// Count for one status, 0 if none.
    pub fn count(&self, status: Status) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }
}

/// A NAICS code with its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NaicsOption {
    pub code: String,
    pub label: String,
}

/// Distinct values present in the dataset, sorted, for building filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FacetOptions {
    pub naics: Vec<NaicsOption>,
    pub vehicles: Vec<String>,
    pub agencies: Vec<String>,
    pub set_asides: Vec<String>,
}

impl FacetOptions {
    /// Collects the distinct values of each facet.
    ///
    /// A NAICS label uses the first description found for the code, falling
    /// back to the title of the first record carrying it.
    pub fn from_opportunities(items: &[Opportunity]) -> Self {
        let mut naics: BTreeMap<&str, &str> = BTreeMap::new();
        for opp in items {
            if let Some(description) = opp.naics_description.as_deref().filter(|d| !d.is_empty()) {
                naics.entry(opp.naics.as_str()).or_insert(description);
            }
        }
        for opp in items {
            naics.entry(opp.naics.as_str()).or_insert(opp.title.as_str());
        }

        let distinct = |values: BTreeSet<&String>| values.into_iter().cloned().collect::<Vec<_>>();

        Self {
            naics: naics
                .into_iter()
                .map(|(code, label)| NaicsOption {
                    code: code.to_string(),
                    label: format!("{code} - {label}"),
                })
                .collect(),
            vehicles: distinct(items.iter().map(|o| &o.vehicle).collect()),
            agencies: distinct(items.iter().map(|o| &o.agency).collect()),
            set_asides: distinct(items.iter().flat_map(|o| o.set_aside.iter()).collect()),
        }
    }

    /// Agencies whose name contains `query`, ignoring case.
    pub fn matching_agencies(&self, query: &str) -> Vec<&str> {
        let query = query.to_lowercase();
        self.agencies
            .iter()
            .filter(|a| a.to_lowercase().contains(&query))
            .map(String::as_str)
            .collect()
    }
}

/// Finds the closest candidate to `query` by edit distance, ignoring case.
///
/// Returns `None` for an exact match or when nothing is within 3 edits.
pub fn suggest_similar<'a>(query: &str, candidates: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let query_lower = query.to_lowercase();

    let (best_match, best_distance) = candidates
        .into_iter()
        .filter(|name| !name.is_empty())
        .map(|name| (name, levenshtein(&query_lower, &name.to_lowercase())))
        .min_by_key(|(_, d)| *d)?;

    if best_distance > 0 && best_distance <= MAX_SUGGESTION_DISTANCE {
        Some(best_match)
    } else {
        None
    }
}
