//! Result ordering.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use gsa_model::Opportunity;
use serde::{Deserialize, Serialize};

use super::error::FilterError;

/// Field a result list can be ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    /// Due date, compared as instants.
    #[default]
    DueDate,
    /// Completion percentage.
    PercentComplete,
    /// Fit score.
    FitScore,
}

impl SortField {
    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::DueDate => "dueDate",
            SortField::PercentComplete => "percentComplete",
            SortField::FitScore => "fitScore",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = FilterError;

    /// Accepts the wire names as well as kebab/snake case spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "duedate" | "due" => Ok(SortField::DueDate),
            "percentcomplete" | "complete" | "progress" => Ok(SortField::PercentComplete),
            "fitscore" | "fit" => Ok(SortField::FitScore),
            _ => Err(FilterError::unknown_sort_field(s)),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

/// Field and direction for ordering results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortConfig {
    /// Creates a sort configuration.
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Column-header behaviour: clicking the current ascending column flips it
    /// to descending; any other click sorts that column ascending.
    pub fn toggle(&mut self, field: SortField) {
        self.direction = if self.field == field && self.direction == SortDirection::Asc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        self.field = field;
    }

    /// Three-way comparison of two opportunities.
    ///
    /// The direction is applied here rather than by reversing a sorted list,
    /// so equal keys compare `Equal` in both directions.
    pub fn compare(&self, a: &Opportunity, b: &Opportunity) -> Ordering {
        let ordering = match self.field {
            SortField::DueDate => a.due_date.cmp(&b.due_date),
            SortField::PercentComplete => a.percent_complete.cmp(&b.percent_complete),
            SortField::FitScore => a.fit_score.cmp(&b.fit_score),
        };

        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Sorts opportunities in place. The sort is stable: ties keep input order.
pub fn sort_opportunities(items: &mut [&Opportunity], config: SortConfig) {
    items.sort_by(|a, b| config.compare(a, b));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use gsa_model::Status;

    fn make_opp(id: &str, due: (i32, u32, u32), percent: u8, fit: i32) -> Opportunity {
        let mut opp = Opportunity::new(
            id,
            "Title",
            "GSA",
            "541511",
            "MAS",
            NaiveDate::from_ymd_opt(due.0, due.1, due.2).unwrap(),
            Status::Draft,
        );
        opp.percent_complete = percent;
        opp.fit_score = fit;
        opp
    }

    fn ids(items: &[&Opportunity]) -> Vec<String> {
        items.iter().map(|o| o.id.clone()).collect()
    }

    #[test]
    fn test_sort_by_due_date_ascending() {
        let a = make_opp("a", (2026, 5, 1), 0, 0);
        let b = make_opp("b", (2026, 1, 1), 0, 0);
        let c = make_opp("c", (2026, 3, 1), 0, 0);
        let mut items = vec![&a, &b, &c];

        sort_opportunities(&mut items, SortConfig::default());
        assert_eq!(ids(&items), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_sort_by_due_date_across_years() {
        // Compared as dates, not as display strings.
        let a = make_opp("a", (2027, 1, 2), 0, 0);
        let b = make_opp("b", (2026, 12, 31), 0, 0);
        let mut items = vec![&a, &b];

        sort_opportunities(&mut items, SortConfig::default());
        assert_eq!(ids(&items), vec!["b", "a"]);
    }

    #[test]
    fn test_sort_by_percent_complete_descending() {
        let a = make_opp("a", (2026, 1, 1), 10, 0);
        let b = make_opp("b", (2026, 1, 1), 90, 0);
        let c = make_opp("c", (2026, 1, 1), 50, 0);
        let mut items = vec![&a, &b, &c];

        sort_opportunities(
            &mut items,
            SortConfig::new(SortField::PercentComplete, SortDirection::Desc),
        );
        assert_eq!(ids(&items), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_ties_keep_input_order_in_both_directions() {
        let first = make_opp("first", (2026, 1, 1), 0, 75);
        let second = make_opp("second", (2026, 2, 1), 0, 75);
        let high = make_opp("high", (2026, 3, 1), 0, 90);

        let mut asc = vec![&first, &second, &high];
        sort_opportunities(&mut asc, SortConfig::new(SortField::FitScore, SortDirection::Asc));
        assert_eq!(ids(&asc), vec!["first", "second", "high"]);

        let mut desc = vec![&first, &second, &high];
        sort_opportunities(&mut desc, SortConfig::new(SortField::FitScore, SortDirection::Desc));
        assert_eq!(ids(&desc), vec!["high", "first", "second"]);
    }

    #[test]
    fn test_toggle_same_field_flips_direction() {
        let mut config = SortConfig::default();
        config.toggle(SortField::DueDate);
        assert_eq!(config, SortConfig::new(SortField::DueDate, SortDirection::Desc));

        config.toggle(SortField::DueDate);
        assert_eq!(config, SortConfig::new(SortField::DueDate, SortDirection::Asc));
    }

    #[test]
    fn test_toggle_new_field_starts_ascending() {
        let mut config = SortConfig::new(SortField::DueDate, SortDirection::Desc);
        config.toggle(SortField::FitScore);
        assert_eq!(config, SortConfig::new(SortField::FitScore, SortDirection::Asc));
    }

    #[test]
    fn test_parse_sort_field() {
        assert_eq!("dueDate".parse::<SortField>().unwrap(), SortField::DueDate);
        assert_eq!("percent-complete".parse::<SortField>().unwrap(), SortField::PercentComplete);
        assert_eq!("fit_score".parse::<SortField>().unwrap(), SortField::FitScore);
        assert!("title".parse::<SortField>().is_err());
    }
}
