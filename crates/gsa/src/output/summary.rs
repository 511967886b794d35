//! Progress summary and facet output formatting.

use gsa_model::Status;
use gsa_search::{FacetOptions, ProgressSummary};

use super::helpers::{format_progress_bar, header, paint_status};

/// Formats the progress summary as JSON.
pub fn format_summary_json(summary: &ProgressSummary) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(summary)
}

/// Formats the progress summary: one line per status, then the average.
pub fn format_summary(summary: &ProgressSummary, use_colors: bool) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "{} ({} total)\n",
        header("Application progress", use_colors),
        summary.total
    ));

    for status in Status::ALL {
        let label = paint_status(status, &format!("{:<10}", status.as_str()), use_colors);
        output.push_str(&format!("  {} {:>4}\n", label, summary.count(status)));
    }

    output.push_str(&format!(
        "\nAverage completion: {}\n",
        format_progress_bar(summary.average_percent_complete)
    ));
    output
}

/// Formats facet options as JSON.
pub fn format_facets_json(facets: &FacetOptions) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(facets)
}

/// Formats facet options as labelled lists.
pub fn format_facets(facets: &FacetOptions, use_colors: bool) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n", header("NAICS codes", use_colors)));
    for option in &facets.naics {
        output.push_str(&format!("  {}\n", option.label));
    }

    for (title, values) in [
        ("Agencies", &facets.agencies),
        ("Vehicles", &facets.vehicles),
        ("Set-asides", &facets.set_asides),
    ] {
        output.push_str(&format!("\n{}\n", header(title, use_colors)));
        if values.is_empty() {
            output.push_str("  (none)\n");
        }
        for value in values {
            output.push_str(&format!("  {}\n", value));
        }
    }

    output
}

/// Formats an agency search result, one name per line.
pub fn format_agency_matches(matches: &[&str]) -> String {
    if matches.is_empty() {
        return "No matching agencies.\n".to_string();
    }
    let mut output = String::new();
    for name in matches {
        output.push_str(name);
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use gsa_model::Opportunity;

    fn opp(id: &str, agency: &str, status: Status, percent: u8) -> Opportunity {
        let mut o = Opportunity::new(
            id,
            format!("Title {id}"),
            agency,
            "541512",
            "GSA MAS",
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            status,
        );
        o.percent_complete = percent;
        o
    }

    #[test]
    fn test_format_summary_counts_every_status() {
        let items = vec![
            opp("a", "DHS", Status::Draft, 10),
            opp("b", "VA", Status::Ready, 80),
            opp("c", "VA", Status::Ready, 60),
        ];
        let summary = ProgressSummary::from_opportunities(&items);
        let output = format_summary(&summary, false);

        assert!(output.starts_with("Application progress (3 total)\n"));
        assert!(output.contains("  Draft         1\n"));
        assert!(output.contains("  Ready         2\n"));
        assert!(output.contains("  Lost          0\n"));
        assert!(output.contains("Average completion: ["));
        assert!(output.trim_end().ends_with("50%"));
    }

    #[test]
    fn test_format_facets_lists_sections() {
        let items = vec![opp("a", "DHS", Status::Draft, 0), opp("b", "VA", Status::Ready, 0)];
        let facets = FacetOptions::from_opportunities(&items);
        let output = format_facets(&facets, false);

        assert!(output.contains("NAICS codes\n  541512 - Title a\n"));
        assert!(output.contains("Agencies\n  DHS\n  VA\n"));
        assert!(output.contains("Set-asides\n  (none)\n"));
    }

    #[test]
    fn test_format_agency_matches() {
        assert_eq!(format_agency_matches(&[]), "No matching agencies.\n");
        assert_eq!(format_agency_matches(&["DHS", "DHS-CBP"]), "DHS\nDHS-CBP\n");
    }
}
