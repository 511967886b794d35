//! Opportunity output formatting.

use chrono::{NaiveDate, NaiveDateTime};
use gsa_model::{Ceiling, Opportunity, Stage, Status, TimelineEntry};
use gsa_search::filter::dates::{days_until, format_display_date};
use owo_colors::OwoColorize;
use serde::Serialize;

use super::helpers::{
    format_ceiling, format_due, format_fit, format_progress_bar, format_status, header,
    paint_status, truncate_str,
};

/// JSON output structure for the list command.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOutput<'a> {
    pub total: usize,
    pub query: &'a str,
    pub opportunities: Vec<OpportunityOutput<'a>>,
}

/// JSON output structure for a single opportunity.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityOutput<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub agency: &'a str,
    pub naics: &'a str,
    pub set_aside: &'a [String],
    pub vehicle: &'a str,
    pub due_date: NaiveDate,
    pub days_until_due: i64,
    pub status: Status,
    pub percent_complete: u8,
    pub fit_score: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ceiling: Option<&'a Ceiling>,
}

impl<'a> OpportunityOutput<'a> {
    fn new(opp: &'a Opportunity, now: NaiveDateTime) -> Self {
        Self {
            id: &opp.id,
            title: &opp.title,
            agency: &opp.agency,
            naics: &opp.naics,
            set_aside: &opp.set_aside,
            vehicle: &opp.vehicle,
            due_date: opp.due_date,
            days_until_due: days_until(opp.due_date, now),
            status: opp.status,
            percent_complete: opp.percent_complete,
            fit_score: opp.fit_score,
            ceiling: opp.ceiling.as_ref(),
        }
    }
}

/// JSON output structure for opportunity details (show command).
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityDetailsOutput<'a> {
    #[serde(flatten)]
    pub summary: OpportunityOutput<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub naics_description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    pub keywords: &'a [String],
    pub stages: &'a [Stage],
    pub timeline: Vec<TimelineEntry>,
}

/// Formats opportunities as JSON.
pub fn format_opportunities_json(
    items: &[Opportunity],
    query: &str,
    now: NaiveDateTime,
) -> Result<String, serde_json::Error> {
    let output = ListOutput {
        total: items.len(),
        query,
        opportunities: items.iter().map(|o| OpportunityOutput::new(o, now)).collect(),
    };
    serde_json::to_string_pretty(&output)
}

/// Formats opportunity details as JSON (show command).
pub fn format_opportunity_details_json(
    opp: &Opportunity,
    now: NaiveDateTime,
) -> Result<String, serde_json::Error> {
    let output = OpportunityDetailsOutput {
        summary: OpportunityOutput::new(opp, now),
        naics_description: opp.naics_description.as_deref(),
        description: opp.description.as_deref(),
        keywords: opp.keyword_list(),
        stages: opp.stage_list(),
        timeline: opp.status.timeline(),
    };
    serde_json::to_string_pretty(&output)
}

/// Formats opportunities as a table.
pub fn format_opportunities_table(items: &[Opportunity], now: NaiveDateTime, use_colors: bool) -> String {
    if items.is_empty() {
        return "No opportunities found.\n".to_string();
    }

    let mut output = String::new();

    let header_line = format!(
        "{:<10} {:<32} {:<8} {:<12} {:<10} {:>4} {:>4} {}",
        "ID", "Title", "Agency", "Due", "Status", "Fit", "Done", "Ceiling"
    );
    if use_colors {
        output.push_str(&format!("{}\n", header_line.dimmed()));
    } else {
        output.push_str(&header_line);
        output.push('\n');
    }

    for opp in items {
        // Pad before coloring so escape codes don't break alignment.
        let status = paint_status(opp.status, &format!("{:<10}", opp.status.as_str()), use_colors);
        let due = format!("{:<12}", opp.due_date.to_string());
        let due = if use_colors && days_until(opp.due_date, now) < 0 {
            due.red().to_string()
        } else {
            due
        };

        let line = format!(
            "{:<10} {:<32} {:<8} {} {} {:>4} {:>3}% {}",
            truncate_str(&opp.id, 10),
            truncate_str(&opp.title, 32),
            truncate_str(&opp.agency, 8),
            due,
            status,
            opp.fit_score,
            opp.percent_complete,
            format_ceiling(opp.ceiling.as_ref()),
        );
        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Formats opportunities as cards.
pub fn format_opportunity_cards(items: &[Opportunity], now: NaiveDateTime, use_colors: bool) -> String {
    if items.is_empty() {
        return "No opportunities found.\n".to_string();
    }

    let mut output = String::new();
    for (i, opp) in items.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        output.push_str(&format!(
            "{}  {}\n",
            header(&opp.title, use_colors),
            format_status(opp.status, use_colors)
        ));

        let id = if use_colors {
            opp.id.dimmed().to_string()
        } else {
            opp.id.clone()
        };
        output.push_str(&format!("  {} | {} | {}\n", id, opp.agency, opp.vehicle));
        output.push_str(&format!("  Due:       {}\n", format_due(opp.due_date, now, use_colors)));
        output.push_str(&format!("  NAICS:     {}\n", opp.naics));
        if !opp.set_aside.is_empty() {
            output.push_str(&format!("  Set-aside: {}\n", opp.set_aside.join(", ")));
        }
        if opp.ceiling.is_some() {
            output.push_str(&format!("  Ceiling:   {}\n", format_ceiling(opp.ceiling.as_ref())));
        }
        output.push_str(&format!(
            "  Fit:       {}   Progress: {}\n",
            format_fit(opp.fit_score, use_colors),
            format_progress_bar(opp.percent_complete)
        ));
    }

    output
}

/// Formats opportunity details (show command).
pub fn format_opportunity_details(opp: &Opportunity, now: NaiveDateTime, use_colors: bool) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n", header(&opp.title, use_colors)));
    output.push_str(&format!("{}\n\n", "=".repeat(opp.title.chars().count())));

    output.push_str(&format!("ID:        {}\n", opp.id));
    output.push_str(&format!("Status:    {}\n", format_status(opp.status, use_colors)));
    output.push_str(&format!("Fit score: {}\n", format_fit(opp.fit_score, use_colors)));
    output.push_str(&format!("Agency:    {}\n", opp.agency));
    match opp.naics_description.as_deref() {
        Some(description) if !description.is_empty() => {
            output.push_str(&format!("NAICS:     {} - {}\n", opp.naics, description))
        }
        _ => output.push_str(&format!("NAICS:     {}\n", opp.naics)),
    }
    output.push_str(&format!("Vehicle:   {}\n", opp.vehicle));
    output.push_str(&format!("Due:       {}\n", format_due(opp.due_date, now, use_colors)));
    if !opp.set_aside.is_empty() {
        output.push_str(&format!("Set-aside: {}\n", opp.set_aside.join(", ")));
    }
    if opp.ceiling.is_some() {
        output.push_str(&format!("Ceiling:   {}\n", format_ceiling(opp.ceiling.as_ref())));
    }
    output.push_str(&format!("Progress:  {}\n", format_progress_bar(opp.percent_complete)));

    if let Some(description) = opp.description.as_deref() {
        output.push_str(&format!("\n{}\n", description));
    }

    let keywords = opp.keyword_list();
    if !keywords.is_empty() {
        output.push_str(&format!("\nKeywords: {}\n", keywords.join(", ")));
    }

    output.push_str(&format!("\n{}\n", header("Timeline", use_colors)));
    output.push_str(&format_timeline(&opp.status.timeline(), use_colors));

    let stages = opp.stage_list();
    if !stages.is_empty() {
        output.push_str(&format!(
            "\n{} ({}/{})\n",
            header("Stages", use_colors),
            opp.completed_stages(),
            stages.len()
        ));
        for stage in stages {
            let mark = if stage.completed { "[x]" } else { "[ ]" };
            match stage.date {
                Some(date) => output.push_str(&format!(
                    "  {} {} ({})\n",
                    mark,
                    stage.stage,
                    format_display_date(date)
                )),
                None => output.push_str(&format!("  {} {}\n", mark, stage.stage)),
            }
        }
    }

    output
}

/// Formats the status timeline, one row per status.
fn format_timeline(entries: &[TimelineEntry], use_colors: bool) -> String {
    let mut output = String::new();
    for entry in entries {
        let marker = match (entry.is_current, entry.is_active) {
            (true, _) => "●",
            (false, true) => "✓",
            (false, false) => "○",
        };
        let label = if entry.is_current {
            format_status(entry.status, use_colors)
        } else if !entry.is_active && use_colors {
            entry.status.as_str().dimmed().to_string()
        } else {
            entry.status.as_str().to_string()
        };
        let suffix = if entry.is_current { "  (current)" } else { "" };
        output.push_str(&format!("  {} {}{}\n", marker, label, suffix));
    }
    output
}
