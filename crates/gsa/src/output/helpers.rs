//! Common helper functions for output formatting.

use chrono::{NaiveDate, NaiveDateTime};
use gsa_model::{Ceiling, Status};
use gsa_search::filter::dates::{days_until, format_display_date};
use owo_colors::OwoColorize;

/// Width of the text progress bar.
const PROGRESS_BAR_WIDTH: usize = 20;

/// Truncates a string to a maximum number of characters.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

/// Formats a dollar amount with thousands separators, e.g. `$1,250,000`.
pub fn format_money(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if amount < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Formats a ceiling as a single figure or a range.
pub fn format_ceiling(ceiling: Option<&Ceiling>) -> String {
    match ceiling {
        None => String::new(),
        Some(Ceiling::Single(value)) => format_money(*value),
        Some(Ceiling::Range(range)) => {
            format!("{} - {}", format_money(range.min), format_money(range.max))
        }
    }
}

/// Describes how far away a due date is, e.g. `in 12 days` or `3 days ago`.
pub fn format_relative_due(date: NaiveDate, now: NaiveDateTime) -> String {
    match days_until(date, now) {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        -1 => "1 day ago".to_string(),
        days if days < 0 => format!("{} days ago", -days),
        days => format!("in {days} days"),
    }
}

/// Formats a due date for list output: `Mar 7, 2026 (in 12 days)`.
///
/// Past dates are red and dates within a week yellow.
pub fn format_due(date: NaiveDate, now: NaiveDateTime, use_colors: bool) -> String {
    let display = format!(
        "{} ({})",
        format_display_date(date),
        format_relative_due(date, now)
    );
    if !use_colors {
        return display;
    }
    match days_until(date, now) {
        days if days < 0 => display.red().to_string(),
        days if days <= 7 => display.yellow().to_string(),
        _ => display,
    }
}

/// Formats a status label, colored by stage.
pub fn format_status(status: Status, use_colors: bool) -> String {
    paint_status(status, status.as_str(), use_colors)
}

/// Colors `label` the way `status` is colored.
pub fn paint_status(status: Status, label: &str, use_colors: bool) -> String {
    if !use_colors {
        return label.to_string();
    }
    match status {
        Status::Draft => label.dimmed().to_string(),
        Status::Ready => label.blue().to_string(),
        Status::Submitted => label.green().to_string(),
        Status::Awarded => label.magenta().to_string(),
        Status::Lost => label.red().to_string(),
    }
}

/// Formats a fit score, green at 80 and above.
pub fn format_fit(score: i32, use_colors: bool) -> String {
    let label = score.to_string();
    if use_colors && score >= gsa_search::filter::FIT_SCORE_THRESHOLD {
        label.green().to_string()
    } else {
        label
    }
}

/// Renders a completion percentage as a bar, e.g. `[#####---------------] 25%`.
pub fn format_progress_bar(percent: u8) -> String {
    let percent = usize::from(percent.min(100));
    let filled = percent * PROGRESS_BAR_WIDTH / 100;
    format!(
        "[{}{}] {percent}%",
        "#".repeat(filled),
        "-".repeat(PROGRESS_BAR_WIDTH - filled)
    )
}

/// Formats a section header.
pub fn header(text: &str, use_colors: bool) -> String {
    if use_colors {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}
