//! Preset output formatting.

use chrono::{DateTime, Local, Utc};
use gsa_search::codec::to_query_string;
use gsa_search::Preset;
use owo_colors::OwoColorize;
use serde::Serialize;

use super::helpers::truncate_str;

/// JSON output structure for a preset.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetOutput<'a> {
    pub name: &'a str,
    pub created_at: DateTime<Utc>,
    pub query: String,
}

impl<'a> PresetOutput<'a> {
    pub fn new(preset: &'a Preset) -> Self {
        Self {
            name: &preset.name,
            created_at: preset.created_at,
            query: to_query_string(&preset.filters),
        }
    }
}

/// Formats presets as JSON.
pub fn format_presets_json(presets: &[Preset]) -> Result<String, serde_json::Error> {
    let output: Vec<PresetOutput> = presets.iter().map(PresetOutput::new).collect();
    serde_json::to_string_pretty(&output)
}

/// Formats one preset as JSON.
pub fn format_preset_json(preset: &Preset) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&PresetOutput::new(preset))
}

/// Formats presets as a table, oldest first.
pub fn format_presets_table(presets: &[Preset], use_colors: bool) -> String {
    if presets.is_empty() {
        return "No presets saved.\n".to_string();
    }

    let mut output = String::new();
    let header = format!("{:<28} {:<19} {}", "Name", "Created", "Filters");
    if use_colors {
        output.push_str(&format!("{}\n", header.dimmed()));
    } else {
        output.push_str(&header);
        output.push('\n');
    }

    for preset in presets {
        let query = to_query_string(&preset.filters);
        let filters = if query.is_empty() {
            "(none)".to_string()
        } else {
            query
        };
        output.push_str(&format!(
            "{:<28} {:<19} {}\n",
            truncate_str(&preset.name, 28),
            preset
                .created_at
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
            filters
        ));
    }

    output
}
