//! Named filter presets.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::filter::FilterSpec;

/// A saved filter spec.
///
/// Presets are append-only; the most recently created one is the one that
/// "load preset" restores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    pub name: String,
    pub filters: FilterSpec,
    pub created_at: DateTime<Utc>,
}

impl Preset {
    /// Creates a preset stamped with `created_at`.
    pub fn new(name: impl Into<String>, filters: FilterSpec, created_at: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            filters,
            created_at,
        }
    }

    /// Default name for a preset saved at `at`, e.g. `Preset 2026-03-07 14:05:09`.
    pub fn default_name(at: DateTime<Local>) -> String {
        format!("Preset {}", at.format("%Y-%m-%d %H:%M:%S"))
    }
}

/// Returns the preset with the latest creation time.
///
/// On an exact tie the earlier entry in the list wins.
pub fn most_recent(presets: &[Preset]) -> Option<&Preset> {
    presets
        .iter()
        .reduce(|best, p| if p.created_at > best.created_at { p } else { best })
}
