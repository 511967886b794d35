//! The opportunity record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Ceiling, Status};

/// A government contracting opportunity being tracked.
///
/// Records are read-only apart from [`status`](Self::status), which moves
/// forward through explicit user actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opportunity {
    /// Unique identifier.
    pub id: String,

    /// Opportunity title.
    pub title: String,

    /// Contracting agency name.
    pub agency: String,

    /// NAICS industry classification code.
    pub naics: String,

    /// Human-readable NAICS description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub naics_description: Option<String>,

    /// Set-aside category labels (e.g. "8(a)", "HUBZone").
    #[serde(default)]
    pub set_aside: Vec<String>,

    /// Contract vehicle name.
    pub vehicle: String,

    /// Proposal due date.
    pub due_date: NaiveDate,

    /// Current application status.
    pub status: Status,

    /// Completion percentage (0-100).
    pub percent_complete: u8,

    /// Suitability rating, conventionally 0-100.
    pub fit_score: i32,

    /// Contract ceiling, either a single figure or a range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ceiling: Option<Ceiling>,

    /// Free-text keywords.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,

    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Ordered proposal stages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stages: Option<Vec<Stage>>,
}

/// One step of an application's internal proposal workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    /// Stage label.
    pub stage: String,

    /// Whether the stage is done.
    pub completed: bool,

    /// When the stage was (or is planned to be) reached.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl Opportunity {
    /// Creates an opportunity with the required fields and no optional data.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        agency: impl Into<String>,
        naics: impl Into<String>,
        vehicle: impl Into<String>,
        due_date: NaiveDate,
        status: Status,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            agency: agency.into(),
            naics: naics.into(),
            naics_description: None,
            set_aside: Vec::new(),
            vehicle: vehicle.into(),
            due_date,
            status,
            percent_complete: 0,
            fit_score: 0,
            ceiling: None,
            keywords: None,
            description: None,
            stages: None,
        }
    }

    /// Returns the keyword list, or an empty slice when absent.
    pub fn keyword_list(&self) -> &[String] {
        self.keywords.as_deref().unwrap_or_default()
    }

    /// Returns the stage list, or an empty slice when absent.
    pub fn stage_list(&self) -> &[Stage] {
        self.stages.as_deref().unwrap_or_default()
    }

    /// Number of completed stages.
    pub fn completed_stages(&self) -> usize {
        self.stage_list().iter().filter(|s| s.completed).count()
    }
}
