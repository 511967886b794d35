//! Application status and its progression.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Where an application stands in the bid process.
///
/// Variants are declared in timeline order, so the derived `Ord` follows
/// `Draft < Ready < Submitted < Awarded < Lost`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Status {
    Draft,
    Ready,
    Submitted,
    Awarded,
    Lost,
}

/// The linear track shown on the status timeline. `Lost` is not part of it.
const PROGRESSION: [Status; 4] = [
    Status::Draft,
    Status::Ready,
    Status::Submitted,
    Status::Awarded,
];

/// One row of a rendered status timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    /// The status this row represents.
    pub status: Status,
    /// The application has reached (or passed) this status.
    pub is_active: bool,
    /// This is the application's current status.
    pub is_current: bool,
}

/// Error returned when parsing an unknown status label.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown status '{0}' (expected Draft, Ready, Submitted, Awarded or Lost)")]
pub struct ParseStatusError(pub String);

impl Status {
    /// All statuses in declaration order.
    pub const ALL: [Status; 5] = [
        Status::Draft,
        Status::Ready,
        Status::Submitted,
        Status::Awarded,
        Status::Lost,
    ];

    /// Returns the display label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Draft => "Draft",
            Status::Ready => "Ready",
            Status::Submitted => "Submitted",
            Status::Awarded => "Awarded",
            Status::Lost => "Lost",
        }
    }

    /// Returns true if the status graph allows moving from `self` to `next`.
    ///
    /// The forward track is `Draft -> Ready -> Submitted -> Awarded`. `Lost`
    /// can be reached from `Ready`, `Submitted` or `Awarded`, and is terminal.
    pub fn can_transition_to(&self, next: Status) -> bool {
        use Status::*;

        matches!(
            (self, next),
            (Draft, Ready)
                | (Ready, Submitted)
                | (Submitted, Awarded)
                | (Ready, Lost)
                | (Submitted, Lost)
                | (Awarded, Lost)
        )
    }

    /// Returns true if no further transition is possible.
    pub fn is_terminal(&self) -> bool {
        *self == Status::Lost
    }

    /// Builds the status timeline for an application currently in `self`.
    ///
    /// The `Draft..Awarded` track is always present; entries up to the current
    /// status are active. A `Lost` application gets an extra terminal entry and
    /// no active track entries, since the status it was lost from is unknown.
    pub fn timeline(&self) -> Vec<TimelineEntry> {
        let current = PROGRESSION.iter().position(|s| s == self);

        let mut entries: Vec<TimelineEntry> = PROGRESSION
            .iter()
            .enumerate()
            .map(|(index, status)| TimelineEntry {
                status: *status,
                is_active: current.is_some_and(|c| index <= c),
                is_current: current == Some(index),
            })
            .collect();

        if self.is_terminal() {
            entries.push(TimelineEntry {
                status: Status::Lost,
                is_active: true,
                is_current: true,
            });
        }

        entries
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| ParseStatusError(s.to_string()))
    }
}
