//! Canned assistant replies about a single opportunity.
//!
//! Replies are picked by looking for topic words in the question; there is no
//! language understanding involved.

use chrono::NaiveDateTime;
use gsa_model::{Opportunity, Status};

use crate::filter::dates::{days_until, format_display_date};
use crate::filter::FIT_SCORE_THRESHOLD;

/// Fit scores at or above this (and below [`FIT_SCORE_THRESHOLD`]) are "moderate".
const MODERATE_FIT: i32 = 70;

/// Answers questions about an opportunity.
pub trait Assistant {
    /// Opening message shown before any question.
    fn greeting(&self, opp: &Opportunity) -> String;

    /// Reply to `question`, with `now` as the reference for deadlines.
    fn reply(&self, opp: &Opportunity, question: &str, now: NaiveDateTime) -> String;
}

/// What a question is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Fit,
    Deadline,
    Status,
    SetAside,
    Agency,
    Naics,
    General,
}

impl Topic {
    /// Trigger words per topic, checked in this order.
    const TRIGGERS: [(Topic, &'static [&'static str]); 6] = [
        (Topic::Fit, &["fit", "score"]),
        (Topic::Deadline, &["deadline", "due", "time"]),
        (Topic::Status, &["status", "progress"]),
        (Topic::SetAside, &["set-aside", "setaside"]),
        (Topic::Agency, &["agency", "client"]),
        (Topic::Naics, &["naics", "code"]),
    ];

    /// Classifies a question by the first topic whose trigger word it contains.
    pub fn classify(question: &str) -> Topic {
        let question = question.to_lowercase();
        Self::TRIGGERS
            .iter()
            .find(|(_, words)| words.iter().any(|w| question.contains(w)))
            .map_or(Topic::General, |(topic, _)| *topic)
    }
}

/// Keyword-driven assistant with fixed reply templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct CannedAssistant;

impl CannedAssistant {
    fn fit_reply(opp: &Opportunity) -> String {
        let (alignment, advice) = if opp.fit_score >= FIT_SCORE_THRESHOLD {
            ("strong", "prioritizing this bid")
        } else if opp.fit_score >= MODERATE_FIT {
            ("moderate", "shoring up the weaker areas of the proposal")
        } else {
            ("limited", "shoring up the weaker areas of the proposal")
        };
        format!(
            "A fit score of {} for \"{}\" suggests {alignment} alignment with your capabilities. Consider {advice} to improve your odds.",
            opp.fit_score, opp.title
        )
    }

    fn deadline_reply(opp: &Opportunity, now: NaiveDateTime) -> String {
        let pace = if opp.percent_complete < 50 {
            "Progress should pick up to make the deadline."
        } else {
            "You are on track; keep the pace to finish on time."
        };
        format!(
            "\"{}\" is due {}. That leaves {} days. {pace}",
            opp.title,
            format_display_date(opp.due_date),
            days_until(opp.due_date, now)
        )
    }

    fn status_reply(opp: &Opportunity) -> String {
        let next = match opp.status {
            Status::Draft => "Move it to Ready once every requirement is covered.",
            Status::Ready => "It is ready to submit. Make sure every document is final.",
            _ => "Good progress. Keep the momentum going.",
        };
        format!(
            "Current status: {}. Progress: {}%. {next}",
            opp.status, opp.percent_complete
        )
    }

    fn set_aside_reply(opp: &Opportunity) -> String {
        let note = if opp.set_aside.len() > 1 {
            "Qualifying under several set-asides widens your eligibility."
        } else {
            "Check that you meet the requirements of this set-aside."
        };
        format!(
            "This opportunity is set aside for: {}. {note}",
            opp.set_aside.join(", ")
        )
    }
}

impl Assistant for CannedAssistant {
    fn greeting(&self, opp: &Opportunity) -> String {
        format!(
            "Hi! Ask me anything about \"{}\": fit score, deadline, status, set-asides, agency or NAICS code.",
            opp.title
        )
    }

    fn reply(&self, opp: &Opportunity, question: &str, now: NaiveDateTime) -> String {
        match Topic::classify(question) {
            Topic::Fit => Self::fit_reply(opp),
            Topic::Deadline => Self::deadline_reply(opp, now),
            Topic::Status => Self::status_reply(opp),
            Topic::SetAside => Self::set_aside_reply(opp),
            Topic::Agency => format!(
                "{} is the contracting agency. Look at its past awards to tailor the proposal.",
                opp.agency
            ),
            Topic::Naics => format!(
                "NAICS {} classifies this opportunity. Make sure it matches one of your company's primary codes.",
                opp.naics
            ),
            Topic::General => format!(
                "I can help with \"{}\". Ask about fit score, deadlines, status, set-asides, the agency or the NAICS code.",
                opp.title
            ),
        }
    }
}
