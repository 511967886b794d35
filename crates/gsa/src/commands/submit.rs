//! Submit command implementation.
//!
//! Moves a Ready opportunity to Submitted. The change is saved in the state
//! directory and laid over the dataset on later runs.

use owo_colors::OwoColorize;
use serde::Serialize;

use super::{CommandContext, Result, SessionEnv};
use crate::output::helpers::format_status;

/// JSON output for a status change.
#[derive(Serialize)]
struct SubmitOutput<'a> {
    id: &'a str,
    title: &'a str,
    status: gsa_model::Status,
}

/// Executes the submit command.
///
/// # Errors
///
/// Returns `SessionError::InvalidTransition` unless the opportunity is
/// currently Ready, and `SessionError::NotFound` for an unknown id.
pub fn execute(ctx: &CommandContext, id: &str, env: &SessionEnv) -> Result<()> {
    let (_config, session) = env.restore_session()?;
    let opp = session.mark_submitted(id)?;

    if ctx.json_output {
        let output = SubmitOutput {
            id: &opp.id,
            title: &opp.title,
            status: opp.status,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        let check = if ctx.use_colors {
            "✓".green().to_string()
        } else {
            "✓".to_string()
        };
        println!(
            "{} {} marked {}",
            check,
            opp.title,
            format_status(opp.status, ctx.use_colors)
        );
    }

    Ok(())
}
