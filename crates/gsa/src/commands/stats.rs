//! Stats command implementation.
//!
//! Summarizes status counts and average completion over every opportunity,
//! regardless of the active filters.

use gsa_search::ProgressSummary;

use super::{CommandContext, Result, SessionEnv};
use crate::output::{format_summary, format_summary_json};

/// Executes the stats command.
pub fn execute(ctx: &CommandContext, env: &SessionEnv) -> Result<()> {
    let (_config, session) = env.restore_session()?;
    let records = session.records();
    let summary = ProgressSummary::from_opportunities(&records);

    if ctx.json_output {
        println!("{}", format_summary_json(&summary)?);
    } else if !ctx.quiet {
        print!("{}", format_summary(&summary, ctx.use_colors));
    }
    Ok(())
}
