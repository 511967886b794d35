//! Show command implementation.
//!
//! Prints one opportunity with its status timeline and proposal stages.

use chrono::Local;

use super::{CommandContext, Result, SessionEnv};
use crate::output::{format_opportunity_details, format_opportunity_details_json};

/// Executes the show command.
///
/// # Errors
///
/// Returns `SessionError::NotFound` (with a suggestion when a similar id
/// exists) if no opportunity has the given id.
pub fn execute(ctx: &CommandContext, id: &str, env: &SessionEnv) -> Result<()> {
    let (_config, session) = env.restore_session()?;
    let opp = session.find(id)?;
    let now = Local::now().naive_local();

    if ctx.json_output {
        println!("{}", format_opportunity_details_json(&opp, now)?);
    } else if !ctx.quiet {
        print!("{}", format_opportunity_details(&opp, now, ctx.use_colors));
    }

    Ok(())
}
