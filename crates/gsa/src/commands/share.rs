//! Share command implementation.
//!
//! Prints the query string that reproduces the current filters, and the full
//! link when `[share] base_url` is configured.

use gsa_search::codec::share_url;
use serde::Serialize;

use super::{CommandContext, Result, SessionEnv};

#[derive(Serialize)]
struct ShareOutput<'a> {
    query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
}

/// Executes the share command.
pub fn execute(ctx: &CommandContext, env: &SessionEnv) -> Result<()> {
    let (config, session) = env.restore_session()?;
    let query = session.location();
    let url = config
        .share
        .base_url
        .as_deref()
        .map(|base| share_url(base, &session.filters()));

    if ctx.json_output {
        let output = ShareOutput { query: &query, url };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    match url {
        Some(url) => println!("{url}"),
        None if query.is_empty() => {
            if !ctx.quiet {
                eprintln!("No filters set; nothing to share.");
            }
        }
        None => println!("{query}"),
    }
    Ok(())
}
