//! Ask command implementation.
//!
//! Answers a question about one opportunity with the canned assistant,
//! after the configured assistant delay.

use chrono::Local;
use gsa_search::{Assistant, CannedAssistant, JitterLatency, Latency};
use serde::Serialize;
use tracing::debug;

use super::{CommandContext, Result, SessionEnv};
use crate::output::helpers::header;

#[derive(Serialize)]
struct AskOutput<'a> {
    id: &'a str,
    question: &'a str,
    reply: &'a str,
}

/// Executes the ask command.
pub async fn execute(
    ctx: &CommandContext,
    id: &str,
    question: &[String],
    env: &SessionEnv,
) -> Result<()> {
    let (config, session) = env.restore_session()?;
    let opp = session.find(id)?;
    let question = question.join(" ");

    let (min, max) = config.latency.assistant_bounds();
    let delay = JitterLatency::from_millis(min, max).next_delay();
    if !delay.is_zero() {
        debug!(delay_ms = delay.as_millis() as u64, "assistant thinking");
        tokio::time::sleep(delay).await;
    }

    let assistant = CannedAssistant;
    let reply = assistant.reply(&opp, &question, Local::now().naive_local());

    if ctx.json_output {
        let output = AskOutput {
            id: &opp.id,
            question: &question,
            reply: &reply,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        if ctx.verbose {
            println!("{}\n", assistant.greeting(&opp));
        }
        println!("{} {}", header("Assistant:", ctx.use_colors), reply);
    }

    Ok(())
}
