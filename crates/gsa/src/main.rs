use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod dispatch;
mod output;

use cli::Cli;
use commands::{CommandContext, CommandError, SessionEnv};
use dispatch::{DataCommand, DataDispatch, NoDataCommand, NoDataDispatch};
use gsa_search::SessionError;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                let error_json = serde_json::json!({
                    "error": {
                        "code": error_code(&e),
                        "message": e.to_string(),
                    }
                });
                eprintln!("{error_json:#}");
            } else {
                eprintln!("Error: {e}");
            }
            error_exit_code(&e)
        }
    }
}

/// Installs the stderr log subscriber.
///
/// `--verbose` forces debug output; otherwise `GSA_LOG` is honored, falling
/// back to warnings only.
fn init_tracing(cli: &Cli) {
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else if cli.quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_env("GSA_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(!cli.no_color)
        .try_init();
}

async fn run(cli: &Cli) -> commands::Result<()> {
    let ctx = CommandContext::from_cli(cli);
    let env = SessionEnv::from_cli(cli);

    if let Some(dispatch) = NoDataDispatch::try_from_cli(cli) {
        return dispatch.execute(&ctx, &env);
    }

    match DataDispatch::from_cli(cli) {
        Some(dispatch) => dispatch.execute(&ctx, &env).await,
        None => Err(CommandError::Config(format!(
            "unhandled command: {:?}",
            cli.command
        ))),
    }
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::Dataset(_) => "DATASET_ERROR",
        CommandError::Session(SessionError::Filter(_)) => "FILTER_ERROR",
        CommandError::Session(SessionError::NotFound { .. }) => "NOT_FOUND",
        CommandError::Session(SessionError::InvalidTransition { .. }) => "INVALID_TRANSITION",
        CommandError::Store(_) => "STORE_ERROR",
        CommandError::Export(_) => "EXPORT_ERROR",
        CommandError::NotFound(_) => "NOT_FOUND",
        CommandError::Config(_) => "CONFIG_ERROR",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
    }
}

/// Returns the exit code for an error.
fn error_exit_code(e: &CommandError) -> ExitCode {
    match e {
        CommandError::Session(SessionError::Filter(_)) => ExitCode::from(1),
        CommandError::Session(SessionError::InvalidTransition { .. }) => ExitCode::from(1),
        CommandError::Json(_) => ExitCode::from(1),
        CommandError::Store(_) | CommandError::Export(_) | CommandError::Io(_) => ExitCode::from(3),
        CommandError::Session(SessionError::NotFound { .. }) | CommandError::NotFound(_) => {
            ExitCode::from(4)
        }
        CommandError::Config(_) | CommandError::Dataset(_) => ExitCode::from(5),
    }
}
