//! Presets command implementation.
//!
//! Saves the current filters under a name, lists saved presets, and applies
//! the most recently saved one.

use chrono::{Local, Utc};
use gsa_search::Preset;

use super::{CommandContext, CommandError, Result, SessionEnv};
use crate::cli::PresetsCommands;
use crate::output::{format_preset_json, format_presets_json, format_presets_table};

/// Executes a presets subcommand. Listing is the default.
pub async fn execute(
    ctx: &CommandContext,
    command: Option<&PresetsCommands>,
    env: &SessionEnv,
) -> Result<()> {
    match command {
        None | Some(PresetsCommands::List) => execute_list(ctx, env),
        Some(PresetsCommands::Save { name }) => execute_save(ctx, name.as_deref(), env),
        Some(PresetsCommands::Load) => execute_load(ctx, env).await,
    }
}

/// Lists saved presets, oldest first.
pub fn execute_list(ctx: &CommandContext, env: &SessionEnv) -> Result<()> {
    let presets = env.store()?.load_presets();

    if ctx.json_output {
        println!("{}", format_presets_json(&presets)?);
    } else if !ctx.quiet {
        print!("{}", format_presets_table(&presets, ctx.use_colors));
    }
    Ok(())
}

/// Saves the current filters as a preset.
pub fn execute_save(ctx: &CommandContext, name: Option<&str>, env: &SessionEnv) -> Result<()> {
    let (_config, session) = env.restore_session()?;
    let store = env.store()?;

    let name = match name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => name.to_string(),
        None => Preset::default_name(Local::now()),
    };
    let preset = Preset::new(name, session.filters(), Utc::now());
    store.save_preset(preset.clone());

    if ctx.json_output {
        println!("{}", format_preset_json(&preset)?);
    } else if !ctx.quiet {
        println!("Saved preset '{}'", preset.name);
    }
    Ok(())
}

/// Applies the most recently saved preset and makes its filters current.
///
/// # Errors
///
/// Returns `CommandError::NotFound` if no preset was ever saved, and a store
/// error if the saved presets cannot be read.
pub async fn execute_load(ctx: &CommandContext, env: &SessionEnv) -> Result<()> {
    let store = env.store()?;
    let preset = store
        .last_preset()?
        .ok_or_else(|| CommandError::NotFound("No preset found".to_string()))?;

    let (_config, session) = env.restore_session()?;
    let count = session.apply_spec(preset.filters.clone()).await?;

    if ctx.json_output {
        let output = serde_json::json!({
            "preset": preset.name,
            "query": session.location(),
            "results": count,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        println!("Loaded preset '{}' ({} result(s))", preset.name, count);
    }
    Ok(())
}
