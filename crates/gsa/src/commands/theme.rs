//! Theme command implementation.
//!
//! Shows or changes the saved dark-mode preference. With nothing saved, the
//! terminal's background decides.

use std::env;

use super::{CommandContext, Result, SessionEnv};
use crate::cli::ThemeArg;

/// Guesses whether the terminal has a dark background from `COLORFGBG`
/// (`"fg;bg"`, set by rxvt, Konsole and others). Unknown means light.
pub fn system_prefers_dark(colorfgbg: Option<&str>) -> bool {
    colorfgbg
        .and_then(|value| value.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok())
        .is_some_and(|bg| bg <= 6 || bg == 8)
}

fn label(dark: bool) -> &'static str {
    if dark {
        "dark"
    } else {
        "light"
    }
}

/// Executes the theme command.
pub fn execute(ctx: &CommandContext, mode: Option<ThemeArg>, env: &SessionEnv) -> Result<()> {
    let store = env.store()?;
    let system_dark = system_prefers_dark(env::var("COLORFGBG").ok().as_deref());
    let current = store.load_dark_mode(system_dark);

    let dark = match mode {
        None => current,
        Some(ThemeArg::Dark) => true,
        Some(ThemeArg::Light) => false,
        Some(ThemeArg::Toggle) => !current,
    };
    if mode.is_some() {
        store.save_dark_mode(dark);
    }

    if ctx.json_output {
        println!("{}", serde_json::json!({ "theme": label(dark), "dark": dark }));
    } else if !ctx.quiet {
        println!("{}", label(dark));
    }
    Ok(())
}
