//! View command implementation.
//!
//! Shows or changes the saved result layout used by `list`.

use gsa_search::ViewMode;

use super::{CommandContext, Result, SessionEnv};

/// Executes the view command.
pub fn execute(ctx: &CommandContext, mode: Option<ViewMode>, env: &SessionEnv) -> Result<()> {
    let store = env.store()?;
    let mode = match mode {
        Some(mode) => {
            store.save_view_mode(mode);
            mode
        }
        None => store.load_view_mode(),
    };

    if ctx.json_output {
        println!("{}", serde_json::json!({ "view": mode }));
    } else if !ctx.quiet {
        println!("{mode}");
    }
    Ok(())
}
