//! Command dispatch module for routing CLI commands to their handlers.
//!
//! Commands split by what they need: configuration, completions, and the
//! display preferences run without a dataset; everything else opens a search
//! session over one.

use std::path::Path;

use crate::cli::{
    Cli, Commands, ConfigCommands, PresetsCommands, ResultArgs, SearchArgs, Shell, ThemeArg,
    ViewArg,
};
use crate::commands::{self, CommandContext, CommandError, Result, SessionEnv};

/// Trait for commands that run without loading the dataset.
pub trait NoDataCommand {
    /// Execute the command.
    fn execute(&self, ctx: &CommandContext, env: &SessionEnv) -> Result<()>;
}

/// Trait for commands that search the dataset.
#[allow(async_fn_in_trait)]
pub trait DataCommand {
    /// Execute the command against the dataset described by `env`.
    async fn execute(&self, ctx: &CommandContext, env: &SessionEnv) -> Result<()>;
}

/// Commands that don't load the dataset.
pub enum NoDataDispatch<'a> {
    Config(&'a Option<ConfigCommands>),
    Completions(Shell),
    View(Option<ViewArg>),
    Theme(Option<ThemeArg>),
    PresetsList,
    Help,
}

impl<'a> NoDataDispatch<'a> {
    /// Try to create a no-data dispatch from the CLI command.
    /// Returns None if the command needs the dataset.
    pub fn try_from_cli(cli: &'a Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::Config { command }) => Some(Self::Config(command)),
            Some(Commands::Completions { shell }) => Some(Self::Completions(*shell)),
            Some(Commands::View { mode }) => Some(Self::View(*mode)),
            Some(Commands::Theme { mode }) => Some(Self::Theme(*mode)),
            Some(Commands::Presets {
                command: None | Some(PresetsCommands::List),
            }) => Some(Self::PresetsList),
            None => Some(Self::Help),
            _ => None,
        }
    }
}

impl NoDataCommand for NoDataDispatch<'_> {
    fn execute(&self, ctx: &CommandContext, env: &SessionEnv) -> Result<()> {
        match self {
            Self::Config(command) => dispatch_config(ctx, command),
            Self::Completions(shell) => commands::completions::execute(*shell).map_err(CommandError::Io),
            Self::View(mode) => commands::view::execute(ctx, mode.map(Into::into), env),
            Self::Theme(mode) => commands::theme::execute(ctx, *mode, env),
            Self::PresetsList => commands::presets::execute_list(ctx, env),
            Self::Help => {
                if !ctx.quiet {
                    println!("gsa - GSA opportunity search");
                    println!("Use --help for usage information");
                }
                Ok(())
            }
        }
    }
}

/// Dispatch config subcommands.
fn dispatch_config(ctx: &CommandContext, command: &Option<ConfigCommands>) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::execute_show(ctx),
        Some(ConfigCommands::Set { key, value }) => {
            let opts = commands::config::ConfigSetOptions {
                key: key.clone(),
                value: value.clone(),
            };
            commands::config::execute_set(ctx, &opts)
        }
        Some(ConfigCommands::Path) => commands::config::execute_path(ctx),
    }
}

/// Commands that search the dataset.
pub enum DataDispatch<'a> {
    List {
        search: &'a SearchArgs,
        results: &'a ResultArgs,
        view: Option<ViewArg>,
    },
    Show {
        id: &'a str,
    },
    Submit {
        id: &'a str,
    },
    Export {
        results: &'a ResultArgs,
        output: Option<&'a Path>,
    },
    Share,
    Presets(&'a PresetsCommands),
    Ask {
        id: &'a str,
        question: &'a [String],
    },
    Stats,
    Facets {
        agency_search: Option<&'a str>,
    },
}

impl<'a> DataDispatch<'a> {
    /// Create a data dispatch from the CLI command.
    /// Returns None for commands handled by [`NoDataDispatch`].
    pub fn from_cli(cli: &'a Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::List {
                search,
                results,
                view,
            }) => Some(Self::List {
                search,
                results,
                view: *view,
            }),
            Some(Commands::Show { id }) => Some(Self::Show { id }),
            Some(Commands::Submit { id }) => Some(Self::Submit { id }),
            Some(Commands::Export { results, output }) => Some(Self::Export {
                results,
                output: output.as_deref(),
            }),
            Some(Commands::Share) => Some(Self::Share),
            Some(Commands::Presets {
                command: Some(command @ (PresetsCommands::Save { .. } | PresetsCommands::Load)),
            }) => Some(Self::Presets(command)),
            Some(Commands::Ask { id, question }) => Some(Self::Ask { id, question }),
            Some(Commands::Stats) => Some(Self::Stats),
            Some(Commands::Facets { agency_search }) => Some(Self::Facets {
                agency_search: agency_search.as_deref(),
            }),
            _ => None,
        }
    }
}

impl DataCommand for DataDispatch<'_> {
    async fn execute(&self, ctx: &CommandContext, env: &SessionEnv) -> Result<()> {
        match self {
            Self::List {
                search,
                results,
                view,
            } => {
                let opts = commands::list::ListOptions {
                    search,
                    results,
                    view: *view,
                };
                commands::list::execute(ctx, &opts, env).await
            }
            Self::Show { id } => commands::show::execute(ctx, id, env),
            Self::Submit { id } => commands::submit::execute(ctx, id, env),
            Self::Export { results, output } => {
                commands::export::execute(ctx, results, *output, env).await
            }
            Self::Share => commands::share::execute(ctx, env),
            Self::Presets(command) => commands::presets::execute(ctx, Some(*command), env).await,
            Self::Ask { id, question } => commands::ask::execute(ctx, id, question, env).await,
            Self::Stats => commands::stats::execute(ctx, env),
            Self::Facets { agency_search } => commands::facets::execute(ctx, *agency_search, env),
        }
    }
}
