//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the gsa CLI.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use gsa_search::filter::{QuickFilter, SortConfig, SortDirection, SortField};
use gsa_search::ViewMode;

/// gsa - Search and track GSA contracting opportunities
#[derive(Parser, Debug)]
#[command(name = "gsa")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (show debug information)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Opportunity dataset (JSON array of records)
    #[arg(long, global = true, env = "GSA_DATA", value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Directory holding saved filters, presets and preferences
    #[arg(long, global = true, env = "GSA_STATE_DIR", value_name = "DIR")]
    pub state_dir: Option<PathBuf>,

    /// Shared filter query (e.g. "agencies=DHS&setAside=8%28a%29"); takes
    /// precedence over saved filters
    #[arg(long, global = true, value_name = "QUERY")]
    pub query: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search opportunities
    #[command(alias = "l")]
    List {
        #[command(flatten)]
        search: SearchArgs,

        #[command(flatten)]
        results: ResultArgs,

        /// Layout (default: the saved view mode)
        #[arg(long, value_enum)]
        view: Option<ViewArg>,
    },

    /// Show opportunity details
    #[command(alias = "s")]
    Show {
        /// Opportunity ID
        id: String,
    },

    /// Mark a Ready opportunity as Submitted
    Submit {
        /// Opportunity ID
        id: String,
    },

    /// Export the current results as CSV
    Export {
        #[command(flatten)]
        results: ResultArgs,

        /// Output file or directory (default: current directory)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Print the query string for the current filters
    Share,

    /// Manage saved filter presets
    Presets {
        #[command(subcommand)]
        command: Option<PresetsCommands>,
    },

    /// Show or set the result layout
    View {
        /// New layout
        #[arg(value_enum)]
        mode: Option<ViewArg>,
    },

    /// Show or set the color theme
    Theme {
        /// New theme
        #[arg(value_enum)]
        mode: Option<ThemeArg>,
    },

    /// Ask the assistant about an opportunity
    Ask {
        /// Opportunity ID
        id: String,

        /// Question text
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },

    /// Show progress across all opportunities
    Stats,

    /// List the values available for each filter
    Facets {
        /// Only show agencies containing this text
        #[arg(long, value_name = "TEXT")]
        agency_search: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Filter edits applied on top of the restored filters.
#[derive(Args, Debug, Default, Clone)]
pub struct SearchArgs {
    /// Clear the restored filters before applying these flags
    #[arg(long)]
    pub reset: bool,

    /// NAICS code (exact match)
    #[arg(long)]
    pub naics: Option<String>,

    /// Set-aside category (repeatable, any of)
    #[arg(long = "set-aside", value_name = "LABEL", action = clap::ArgAction::Append)]
    pub set_aside: Vec<String>,

    /// Contract vehicle (exact match)
    #[arg(long)]
    pub vehicle: Option<String>,

    /// Agency (repeatable, any of)
    #[arg(long, value_name = "NAME", action = clap::ArgAction::Append)]
    pub agency: Vec<String>,

    /// Earliest due date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub from: Option<NaiveDate>,

    /// Latest due date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub to: Option<NaiveDate>,

    /// Due within the next N days
    #[arg(long, value_name = "DAYS", conflicts_with_all = ["from", "to"])]
    pub within_days: Option<u32>,

    /// Lower ceiling bound in dollars
    #[arg(long, value_name = "AMOUNT", requires = "ceiling_max", allow_negative_numbers = true)]
    pub ceiling_min: Option<i64>,

    /// Upper ceiling bound in dollars
    #[arg(long, value_name = "AMOUNT", requires = "ceiling_min", allow_negative_numbers = true)]
    pub ceiling_max: Option<i64>,

    /// Keyword matched against title, description and keywords (repeatable)
    #[arg(short, long, value_name = "WORD", action = clap::ArgAction::Append)]
    pub keyword: Vec<String>,
}

/// Quick filter and ordering of the result list.
#[derive(Args, Debug, Default, Clone)]
pub struct ResultArgs {
    /// Quick filter applied after the search
    #[arg(long, value_enum)]
    pub quick: Option<QuickArg>,

    /// Sort field
    #[arg(long, value_enum)]
    pub sort: Option<SortArg>,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,
}

impl ResultArgs {
    /// The sort order these flags select.
    pub fn sort_config(&self) -> SortConfig {
        let field = self.sort.map(SortField::from).unwrap_or_default();
        let direction = if self.desc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        SortConfig::new(field, direction)
    }

    pub fn quick_filter(&self) -> Option<QuickFilter> {
        self.quick.map(QuickFilter::from)
    }
}

/// Quick filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum QuickArg {
    Due30,
    Due60,
    Due90,
    Fit80,
}

impl From<QuickArg> for QuickFilter {
    fn from(arg: QuickArg) -> Self {
        match arg {
            QuickArg::Due30 => QuickFilter::Due30,
            QuickArg::Due60 => QuickFilter::Due60,
            QuickArg::Due90 => QuickFilter::Due90,
            QuickArg::Fit80 => QuickFilter::Fit80,
        }
    }
}

/// Sort fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    /// Due date
    Due,
    /// Percent complete
    Progress,
    /// Fit score
    Fit,
}

impl From<SortArg> for SortField {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Due => SortField::DueDate,
            SortArg::Progress => SortField::PercentComplete,
            SortArg::Fit => SortField::FitScore,
        }
    }
}

/// Result layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewArg {
    Card,
    Table,
}

impl From<ViewArg> for ViewMode {
    fn from(arg: ViewArg) -> Self {
        match arg {
            ViewArg::Card => ViewMode::Card,
            ViewArg::Table => ViewMode::Table,
        }
    }
}

/// Theme changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    Dark,
    Light,
    Toggle,
}

/// Preset subcommands
#[derive(Subcommand, Debug)]
pub enum PresetsCommands {
    /// List saved presets
    List,

    /// Save the current filters as a preset
    Save {
        /// Preset name (default: timestamped)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Apply the most recently saved preset
    Load,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. "data.path", "latency.apply_max_ms")
        key: String,

        /// Value to set
        value: String,
    },

    /// Show config file path
    Path,
}

/// Supported shells for completion generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["gsa", "--verbose", "list"]);
        assert!(cli.verbose);
        assert!(!cli.quiet);
        assert!(!cli.json);

        let cli = Cli::parse_from(["gsa", "--quiet", "--json", "list"]);
        assert!(!cli.verbose);
        assert!(cli.quiet);
        assert!(cli.json);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["gsa", "-q", "-v", "list"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "gsa",
            "list",
            "--data",
            "opps.json",
            "--state-dir",
            "/tmp/gsa",
            "--query",
            "agencies=DHS",
        ]);
        assert_eq!(cli.data, Some(PathBuf::from("opps.json")));
        assert_eq!(cli.state_dir, Some(PathBuf::from("/tmp/gsa")));
        assert_eq!(cli.query.as_deref(), Some("agencies=DHS"));
    }

    #[test]
    fn test_list_alias() {
        let cli = Cli::parse_from(["gsa", "l"]);
        assert!(matches!(cli.command, Some(Commands::List { .. })));
    }

    #[test]
    fn test_show_alias() {
        let cli = Cli::parse_from(["gsa", "s", "opp-1"]);
        match cli.command {
            Some(Commands::Show { id }) => assert_eq!(id, "opp-1"),
            other => panic!("expected show, got {other:?}"),
        }
    }

    // ===== List flags =====

    #[test]
    fn test_list_repeatable_flags() {
        let cli = Cli::parse_from([
            "gsa",
            "list",
            "--agency",
            "DHS",
            "--agency",
            "VA",
            "--set-aside",
            "8(a)",
            "-k",
            "cloud",
            "-k",
            "zero trust",
        ]);
        let Some(Commands::List { search, .. }) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(search.agency, vec!["DHS", "VA"]);
        assert_eq!(search.set_aside, vec!["8(a)"]);
        assert_eq!(search.keyword, vec!["cloud", "zero trust"]);
    }

    #[test]
    fn test_list_date_flags() {
        let cli = Cli::parse_from(["gsa", "list", "--from", "2025-01-01", "--to", "2025-06-30"]);
        let Some(Commands::List { search, .. }) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(search.from, NaiveDate::from_ymd_opt(2025, 1, 1));
        assert_eq!(search.to, NaiveDate::from_ymd_opt(2025, 6, 30));
    }

    #[test]
    fn test_list_rejects_bad_date() {
        let result = Cli::try_parse_from(["gsa", "list", "--from", "01/02/2025"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_within_days_conflicts_with_range() {
        let result = Cli::try_parse_from(["gsa", "list", "--within-days", "30", "--from", "2025-01-01"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_ceiling_bounds_require_each_other() {
        assert!(Cli::try_parse_from(["gsa", "list", "--ceiling-min", "10"]).is_err());
        assert!(Cli::try_parse_from(["gsa", "list", "--ceiling-max", "10"]).is_err());

        let cli = Cli::parse_from(["gsa", "list", "--ceiling-min", "60", "--ceiling-max", "40"]);
        let Some(Commands::List { search, .. }) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(search.ceiling_min, Some(60));
        assert_eq!(search.ceiling_max, Some(40));
    }

    #[test]
    fn test_list_quick_and_sort() {
        let cli = Cli::parse_from(["gsa", "list", "--quick", "fit80", "--sort", "fit", "--desc", "--view", "table"]);
        let Some(Commands::List { results, view, .. }) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(results.quick_filter(), Some(QuickFilter::Fit80));
        assert_eq!(
            results.sort_config(),
            SortConfig::new(SortField::FitScore, SortDirection::Desc)
        );
        assert_eq!(view, Some(ViewArg::Table));
    }

    #[test]
    fn test_sort_defaults_to_due_ascending() {
        let results = ResultArgs::default();
        assert_eq!(results.sort_config(), SortConfig::default());
        assert_eq!(results.quick_filter(), None);
    }

    #[test]
    fn test_list_rejects_unknown_quick_filter() {
        let result = Cli::try_parse_from(["gsa", "list", "--quick", "due45"]);
        assert!(result.is_err());
    }

    // ===== Other commands =====

    #[test]
    fn test_ask_collects_question_words() {
        let cli = Cli::parse_from(["gsa", "ask", "opp-1", "when", "is", "it", "due?"]);
        match cli.command {
            Some(Commands::Ask { id, question }) => {
                assert_eq!(id, "opp-1");
                assert_eq!(question.join(" "), "when is it due?");
            }
            other => panic!("expected ask, got {other:?}"),
        }
    }

    #[test]
    fn test_ask_requires_question() {
        assert!(Cli::try_parse_from(["gsa", "ask", "opp-1"]).is_err());
    }

    #[test]
    fn test_presets_save_name() {
        let cli = Cli::parse_from(["gsa", "presets", "save", "--name", "DHS cloud"]);
        match cli.command {
            Some(Commands::Presets {
                command: Some(PresetsCommands::Save { name }),
            }) => assert_eq!(name.as_deref(), Some("DHS cloud")),
            other => panic!("expected presets save, got {other:?}"),
        }
    }

    #[test]
    fn test_export_output_flag() {
        let cli = Cli::parse_from(["gsa", "export", "-o", "out.csv", "--sort", "due"]);
        match cli.command {
            Some(Commands::Export { output, results }) => {
                assert_eq!(output, Some(PathBuf::from("out.csv")));
                assert_eq!(results.sort, Some(SortArg::Due));
            }
            other => panic!("expected export, got {other:?}"),
        }
    }

    #[test]
    fn test_theme_and_view_values() {
        let cli = Cli::parse_from(["gsa", "theme", "toggle"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Theme {
                mode: Some(ThemeArg::Toggle)
            })
        ));

        let cli = Cli::parse_from(["gsa", "view"]);
        assert!(matches!(cli.command, Some(Commands::View { mode: None })));
    }

    #[test]
    fn test_config_set() {
        let cli = Cli::parse_from(["gsa", "config", "set", "data.path", "/tmp/opps.json"]);
        match cli.command {
            Some(Commands::Config {
                command: Some(ConfigCommands::Set { key, value }),
            }) => {
                assert_eq!(key, "data.path");
                assert_eq!(value, "/tmp/opps.json");
            }
            other => panic!("expected config set, got {other:?}"),
        }
    }

    #[test]
    fn test_completions_shell() {
        let cli = Cli::parse_from(["gsa", "completions", "zsh"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Completions { shell: Shell::Zsh })
        ));
    }
}
