//! Command implementations for the gsa CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod ask;
pub mod completions;
pub mod config;
pub mod export;
pub mod facets;
pub mod list;
pub mod presets;
pub mod share;
pub mod show;
pub mod stats;
pub mod submit;
pub mod theme;
pub mod view;

use std::path::PathBuf;

use gsa_model::{Dataset, DatasetError};
use gsa_search::{
    ExportError, FixedLatency, JitterLatency, SearchSession, SessionError, StateStore, StoreError,
};
use tracing::debug;

use crate::cli::Cli;
use config::{load_config, Config};

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Dataset loading error.
    #[error("dataset error: {0}")]
    Dataset(#[from] DatasetError),

    /// Search session error (filter validation, lookup, status change).
    #[error("{0}")]
    Session(#[from] SessionError),

    /// Saved state error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// CSV export error.
    #[error("export error: {0}")]
    Export(#[from] ExportError),

    /// Something the user asked for does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Context for command execution, containing common dependencies.
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
    /// Whether to be verbose.
    pub verbose: bool,
}

impl CommandContext {
    /// Creates a new command context from CLI arguments.
    ///
    /// Colors are off with `--no-color` or when `NO_COLOR` is set.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            json_output: cli.json,
            use_colors: !cli.no_color && std::env::var_os("NO_COLOR").is_none(),
            quiet: cli.quiet,
            verbose: cli.verbose,
        }
    }
}

/// Where a command finds its dataset, saved state and starting query.
#[derive(Debug, Clone, Default)]
pub struct SessionEnv {
    /// Dataset path from `--data` / `GSA_DATA`.
    pub data: Option<PathBuf>,
    /// State directory from `--state-dir` / `GSA_STATE_DIR`.
    pub state_dir: Option<PathBuf>,
    /// Shared query from `--query`.
    pub query: Option<String>,
}

impl SessionEnv {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            data: cli.data.clone(),
            state_dir: cli.state_dir.clone(),
            query: cli.query.clone(),
        }
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Opens the state store.
    pub fn store(&self) -> Result<StateStore> {
        match &self.state_dir {
            Some(dir) => Ok(StateStore::with_dir(dir.clone())),
            None => Ok(StateStore::new()?),
        }
    }

    /// Resolves the dataset path: flag or env first, then `[data] path`.
    pub fn dataset_path(&self, config: &Config) -> Result<PathBuf> {
        self.data
            .clone()
            .or_else(|| config.data.path.clone())
            .ok_or_else(|| {
                CommandError::Config(
                    "No dataset configured. Pass --data, set GSA_DATA, or run 'gsa config set data.path <PATH>'"
                        .to_string(),
                )
            })
    }

    /// Builds a session over the dataset with the store and apply latency
    /// attached. Nothing is restored yet.
    pub fn open_session(&self, config: &Config) -> Result<SearchSession> {
        let path = self.dataset_path(config)?;
        let dataset = Dataset::load(&path)?;
        debug!(path = %path.display(), records = dataset.len(), "loaded dataset");

        let session = SearchSession::new(dataset).with_store(self.store()?);
        let session = match config.latency.apply_bounds() {
            (0, 0) => session.with_latency(FixedLatency::NONE),
            (min, max) => session.with_latency(JitterLatency::from_millis(min, max)),
        };
        Ok(session)
    }

    /// Loads config, opens a session and restores saved state.
    pub fn restore_session(&self) -> Result<(Config, SearchSession)> {
        let config = load_config()?;
        let session = self.open_session(&config)?;
        let source = session.restore(self.query());
        debug!(source = ?source, "restored filters");
        Ok((config, session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_path_prefers_flag() {
        let env = SessionEnv {
            data: Some(PathBuf::from("flag.json")),
            ..Default::default()
        };
        let mut config = Config::default();
        config.data.path = Some(PathBuf::from("config.json"));
        assert_eq!(env.dataset_path(&config).unwrap(), PathBuf::from("flag.json"));
    }

    #[test]
    fn test_dataset_path_falls_back_to_config() {
        let env = SessionEnv::default();
        let mut config = Config::default();
        config.data.path = Some(PathBuf::from("config.json"));
        assert_eq!(env.dataset_path(&config).unwrap(), PathBuf::from("config.json"));
    }

    #[test]
    fn test_dataset_path_missing_is_config_error() {
        let env = SessionEnv::default();
        let err = env.dataset_path(&Config::default()).unwrap_err();
        assert!(matches!(err, CommandError::Config(_)));
    }

    #[test]
    fn test_store_uses_state_dir() {
        let env = SessionEnv {
            state_dir: Some(PathBuf::from("/tmp/gsa-state")),
            ..Default::default()
        };
        assert_eq!(env.store().unwrap().dir(), std::path::Path::new("/tmp/gsa-state"));
    }

    #[test]
    fn test_missing_dataset_file_is_dataset_error() {
        let dir = tempfile::tempdir().unwrap();
        let env = SessionEnv {
            data: Some(dir.path().join("missing.json")),
            state_dir: Some(dir.path().to_path_buf()),
            query: None,
        };
        let err = env.open_session(&Config::default()).unwrap_err();
        assert!(matches!(err, CommandError::Dataset(DatasetError::Read { .. })));
    }
}
