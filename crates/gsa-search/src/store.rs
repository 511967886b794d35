//! On-disk state with XDG path support.
//!
//! Each logical key is one JSON file in the state directory
//! (`~/.local/share/gsa` on Linux by default):
//!
//! | key | file |
//! |---|---|
//! | current filters | `gsa-search-filters.json` |
//! | presets | `gsa-search-presets.json` |
//! | view mode | `gsa-view-mode.json` |
//! | dark mode | `gsa-dark-mode.json` |
//! | status overrides | `gsa-status-overrides.json` |
//!
//! The store is a cache, never the source of truth for a session. The
//! `save_*` methods log and swallow failures, and the lenient `load_*`
//! methods fall back to defaults on missing or unreadable data. Only
//! [`StateStore::last_preset`] reports failures, so that "no presets" and
//! "presets unreadable" can be told apart.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use gsa_model::Status;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::codec;
use crate::filter::FilterSpec;
use crate::presets::{most_recent, Preset};

/// Application qualifier (for XDG paths).
const QUALIFIER: &str = "";

/// Application organization (for XDG paths).
const ORGANIZATION: &str = "";

/// Application name (for XDG paths).
const APPLICATION: &str = "gsa";

/// Logical keys of the state store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKey {
    /// The last applied filter spec.
    Filters,
    /// Saved presets, in insertion order.
    Presets,
    /// Card or table layout.
    ViewMode,
    /// The dark-mode flag.
    DarkMode,
    /// Status changes laid over the dataset.
    StatusOverrides,
}

impl StorageKey {
    /// File name backing this key.
    pub fn file_name(&self) -> &'static str {
        match self {
            StorageKey::Filters => "gsa-search-filters.json",
            StorageKey::Presets => "gsa-search-presets.json",
            StorageKey::ViewMode => "gsa-view-mode.json",
            StorageKey::DarkMode => "gsa-dark-mode.json",
            StorageKey::StatusOverrides => "gsa-status-overrides.json",
        }
    }
}

/// How results are laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// One card per opportunity.
    #[default]
    Card,
    /// One row per opportunity.
    Table,
}

impl ViewMode {
    /// Lowercase name, as stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Card => "card",
            ViewMode::Table => "table",
        }
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "card" | "cards" => Ok(ViewMode::Card),
            "table" => Ok(ViewMode::Table),
            other => Err(format!("unknown view mode '{other}' (expected card or table)")),
        }
    }
}

/// Errors that can occur during state storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to determine the XDG data directory.
    #[error("failed to determine state directory: no valid home directory found")]
    NoDataDir,

    /// I/O error during file read.
    #[error("failed to read state file '{path}': {source}")]
    ReadError {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// I/O error during file write.
    #[error("failed to write state file '{path}': {source}")]
    WriteError {
        /// The path that failed to write.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// I/O error during directory creation.
    #[error("failed to create state directory '{path}': {source}")]
    CreateDirError {
        /// The directory path that failed to create.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for state store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Persistent per-user state.
///
/// # Example
///
/// ```no_run
/// use gsa_search::{StateStore, ViewMode};
///
/// let store = StateStore::new()?;
/// store.save_view_mode(ViewMode::Table);
/// assert_eq!(store.load_view_mode(), ViewMode::Table);
/// # Ok::<(), gsa_search::StoreError>(())
/// ```
#[derive(Debug, Clone)]
pub struct StateStore {
    dir: PathBuf,
}

impl StateStore {
    /// Creates a store in the default XDG data directory.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NoDataDir` if the home directory cannot be determined.
    pub fn new() -> Result<Self> {
        Ok(Self {
            dir: Self::default_dir()?,
        })
    }

    /// Creates a store in a custom directory.
    ///
    /// This is primarily useful for testing.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the default XDG data directory.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NoDataDir` if the home directory cannot be determined.
    pub fn default_dir() -> Result<PathBuf> {
        let project_dirs =
            ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION).ok_or(StoreError::NoDataDir)?;
        Ok(project_dirs.data_dir().to_path_buf())
    }

    /// Returns the state directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the file path for a key.
    pub fn path(&self, key: StorageKey) -> PathBuf {
        self.dir.join(key.file_name())
    }

    // =========================================================================
    // Raw access
    // =========================================================================

    /// Reads and parses a key.
    ///
    /// Returns `Ok(None)` if the key has never been written.
    ///
    /// # Errors
    ///
    /// - Returns `StoreError::ReadError` if the file exists but cannot be read.
    /// - Returns `StoreError::Json` if the file does not hold a `T`.
    pub fn read_json<T: DeserializeOwned>(&self, key: StorageKey) -> Result<Option<T>> {
        let path = self.path(key);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::ReadError { path, source: e }),
        };
        Ok(Some(serde_json::from_str(&contents)?))
    }

    /// Writes a key atomically.
    ///
    /// Creates the state directory if needed, writes to a temporary file and
    /// renames it into place.
    ///
    /// # Errors
    ///
    /// - Returns `StoreError::CreateDirError` if the directory cannot be created.
    /// - Returns `StoreError::WriteError` if the file cannot be written.
    /// - Returns `StoreError::Json` if serialization fails.
    pub fn write_json<T: Serialize + ?Sized>(&self, key: StorageKey, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        self.write_raw(key, &json)
    }

    fn write_raw(&self, key: StorageKey, contents: &str) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| StoreError::CreateDirError {
            path: self.dir.clone(),
            source: e,
        })?;

        let path = self.path(key);
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, contents).map_err(|e| StoreError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;
        fs::rename(&temp_path, &path).map_err(|e| StoreError::WriteError {
            path: path.clone(),
            source: e,
        })?;

        debug!(path = %path.display(), "wrote state");
        Ok(())
    }

    /// Logs and drops a failed best-effort write.
    fn best_effort(key: StorageKey, result: Result<()>) {
        if let Err(e) = result {
            warn!(key = key.file_name(), error = %e, "failed to persist state");
        }
    }

    /// Reads a key, treating every failure as "nothing stored".
    fn read_lenient<T: DeserializeOwned>(&self, key: StorageKey) -> Option<T> {
        match self.read_json(key) {
            Ok(value) => value,
            Err(e) => {
                debug!(key = key.file_name(), error = %e, "ignoring unreadable state");
                None
            }
        }
    }

    // =========================================================================
    // Filters
    // =========================================================================

    /// Stores the current filter spec. Failures are logged, not returned.
    pub fn save_filters(&self, spec: &FilterSpec) {
        let result = codec::to_blob(spec)
            .map_err(StoreError::from)
            .and_then(|blob| self.write_raw(StorageKey::Filters, &blob));
        Self::best_effort(StorageKey::Filters, result);
    }

    /// Loads the stored filter spec, or `None` if absent or unparseable.
    pub fn load_filters(&self) -> Option<FilterSpec> {
        let path = self.path(StorageKey::Filters);
        match fs::read_to_string(&path) {
            Ok(blob) => codec::from_blob(&blob),
            Err(e) => {
                if e.kind() != io::ErrorKind::NotFound {
                    debug!(path = %path.display(), error = %e, "ignoring unreadable filters");
                }
                None
            }
        }
    }

    // =========================================================================
    // Presets
    // =========================================================================

    /// Appends a preset. Failures are logged, not returned.
    ///
    /// An unreadable preset list is replaced rather than appended to.
    pub fn save_preset(&self, preset: Preset) {
        let mut presets = self.load_presets();
        presets.push(preset);
        Self::best_effort(
            StorageKey::Presets,
            self.write_json(StorageKey::Presets, &presets),
        );
    }

    /// Loads all presets in insertion order; empty if absent or unreadable.
    pub fn load_presets(&self) -> Vec<Preset> {
        self.read_lenient(StorageKey::Presets).unwrap_or_default()
    }

    /// Returns the most recently created preset.
    ///
    /// # Errors
    ///
    /// Unlike the other loaders this reports unreadable data, so callers can
    /// tell `Ok(None)` (nothing saved yet) from a failed load.
    pub fn last_preset(&self) -> Result<Option<Preset>> {
        let presets: Vec<Preset> = self.read_json(StorageKey::Presets)?.unwrap_or_default();
        Ok(most_recent(&presets).cloned())
    }

    // =========================================================================
    // Display preferences
    // =========================================================================

    /// Stores the view mode. Failures are logged, not returned.
    pub fn save_view_mode(&self, mode: ViewMode) {
        Self::best_effort(
            StorageKey::ViewMode,
            self.write_json(StorageKey::ViewMode, &mode),
        );
    }

    /// Loads the view mode, defaulting to [`ViewMode::Card`].
    pub fn load_view_mode(&self) -> ViewMode {
        self.read_lenient(StorageKey::ViewMode).unwrap_or_default()
    }

    /// Stores the dark-mode flag. Failures are logged, not returned.
    pub fn save_dark_mode(&self, enabled: bool) {
        Self::best_effort(
            StorageKey::DarkMode,
            self.write_json(StorageKey::DarkMode, &enabled),
        );
    }

    /// Loads the dark-mode flag.
    ///
    /// Falls back to `system_prefers_dark` when nothing was ever stored, and
    /// to `false` when the stored value is unreadable.
    pub fn load_dark_mode(&self, system_prefers_dark: bool) -> bool {
        match self.read_json::<bool>(StorageKey::DarkMode) {
            Ok(Some(enabled)) => enabled,
            Ok(None) => system_prefers_dark,
            Err(e) => {
                debug!(error = %e, "ignoring unreadable dark mode flag");
                false
            }
        }
    }

    // =========================================================================
    // Status overrides
    // =========================================================================

    /// Records a status change for an opportunity. Failures are logged, not returned.
    pub fn save_status_override(&self, id: &str, status: Status) {
        let mut overrides = self.load_status_overrides();
        overrides.insert(id.to_string(), status);
        Self::best_effort(
            StorageKey::StatusOverrides,
            self.write_json(StorageKey::StatusOverrides, &overrides),
        );
    }

    /// Loads recorded status changes keyed by opportunity id.
    pub fn load_status_overrides(&self) -> BTreeMap<String, Status> {
        self.read_lenient(StorageKey::StatusOverrides)
            .unwrap_or_default()
    }
}
