//! Config command implementation.
//!
//! View and manage configuration settings.
//! Config file is located at ~/.config/gsa/config.toml.

use std::env;
use std::fs;
use std::path::PathBuf;

use directories::BaseDirs;
use serde::{Deserialize, Serialize};

use super::{CommandContext, CommandError, Result};

/// Current config file version. Increment when making breaking changes to schema.
const CONFIG_VERSION: u32 = 1;

/// Keys accepted by `config set`.
const VALID_KEYS: [&str; 7] = [
    "data.path",
    "share.base_url",
    "latency.apply_min_ms",
    "latency.apply_max_ms",
    "latency.assistant_min_ms",
    "latency.assistant_max_ms",
    "output.color",
];

/// Configuration file structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Config schema version for migrations.
    /// Defaults to current version when not present in file.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Dataset settings.
    #[serde(default)]
    pub data: DataConfig,

    /// Share link settings.
    #[serde(default)]
    pub share: ShareConfig,

    /// Simulated latency settings.
    #[serde(default)]
    pub latency: LatencyConfig,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Returns the current config version (used by serde default).
fn default_version() -> u32 {
    CONFIG_VERSION
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            data: DataConfig::default(),
            share: ShareConfig::default(),
            latency: LatencyConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Dataset configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path to the opportunity dataset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Share link configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ShareConfig {
    /// Base URL that shared query strings are appended to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Latency configuration, in milliseconds. Absent values mean no delay.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LatencyConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apply_min_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apply_max_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assistant_min_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assistant_max_ms: Option<u64>,
}

impl LatencyConfig {
    /// Delay bounds for applying filters.
    pub fn apply_bounds(&self) -> (u64, u64) {
        bounds(self.apply_min_ms, self.apply_max_ms)
    }

    /// Delay bounds for assistant replies.
    pub fn assistant_bounds(&self) -> (u64, u64) {
        bounds(self.assistant_min_ms, self.assistant_max_ms)
    }
}

/// A lone bound is used for both ends.
fn bounds(min: Option<u64>, max: Option<u64>) -> (u64, u64) {
    match (min, max) {
        (Some(min), Some(max)) => (min, max),
        (Some(v), None) | (None, Some(v)) => (v, v),
        (None, None) => (0, 0),
    }
}

/// Output configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Enable colors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,
}

/// Gets the config directory path.
/// Uses XDG-style paths: ~/.config/gsa/ on all platforms.
fn get_config_dir() -> Result<PathBuf> {
    if let Ok(path) = env::var("GSA_CONFIG") {
        let path = PathBuf::from(path);
        if let Some(parent) = path.parent() {
            return Ok(parent.to_path_buf());
        }
    }

    if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg_config).join("gsa"));
    }

    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".config").join("gsa"))
        .ok_or_else(|| CommandError::Config("Could not determine config directory".to_string()))
}

/// Gets the config file path.
pub fn get_config_path() -> Result<PathBuf> {
    if let Ok(path) = env::var("GSA_CONFIG") {
        return Ok(PathBuf::from(path));
    }

    let config_dir = get_config_dir()?;
    Ok(config_dir.join("config.toml"))
}

/// Loads the configuration from disk.
pub fn load_config() -> Result<Config> {
    let path = get_config_path()?;

    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path)
        .map_err(|e| CommandError::Config(format!("Failed to read config: {}", e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| CommandError::Config(format!("Failed to parse config: {}", e)))?;

    migrate_config(config)
}

/// Migrates config to current version if needed.
fn migrate_config(mut config: Config) -> Result<Config> {
    // Version 1 is the initial schema.
    config.version = CONFIG_VERSION;
    Ok(config)
}

/// Saves the configuration to disk.
fn save_config(config: &Config) -> Result<()> {
    let path = get_config_path()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| CommandError::Config(format!("Failed to create config directory: {}", e)))?;
    }

    let content = toml::to_string_pretty(config)
        .map_err(|e| CommandError::Config(format!("Failed to serialize config: {}", e)))?;

    fs::write(&path, content)
        .map_err(|e| CommandError::Config(format!("Failed to write config: {}", e)))?;

    Ok(())
}

/// Executes the config show command.
pub fn execute_show(ctx: &CommandContext) -> Result<()> {
    let config = load_config()?;
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
            "config": config,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        use owo_colors::OwoColorize;

        let header = "Configuration";
        if ctx.use_colors {
            println!("{}\n", header.green().bold());
        } else {
            println!("{}\n", header);
        }

        println!("File: {}", path.display());
        println!("Exists: {}", path.exists());

        if !path.exists() {
            println!("\n(No config file exists. Run 'gsa config set <key> <value>' to create one.)");
            return Ok(());
        }

        println!("\n[data]");
        if let Some(ref data_path) = config.data.path {
            println!("  path: {}", data_path.display());
        }

        println!("\n[share]");
        if let Some(ref base_url) = config.share.base_url {
            println!("  base_url: {}", base_url);
        }

        println!("\n[latency]");
        let latency = &config.latency;
        for (key, value) in [
            ("apply_min_ms", latency.apply_min_ms),
            ("apply_max_ms", latency.apply_max_ms),
            ("assistant_min_ms", latency.assistant_min_ms),
            ("assistant_max_ms", latency.assistant_max_ms),
        ] {
            if let Some(ms) = value {
                println!("  {}: {}", key, ms);
            }
        }

        println!("\n[output]");
        if let Some(color) = config.output.color {
            println!("  color: {}", color);
        }
    }

    Ok(())
}

/// Options for the config set command.
pub struct ConfigSetOptions {
    /// Configuration key.
    pub key: String,
    /// Configuration value.
    pub value: String,
}

/// Executes the config set command.
pub fn execute_set(ctx: &CommandContext, opts: &ConfigSetOptions) -> Result<()> {
    let mut config = load_config()?;
    let path = get_config_path()?;

    set_value(&mut config, &opts.key, &opts.value)?;
    save_config(&config)?;

    if ctx.json_output {
        let output = serde_json::json!({
            "status": "success",
            "key": opts.key,
            "value": opts.value,
            "path": path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        println!("Set {} = {}", opts.key, opts.value);
    }

    Ok(())
}

/// Applies one `section.field` assignment to `config`.
fn set_value(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let Some((section, field)) = key.split_once('.') else {
        return Err(unknown_key(key));
    };

    match (section, field) {
        ("data", "path") => config.data.path = Some(PathBuf::from(value)),
        ("share", "base_url") => {
            if !(value.starts_with("http://") || value.starts_with("https://")) {
                return Err(CommandError::Config(format!(
                    "Invalid base_url '{}'. Expected an http:// or https:// URL",
                    value
                )));
            }
            config.share.base_url = Some(value.to_string());
        }
        ("latency", "apply_min_ms") => config.latency.apply_min_ms = Some(parse_millis(value)?),
        ("latency", "apply_max_ms") => config.latency.apply_max_ms = Some(parse_millis(value)?),
        ("latency", "assistant_min_ms") => {
            config.latency.assistant_min_ms = Some(parse_millis(value)?)
        }
        ("latency", "assistant_max_ms") => {
            config.latency.assistant_max_ms = Some(parse_millis(value)?)
        }
        ("output", "color") => config.output.color = Some(parse_bool(value)?),
        _ => return Err(unknown_key(key)),
    }

    Ok(())
}

fn unknown_key(key: &str) -> CommandError {
    CommandError::Config(format!(
        "Unknown config key '{}'. Valid keys: {}",
        key,
        VALID_KEYS.join(", ")
    ))
}

/// Executes the config path command.
pub fn execute_path(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", path.display());
    }

    Ok(())
}

/// Parses a non-negative millisecond count.
fn parse_millis(s: &str) -> Result<u64> {
    s.trim().parse().map_err(|_| {
        CommandError::Config(format!(
            "Invalid duration '{}'. Use a whole number of milliseconds",
            s
        ))
    })
}

/// Parses a boolean value from string.
fn parse_bool(s: &str) -> Result<bool> {
    match s.to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(CommandError::Config(format!(
            "Invalid boolean value '{}'. Use true/false, yes/no, 1/0, or on/off",
            s
        ))),
    }
}
