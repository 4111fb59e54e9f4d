//! Configuration file loading with precedence handling.

use crate::format::DEFAULT_SEPARATOR;
use crate::state::controller::{PipelineConfig, DEFAULT_DEBOUNCE, DEFAULT_LATENCY};
use crate::state::DEFAULT_PAGE_SIZE;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "TABVIEW_CONFIG";
/// Environment variable overriding the page size.
pub const PAGE_SIZE_ENV: &str = "TABVIEW_PAGE_SIZE";
/// Environment variable overriding the debounce in milliseconds.
pub const DEBOUNCE_ENV: &str = "TABVIEW_DEBOUNCE_MS";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A value parsed but is out of range.
    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue {
        /// Config key.
        key: &'static str,
        /// Why it was rejected.
        reason: &'static str,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/tabview/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Initial rows per page.
    #[serde(default)]
    pub page_size: Option<usize>,

    /// Quiet period before recomputing, in milliseconds.
    #[serde(default)]
    pub debounce_ms: Option<u64>,

    /// Simulated latency before publishing, in milliseconds.
    #[serde(default)]
    pub latency_ms: Option<u64>,

    /// Digit group separator for area and population.
    #[serde(default)]
    pub thousands_separator: Option<String>,

    /// JSON dataset to load instead of the built-in one.
    #[serde(default)]
    pub data_file: Option<PathBuf>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Initial rows per page (≥ 1).
    pub page_size: usize,
    /// Quiet period before recomputing.
    pub debounce: Duration,
    /// Simulated latency before publishing.
    pub latency: Duration,
    /// Digit group separator.
    pub thousands_separator: String,
    /// Optional dataset file.
    pub data_file: Option<PathBuf>,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl ResolvedConfig {
    /// Pipeline settings for the controller.
    pub fn pipeline(&self) -> PipelineConfig {
        PipelineConfig {
            debounce: self.debounce,
            latency: self.latency,
            page_size: self.page_size,
        }
    }
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            debounce: DEFAULT_DEBOUNCE,
            latency: DEFAULT_LATENCY,
            thousands_separator: DEFAULT_SEPARATOR.to_string(),
            data_file: None,
            log_file_path: default_log_path(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/tabview/tabview.log` on Linux, or the platform
/// state directory elsewhere. Falls back to the current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("tabview").join("tabview.log")
    } else {
        PathBuf::from("tabview.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/tabview/config.toml` on Linux, the platform config
/// directory elsewhere, or `None` if it cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tabview").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `TABVIEW_CONFIG` environment variable
/// 3. Default path `~/.config/tabview/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` for a zero page size.
pub fn merge_config(config_file: Option<ConfigFile>) -> Result<ResolvedConfig, ConfigError> {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return Ok(defaults);
    };

    if config.page_size == Some(0) {
        return Err(ConfigError::InvalidValue {
            key: "page_size",
            reason: "must be at least 1",
        });
    }

    Ok(ResolvedConfig {
        page_size: config.page_size.unwrap_or(defaults.page_size),
        debounce: config
            .debounce_ms
            .map(Duration::from_millis)
            .unwrap_or(defaults.debounce),
        latency: config
            .latency_ms
            .map(Duration::from_millis)
            .unwrap_or(defaults.latency),
        thousands_separator: config
            .thousands_separator
            .unwrap_or(defaults.thousands_separator),
        data_file: config.data_file.or(defaults.data_file),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    })
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `TABVIEW_PAGE_SIZE`: Override page size (ignored unless a positive integer)
/// - `TABVIEW_DEBOUNCE_MS`: Override debounce (ignored unless an integer)
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(raw) = std::env::var(PAGE_SIZE_ENV) {
        match raw.parse::<usize>() {
            Ok(n) if n > 0 => config.page_size = n,
            _ => warn!(value = %raw, "Ignoring invalid {}", PAGE_SIZE_ENV),
        }
    }

    if let Ok(raw) = std::env::var(DEBOUNCE_ENV) {
        match raw.parse::<u64>() {
            Ok(ms) => config.debounce = Duration::from_millis(ms),
            Err(_) => warn!(value = %raw, "Ignoring invalid {}", DEBOUNCE_ENV),
        }
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI arguments have highest precedence. `None` leaves the value alone.
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    page_size_override: Option<usize>,
    data_file_override: Option<PathBuf>,
) -> ResolvedConfig {
    if let Some(page_size) = page_size_override {
        config.page_size = page_size.max(1);
    }

    if let Some(path) = data_file_override {
        config.data_file = Some(path);
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
