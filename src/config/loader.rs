//! Configuration file loading with precedence handling.

use crate::state::SelectionMode;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "ROVETREE_CONFIG";

/// Environment variable overriding the selection mode.
pub const SELECTION_MODE_ENV: &str = "ROVETREE_SELECTION_MODE";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML or unknown fields.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/rovetree/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// `"single"` or `"multi"`.
    #[serde(default)]
    pub selection_mode: Option<SelectionMode>,

    /// Whether parent items start expanded.
    #[serde(default)]
    pub expanded_by_default: Option<bool>,

    /// Whether a click toggles expansion as well as selection.
    #[serde(default)]
    pub click_toggles_expansion: Option<bool>,

    /// Emit recomputation measurements at debug level.
    #[serde(default)]
    pub debug_mode: Option<bool>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Action name to key specs, e.g. `focus_next = ["Down", "ctrl+n"]`.
    #[serde(default)]
    pub keybindings: Option<HashMap<String, Vec<String>>>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub selection_mode: SelectionMode,
    pub expanded_by_default: bool,
    pub click_toggles_expansion: bool,
    pub debug_mode: bool,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Key binding overrides, applied on top of the defaults.
    pub keybindings: HashMap<String, Vec<String>>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            selection_mode: SelectionMode::Single,
            expanded_by_default: true,
            click_toggles_expansion: true,
            debug_mode: false,
            log_file_path: default_log_path(),
            keybindings: HashMap::new(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/rovetree/rovetree.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    match dirs::state_dir() {
        Some(state_dir) => state_dir.join("rovetree").join("rovetree.log"),
        None => PathBuf::from("rovetree.log"),
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
/// Returns `~/.config/rovetree/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("rovetree").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `ROVETREE_CONFIG` environment variable
/// 3. Default path `~/.config/rovetree/config.toml`
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

    if let Ok(env_path) = std::env::var(CONFIG_PATH_ENV) {
        return load_config_file(PathBuf::from(env_path));
    }

    match default_config_path() {
        Some(default_path) => load_config_file(default_path),
        None => Ok(None),
    }
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        selection_mode: config.selection_mode.unwrap_or(defaults.selection_mode),
        expanded_by_default: config
            .expanded_by_default
            .unwrap_or(defaults.expanded_by_default),
        click_toggles_expansion: config
            .click_toggles_expansion
            .unwrap_or(defaults.click_toggles_expansion),
        debug_mode: config.debug_mode.unwrap_or(defaults.debug_mode),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        keybindings: config.keybindings.unwrap_or(defaults.keybindings),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `ROVETREE_SELECTION_MODE`: Override selection mode
///
/// Unparseable values are ignored; [`rejected_env_overrides`] reports them
/// once logging is up.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(Ok(mode)) = std::env::var(SELECTION_MODE_ENV).map(|raw| raw.parse::<SelectionMode>()) {
        config.selection_mode = mode;
    }

    config
}

/// Environment overrides that [`apply_env_overrides`] ignored, one message each.
///
/// Configuration is resolved before the log file is known, so the shell calls
/// this after `logging::init` and logs the result.
pub fn rejected_env_overrides() -> Vec<String> {
    let mut rejected = Vec::new();
    if let Ok(raw) = std::env::var(SELECTION_MODE_ENV) {
        if let Err(e) = raw.parse::<SelectionMode>() {
            rejected.push(format!("{SELECTION_MODE_ENV}: {e}"));
        }
    }
    rejected
}

/// Flags given on the command line. `None`/`false` leaves the config value alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub selection_mode: Option<SelectionMode>,
    pub collapsed: bool,
    pub debug: bool,
}

/// Apply CLI argument overrides to resolved config.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, overrides: CliOverrides) -> ResolvedConfig {
    if let Some(mode) = overrides.selection_mode {
        config.selection_mode = mode;
    }
    if overrides.collapsed {
        config.expanded_by_default = false;
    }
    if overrides.debug {
        config.debug_mode = true;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
