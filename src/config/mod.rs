//! Configuration module.
//!
//! Precedence (lowest to highest): defaults, config file, environment, CLI.

pub mod keybindings;
pub mod loader;

pub use keybindings::{parse_key, KeyBindingError, KeyBindings};
pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, default_log_path,
    load_config_file, load_config_with_precedence, merge_config, rejected_env_overrides, CliOverrides, ConfigError,
    ConfigFile, ResolvedConfig,
};

use crate::flatten::FlattenOptions;
use crate::state::TreeOptions;

impl ResolvedConfig {
    /// Engine options for this configuration.
    pub fn tree_options(&self) -> TreeOptions {
        TreeOptions {
            selection_mode: self.selection_mode,
            click_toggles_expansion: self.click_toggles_expansion,
            debug_mode: self.debug_mode,
        }
    }

    /// Flatten options for this configuration.
    pub fn flatten_options(&self) -> FlattenOptions {
        FlattenOptions {
            expanded: self.expanded_by_default,
        }
    }

    /// Default key bindings with the configured overrides applied.
    pub fn key_bindings(&self) -> Result<KeyBindings, KeyBindingError> {
        let mut bindings = KeyBindings::default();
        bindings.apply_overrides(&self.keybindings)?;
        Ok(bindings)
    }
}
