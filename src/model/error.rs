//! Error types for the rovetree binary.
//!
//! The engine itself never fails: boundaries and stale identifiers are no-ops,
//! and malformed item metadata is a diagnostic. Everything here belongs to the
//! shell around it: reading input, loading configuration, and the terminal.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level application error
//!   - [`InputError`] - Tree document reading failures (file not found, IO, JSON)
//!   - [`ConfigError`] - Config file read/parse failures
//!   - [`KeyBindingError`] - Invalid `[keybindings]` entries
//!   - [`LoggingError`] - Tracing subscriber setup failures
//!   - `std::io::Error` - Terminal failures

use crate::config::{ConfigError, KeyBindingError};
use crate::logging::LoggingError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all failure modes.
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to read or decode the tree document. Fatal.
    #[error("Failed to read input: {0}")]
    InputRead(#[from] InputError),

    /// Config file exists but cannot be used. Fatal; missing files are not errors.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// `[keybindings]` names an unknown action or key.
    #[error("Key binding error: {0}")]
    KeyBindings(#[from] KeyBindingError),

    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// Terminal or rendering failure. Fatal.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors encountered when reading the tree document from a file or stdin.
#[derive(Debug, Error)]
pub enum InputError {
    /// The specified file does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use rovetree::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.json")
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.json"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// No file argument and stdin is a terminal.
    #[error("No input source: provide a file path or pipe data to stdin")]
    NoInput,

    /// The document is not a JSON array of nodes.
    #[error("Invalid tree document from {source_name}: {reason}")]
    Json {
        /// File path or `<stdin>`.
        source_name: String,
        reason: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
