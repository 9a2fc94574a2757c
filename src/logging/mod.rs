//! Tracing subscriber initialization.
//!
//! The tree owns the terminal, so logs go to a file instead of stderr.
//! Users can monitor logs via `tail -f` in a separate terminal.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for logging initialization failures.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Failed to create log directory
    #[error("Failed to create log directory at {path:?}: {source}")]
    DirectoryCreation {
        /// The directory path that failed to be created
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Invalid log file path (no filename component)
    #[error("Invalid log file path: {0:?}")]
    InvalidPath(PathBuf),

    /// Log path has no parent directory
    #[error("Log path has no parent directory: {0:?}")]
    NoParentDirectory(PathBuf),

    /// Tracing subscriber already initialized
    #[error("Tracing subscriber already initialized")]
    SubscriberAlreadySet,
}

/// Filter directive used when `RUST_LOG` is unset.
pub fn default_directive(debug: bool) -> &'static str {
    if debug {
        "rovetree=debug,info"
    } else {
        "info"
    }
}

/// Initialize the tracing subscriber with file-based logging.
///
/// Respects `RUST_LOG`; otherwise logs at `info`, or at `debug` for this
/// crate when `debug` is set so recomputation measurements are recorded.
///
/// Creates the log directory if it doesn't exist.
///
/// # Returns
/// * `Ok(())` if initialization succeeded
/// * `Err(LoggingError)` if the subscriber was already initialized or directory creation failed
pub fn init(log_path: &Path, debug: bool) -> Result<(), LoggingError> {
    use tracing_subscriber::EnvFilter;

    let directory = log_path
        .parent()
        .ok_or_else(|| LoggingError::NoParentDirectory(log_path.to_path_buf()))?;

    let file_name = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| LoggingError::InvalidPath(log_path.to_path_buf()))?;

    // A bare file name has an empty parent; log next to the working directory.
    if !directory.as_os_str().is_empty() {
        std::fs::create_dir_all(directory).map_err(|source| LoggingError::DirectoryCreation {
            path: directory.to_path_buf(),
            source,
        })?;
    }

    let file_appender = tracing_appender::rolling::never(directory, file_name);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(debug)));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(file_appender)
        .with_ansi(false) // No ANSI colors in log files
        .try_init()
        .map_err(|_| LoggingError::SubscriberAlreadySet)
}
