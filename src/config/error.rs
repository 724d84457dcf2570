//! Error types for option resolution.

use std::path::PathBuf;

use thiserror::Error;

use crate::shell::ShellError;

/// Error type for resolving the tool's options.
///
/// Every variant is fatal; the entry point logs it once and exits with status 1.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Command line could not be parsed (unknown flag, missing flag value, ...).
    #[error("{0}")]
    InvalidArguments(String),

    /// The config script named by `--config` or `CFN_TOOL_CONFIG` does not exist.
    #[error("Config file not found: '{}'", path.display())]
    ConfigNotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// Sourcing the config script failed.
    #[error("Failed to source config file '{}': {message}", path.display())]
    ConfigScript {
        /// Path of the config script
        path: PathBuf,
        /// First line of the underlying shell error
        message: String,
    },
}

impl ConfigError {
    /// Creates an `InvalidArguments` error from a clap error, keeping only its first line.
    #[must_use]
    pub fn invalid_arguments(err: &clap::Error) -> Self {
        Self::InvalidArguments(first_line(&err.to_string()))
    }

    /// Creates a `ConfigScript` error, truncating the shell error to its first line.
    ///
    /// Shell traces from a failing config script can be long and may echo
    /// secrets; only the first line is kept.
    #[must_use]
    pub fn config_script(path: impl Into<PathBuf>, err: &ShellError) -> Self {
        Self::ConfigScript {
            path: path.into(),
            message: first_line(&err.to_string()),
        }
    }
}

fn first_line(text: &str) -> String {
    text.lines().next().unwrap_or_default().trim_end().to_string()
}
