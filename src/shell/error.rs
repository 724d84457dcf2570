//! Error types for shell execution.

use std::io;

use thiserror::Error;

/// Error type for shell execution.
///
/// Not retryable: every failure aborts resolution.
#[derive(Debug, Error)]
pub enum ShellError {
    /// The shell could not be started.
    #[error("Failed to start shell: {source}")]
    Spawn {
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The shell exited unsuccessfully.
    ///
    /// `output` holds stderr followed by stdout.
    #[error("Shell command failed ({}): {output}", status_label(.code))]
    Failed {
        /// Exit code, or `None` if terminated by a signal
        code: Option<i32>,
        /// Combined output of the command
        output: String,
    },
}

#[allow(clippy::ref_option)] // thiserror passes fields by reference
fn status_label(code: &Option<i32>) -> String {
    code.map_or_else(
        || "terminated by signal".to_string(),
        |c| format!("exit code {c}"),
    )
}
