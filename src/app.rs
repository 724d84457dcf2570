//! Application startup and utilities.
//!
//! This module contains exit codes, tracing setup, and the usage and version
//! text that support the main entry point.

use cfn_tool::config::ExitRequest;
use tracing::Level;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt, reload};

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0), including usage and version output.
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Any failure (exit code 1).
    pub const FAILURE: ExitCode = ExitCode::FAILURE;
}

/// Handle for changing the log level after options are parsed.
pub struct LogLevel {
    handle: reload::Handle<EnvFilter, Registry>,
}

impl LogLevel {
    /// Switches the default log level. `RUST_LOG` directives still apply.
    pub fn set(&self, level: Level) {
        if let Err(e) = self.handle.reload(env_filter(level)) {
            eprintln!("Failed to change log level: {e}");
        }
    }
}

/// Sets up the tracing subscriber for logging, starting at INFO.
pub fn setup_tracing() -> LogLevel {
    let (filter, handle) = reload::Layer::new(env_filter(Level::INFO));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    LogLevel { handle }
}

fn env_filter(level: Level) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy()
}

/// Text printed for an early exit.
pub fn exit_message(request: ExitRequest) -> String {
    match request {
        ExitRequest::Help | ExitRequest::Usage => usage(),
        ExitRequest::Version => env!("CARGO_PKG_VERSION").to_string(),
    }
}

fn usage() -> String {
    format!(
        "Usage: cfn-tool [options] <template> [stackname]\n\
         \n\
         See the manpage:\n\
         * cmd: man cfn-tool\n\
         * url: http://htmlpreview.github.io/?https://github.com/daggerml/cfn-tool/blob/{}/man/cfn-tool.1.html",
        env!("CARGO_PKG_VERSION")
    )
}
