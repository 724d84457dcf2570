//! Shell layer for sourcing external config scripts.
//!
//! This module provides types and traits for:
//! - Abstracting shell execution ([`ShellExecutor`])
//! - Production bash executor ([`BashExecutor`])
//! - One-time output delimiters ([`CorrelationToken`], [`TokenSource`])
//! - Sourcing a config script and dumping its variables ([`ConfigScriptRunner`])
//! - Reading the dump back into option values ([`decode`])
//!
//! # Wire format
//!
//! After the sourced script finishes, the snippet prints a blank line, the
//! correlation token on its own line, then one `NAME=<base64 value>` line per
//! variable whose name matches [`DUMP_NAME_PATTERN`](crate::config::defaults::DUMP_NAME_PATTERN).
//! Anything the script itself printed precedes the token and is ignored.

mod decode;
mod error;
mod executor;
mod script;
mod token;

#[cfg(test)]
mod executor_tests;

pub use decode::decode;
pub use error::ShellError;
pub use executor::{BashExecutor, ShellExecutor};
pub use script::{ConfigScriptRunner, ScriptOutput, build_script};
pub use token::{CorrelationToken, TokenSource, UuidTokens};
