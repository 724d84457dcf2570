//! Option resolution for cfn-tool.
//!
//! This module provides:
//! - The option/environment-variable catalog ([`Catalog`], [`OptionName`])
//! - CLI argument parsing ([`Cli`], [`parse`])
//! - Typed option values ([`OptionValue`], [`ResolvedOptions`])
//! - The two-pass resolver ([`Resolver`], [`ResolutionState`])
//! - Default values and well-known names ([`defaults`])
//!
//! # Priority
//!
//! Option values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI flags**
//! 2. **Environment variables set before the tool started** - never overwritten
//!    by lower-priority sources
//! 3. **Variables set by the sourced config script** - `--config`,
//!    `CFN_TOOL_CONFIG`, or `.cfn-tool` in the working directory
//! 4. **Built-in defaults**
//!
//! # Boolean Flag Semantics
//!
//! Boolean flags (`--keep`, `--quiet`, `--verbose`, ...) enable, and their
//! `--no-` forms disable. A flag absent from the command line takes its value
//! from the environment, where only the exact text `true` counts as set.
//!
//! # Modes
//!
//! `cfn-tool <template>` is a dry run: the template is rendered locally and the
//! bucket is forced to a placeholder. `cfn-tool <template> <stack>` deploys and
//! enables linting, validation and packaging.

mod catalog;
mod cli;
pub mod defaults;
mod error;
mod options;
mod resolver;

#[cfg(test)]
mod resolver_tests;

pub use catalog::{Catalog, CatalogError, OptionKind, OptionName, STANDARD_BINDINGS};
pub use cli::{Cli, ExitRequest, ParseOutcome, env_defaults, parse};
pub use error::ConfigError;
pub use options::{OptionValue, OptionValues, ResolvedOptions};
pub use resolver::{Resolution, ResolutionState, Resolver};
