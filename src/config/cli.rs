//! CLI argument parsing using clap, merged with environment-derived defaults.
//!
//! `--help` and `--version` are ordinary catalog options here rather than
//! clap's built-ins, so `CFN_TOOL_HELP=true` behaves exactly like `-h`.
//!
//! Every boolean flag has a hidden `--no-<flag>` twin; whichever comes last
//! on the command line wins. Repeating any option is allowed, the last
//! occurrence wins.

use clap::Parser;

use super::catalog::{Catalog, OptionName};
use super::error::ConfigError;
use super::options::{OptionValue, OptionValues, ResolvedOptions};
use crate::env::EnvStore;

/// cfn-tool: CloudFormation template preprocessor and deployer
#[derive(Debug, Parser)]
#[command(name = "cfn-tool")]
#[command(disable_help_flag = true, disable_version_flag = true)]
#[command(args_override_self = true)]
#[allow(clippy::struct_excessive_bools)] // CLI flags are naturally boolean
pub struct Cli {
    /// S3 bucket for packaged templates
    #[arg(long, short = 'b')]
    pub bucket: Option<String>,

    /// Shell script to source for configuration
    #[arg(long, short = 'c')]
    pub config: Option<String>,

    /// Show usage
    #[arg(long, short = 'h', overrides_with = "no_help")]
    pub help: bool,

    #[arg(long, hide = true, overrides_with = "help")]
    pub no_help: bool,

    /// Keep the temporary work directory
    #[arg(long, short = 'k', overrides_with = "no_keep")]
    pub keep: bool,

    #[arg(long, hide = true, overrides_with = "keep")]
    pub no_keep: bool,

    /// Template linter command
    #[arg(long, short = 'l')]
    pub linter: Option<String>,

    /// Stack parameter overrides ('Key=Value' pairs separated by spaces)
    #[arg(long, short = 'P')]
    pub parameters: Option<String>,

    /// AWS credentials profile
    #[arg(long, short = 'p')]
    pub profile: Option<String>,

    /// Only log errors
    #[arg(long, short = 'q', overrides_with = "no_quiet")]
    pub quiet: bool,

    #[arg(long, hide = true, overrides_with = "quiet")]
    pub no_quiet: bool,

    /// AWS region
    #[arg(long, short = 'r')]
    pub region: Option<String>,

    /// Stack tags ('Key=Value' pairs separated by spaces)
    #[arg(long, short = 't')]
    pub tags: Option<String>,

    /// Enable verbose logging
    #[arg(long, short = 'v', overrides_with = "no_verbose")]
    pub verbose: bool,

    #[arg(long, hide = true, overrides_with = "verbose")]
    pub no_verbose: bool,

    /// Print version
    #[arg(long, short = 'V', overrides_with = "no_version")]
    pub version: bool,

    #[arg(long, hide = true, overrides_with = "version")]
    pub no_version: bool,

    /// Template to process
    pub template: Option<String>,

    /// Stack to deploy; omit for a local dry run
    pub stackname: Option<String>,
}

/// Reasons to stop before resolving options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitRequest {
    /// Usage was requested explicitly, or no arguments were given
    Help,
    /// Version was requested
    Version,
    /// The required template argument is missing
    Usage,
}

/// Result of one parse of the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Stop and print usage or version
    Exit(ExitRequest),
    /// Merged options
    Options(Box<ResolvedOptions>),
}

impl Cli {
    /// Parses CLI arguments from an iterator that starts with the program name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidArguments`] for unknown flags and
    /// other syntax errors.
    pub fn try_parse_from_iter<I, T>(iter: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(iter).map_err(|e| ConfigError::invalid_arguments(&e))
    }

    /// Merges the parsed flags over `defaults`.
    ///
    /// Explicit flags always win, including `--no-<flag>`. An absent boolean
    /// flag falls back to its default and then to `false`.
    #[must_use]
    pub fn merge(self, defaults: &OptionValues) -> ParseOutcome {
        let flag = |on: bool, off: bool, option: OptionName| {
            explicit_bool(on, off).unwrap_or_else(|| {
                defaults
                    .get(&option)
                    .and_then(OptionValue::as_bool)
                    .unwrap_or(false)
            })
        };
        let text = |explicit: Option<String>, option: OptionName| {
            explicit.or_else(|| {
                defaults
                    .get(&option)
                    .and_then(OptionValue::as_str)
                    .map(str::to_string)
            })
        };

        let help = flag(self.help, self.no_help, OptionName::Help);
        let version = flag(self.version, self.no_version, OptionName::Version);
        if help {
            return ParseOutcome::Exit(ExitRequest::Help);
        }
        if version {
            return ParseOutcome::Exit(ExitRequest::Version);
        }
        let Some(template) = self.template else {
            return ParseOutcome::Exit(ExitRequest::Usage);
        };

        let mut options = ResolvedOptions::new(template);
        options.stackname = self.stackname;
        options.bucket = text(self.bucket, OptionName::Bucket);
        options.config = text(self.config, OptionName::Config);
        options.linter = text(self.linter, OptionName::Linter);
        options.parameters = text(self.parameters, OptionName::Parameters);
        options.profile = text(self.profile, OptionName::Profile);
        options.region = text(self.region, OptionName::Region);
        options.tags = text(self.tags, OptionName::Tags);
        options.keep = flag(self.keep, self.no_keep, OptionName::Keep);
        options.quiet = flag(self.quiet, self.no_quiet, OptionName::Quiet);
        options.verbose = flag(self.verbose, self.no_verbose, OptionName::Verbose);
        options.apply_mode();

        ParseOutcome::Options(Box::new(options))
    }
}

/// Value given on the command line, if either form of the flag was.
const fn explicit_bool(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}

/// Reads the current value of every catalog variable that is defined in `env`.
#[must_use]
pub fn env_defaults(catalog: &Catalog, env: &EnvStore) -> OptionValues {
    catalog
        .iter()
        .filter_map(|(option, var)| {
            env.get(var)
                .map(|text| (option, OptionValue::from_env_text(option.kind(), text)))
        })
        .collect()
}

/// Parses `argv` (without the program name) over `defaults`.
///
/// Help and version defaults are honored first; otherwise an empty argument
/// list asks for usage.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidArguments`] when clap rejects the arguments.
pub fn parse(argv: &[String], defaults: &OptionValues) -> Result<ParseOutcome, ConfigError> {
    let args = std::iter::once("cfn-tool").chain(argv.iter().map(String::as_str));
    let cli = Cli::try_parse_from_iter(args)?;
    Ok(match cli.merge(defaults) {
        ParseOutcome::Exit(ExitRequest::Usage) if argv.is_empty() => {
            ParseOutcome::Exit(ExitRequest::Help)
        }
        outcome => outcome,
    })
}
