//! Typed option values and the resolved option record.

use std::collections::BTreeMap;
use std::fmt;

use tracing::Level;

use super::catalog::{OptionKind, OptionName};
use super::defaults::EXAMPLE_BUCKET;

/// Value of a single catalog option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// Value of a boolean option
    Bool(bool),
    /// Value of a string option
    Str(String),
}

impl OptionValue {
    /// Decodes environment text according to `kind`.
    ///
    /// Booleans are `true` only for the exact text `"true"`; strings are kept as-is.
    #[must_use]
    pub fn from_env_text(kind: OptionKind, text: &str) -> Self {
        match kind {
            OptionKind::Boolean => Self::Bool(text == "true"),
            OptionKind::String => Self::Str(text.to_string()),
        }
    }

    /// Returns the boolean, if this is a boolean value.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Str(_) => None,
        }
    }

    /// Returns the text, if this is a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Bool(_) => None,
            Self::Str(s) => Some(s),
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

/// Partial assignment of catalog options, keyed by option.
pub type OptionValues = BTreeMap<OptionName, OptionValue>;

/// Fully merged options for one parse of the command line.
///
/// Each parse produces a fresh record; records are never patched after
/// construction except for the mode switch applied by the parser itself.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)] // CLI flags are naturally boolean
pub struct ResolvedOptions {
    /// Template path (first positional argument)
    pub template: String,
    /// Stack name (second positional argument); selects deploy mode
    pub stackname: Option<String>,

    /// S3 bucket for packaged templates
    pub bucket: Option<String>,
    /// Shell config script
    pub config: Option<String>,
    /// Template linter command
    pub linter: Option<String>,
    /// Stack parameter overrides
    pub parameters: Option<String>,
    /// AWS credentials profile
    pub profile: Option<String>,
    /// AWS region
    pub region: Option<String>,
    /// Stack tags
    pub tags: Option<String>,

    /// Usage requested
    pub help: bool,
    /// Keep the temporary work directory
    pub keep: bool,
    /// Only log errors
    pub quiet: bool,
    /// Verbose logging
    pub verbose: bool,
    /// Version requested
    pub version: bool,

    /// Dry-run: render locally without deploying
    pub debug: bool,
    /// Run the template linter
    pub lint: bool,
    /// Validate the template with CloudFormation
    pub validate: bool,
    /// Package and upload nested templates
    pub package: bool,
    /// Bucket used for `aws cloudformation package`
    pub s3bucket: Option<String>,
}

impl ResolvedOptions {
    /// Builds a record for `template` with every option unset.
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            stackname: None,
            bucket: None,
            config: None,
            linter: None,
            parameters: None,
            profile: None,
            region: None,
            tags: None,
            help: false,
            keep: false,
            quiet: false,
            verbose: false,
            version: false,
            debug: false,
            lint: false,
            validate: false,
            package: false,
            s3bucket: None,
        }
    }

    /// Applies the mode implied by the positional arguments.
    ///
    /// Without a stack name the run is a dry run against a placeholder bucket;
    /// with one, every deployment stage is enabled.
    pub(crate) fn apply_mode(&mut self) {
        if self.stackname.is_some() {
            self.lint = true;
            self.validate = true;
            self.package = true;
            self.s3bucket.clone_from(&self.bucket);
        } else {
            self.debug = true;
            self.bucket = Some(EXAMPLE_BUCKET.to_string());
            self.s3bucket = Some(EXAMPLE_BUCKET.to_string());
        }
    }

    /// Value of a catalog option, if set.
    ///
    /// Boolean options are always set.
    #[must_use]
    pub fn get(&self, option: OptionName) -> Option<OptionValue> {
        let text = |v: &Option<String>| v.clone().map(OptionValue::Str);
        match option {
            OptionName::Bucket => text(&self.bucket),
            OptionName::Config => text(&self.config),
            OptionName::Linter => text(&self.linter),
            OptionName::Parameters => text(&self.parameters),
            OptionName::Profile => text(&self.profile),
            OptionName::Region => text(&self.region),
            OptionName::Tags => text(&self.tags),
            OptionName::Help => Some(OptionValue::Bool(self.help)),
            OptionName::Keep => Some(OptionValue::Bool(self.keep)),
            OptionName::Quiet => Some(OptionValue::Bool(self.quiet)),
            OptionName::Verbose => Some(OptionValue::Bool(self.verbose)),
            OptionName::Version => Some(OptionValue::Bool(self.version)),
        }
    }

    /// Projects the record onto the catalog options that are set.
    #[must_use]
    pub fn values(&self) -> OptionValues {
        OptionName::ALL
            .into_iter()
            .filter_map(|option| self.get(option).map(|value| (option, value)))
            .collect()
    }

    /// Log level implied by the verbosity flags and mode.
    #[must_use]
    pub const fn log_level(&self) -> Level {
        if self.verbose {
            Level::DEBUG
        } else if self.quiet {
            Level::ERROR
        } else if self.debug {
            Level::WARN
        } else {
            Level::INFO
        }
    }
}

impl fmt::Display for ResolvedOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let or_none = |v: &Option<String>| v.clone().unwrap_or_else(|| "none".to_string());

        write!(
            f,
            "Options {{ template: {}, stackname: {}, bucket: {}, config: {}, linter: {}, \
             parameters: {}, profile: {}, region: {}, tags: {}, keep: {}, quiet: {}, \
             verbose: {}, debug: {} }}",
            self.template,
            or_none(&self.stackname),
            or_none(&self.bucket),
            or_none(&self.config),
            or_none(&self.linter),
            or_none(&self.parameters),
            or_none(&self.profile),
            or_none(&self.region),
            or_none(&self.tags),
            self.keep,
            self.quiet,
            self.verbose,
            self.debug,
        )
    }
}
