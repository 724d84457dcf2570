//! Bidirectional option/environment-variable catalog.
//!
//! Every option the tool understands has exactly one environment variable
//! and every catalog variable names exactly one option. The table is checked
//! when the catalog is built; a broken table never reaches the parser.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::LazyLock;

use thiserror::Error;

/// Names of all options understood by the tool.
///
/// Ordering follows the long option names alphabetically, which is also the
/// order the catalog iterates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OptionName {
    /// S3 bucket for packaged templates (`--bucket`, `-b`)
    Bucket,
    /// Shell config script to source (`--config`, `-c`)
    Config,
    /// Show usage (`--help`, `-h`)
    Help,
    /// Keep the temporary work directory (`--keep`, `-k`)
    Keep,
    /// Template linter command (`--linter`, `-l`)
    Linter,
    /// Stack parameter overrides (`--parameters`, `-P`)
    Parameters,
    /// AWS credentials profile (`--profile`, `-p`)
    Profile,
    /// Only log errors (`--quiet`, `-q`)
    Quiet,
    /// AWS region (`--region`, `-r`)
    Region,
    /// Stack tags (`--tags`, `-t`)
    Tags,
    /// Verbose logging (`--verbose`, `-v`)
    Verbose,
    /// Print version (`--version`, `-V`)
    Version,
}

/// Value kind of an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// Flag; environment text decodes to `true` only for the literal `"true"`
    Boolean,
    /// Free-form text, taken as-is
    String,
}

impl OptionName {
    /// Every option, in catalog order.
    pub const ALL: [Self; 12] = [
        Self::Bucket,
        Self::Config,
        Self::Help,
        Self::Keep,
        Self::Linter,
        Self::Parameters,
        Self::Profile,
        Self::Quiet,
        Self::Region,
        Self::Tags,
        Self::Verbose,
        Self::Version,
    ];

    /// Long flag name, without dashes.
    #[must_use]
    pub const fn long(self) -> &'static str {
        match self {
            Self::Bucket => "bucket",
            Self::Config => "config",
            Self::Help => "help",
            Self::Keep => "keep",
            Self::Linter => "linter",
            Self::Parameters => "parameters",
            Self::Profile => "profile",
            Self::Quiet => "quiet",
            Self::Region => "region",
            Self::Tags => "tags",
            Self::Verbose => "verbose",
            Self::Version => "version",
        }
    }

    /// Single-character alias.
    #[must_use]
    pub const fn short(self) -> char {
        match self {
            Self::Bucket => 'b',
            Self::Config => 'c',
            Self::Help => 'h',
            Self::Keep => 'k',
            Self::Linter => 'l',
            Self::Parameters => 'P',
            Self::Profile => 'p',
            Self::Quiet => 'q',
            Self::Region => 'r',
            Self::Tags => 't',
            Self::Verbose => 'v',
            Self::Version => 'V',
        }
    }

    /// Value kind of this option.
    #[must_use]
    pub const fn kind(self) -> OptionKind {
        match self {
            Self::Help | Self::Keep | Self::Quiet | Self::Verbose | Self::Version => {
                OptionKind::Boolean
            }
            Self::Bucket
            | Self::Config
            | Self::Linter
            | Self::Parameters
            | Self::Profile
            | Self::Region
            | Self::Tags => OptionKind::String,
        }
    }
}

impl fmt::Display for OptionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.long())
    }
}

/// The option/variable bindings shipped with the tool.
pub const STANDARD_BINDINGS: &[(OptionName, &str)] = &[
    (OptionName::Bucket, "CFN_TOOL_BUCKET"),
    (OptionName::Config, "CFN_TOOL_CONFIG"),
    (OptionName::Help, "CFN_TOOL_HELP"),
    (OptionName::Keep, "CFN_TOOL_KEEP"),
    (OptionName::Linter, "CFN_TOOL_LINTER"),
    (OptionName::Parameters, "CFN_TOOL_PARAMETERS"),
    (OptionName::Profile, "AWS_PROFILE"),
    (OptionName::Quiet, "CFN_TOOL_QUIET"),
    (OptionName::Region, "AWS_REGION"),
    (OptionName::Tags, "CFN_TOOL_TAGS"),
    (OptionName::Verbose, "CFN_TOOL_VERBOSE"),
    (OptionName::Version, "CFN_TOOL_VERSION"),
];

/// A binding table that is not a bijection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// An option has no environment variable.
    #[error("option '{0}' has no environment variable")]
    Unmapped(OptionName),

    /// An option appears in more than one binding.
    #[error("option '{0}' is bound more than once")]
    DuplicateOption(OptionName),

    /// Two options share one environment variable.
    #[error("environment variable '{var}' is bound to both '{first}' and '{second}'")]
    DuplicateVar {
        /// The shared variable
        var: String,
        /// Option bound first
        first: OptionName,
        /// Option bound second
        second: OptionName,
    },
}

/// Validated option/environment-variable catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    vars: BTreeMap<OptionName, &'static str>,
    options: HashMap<&'static str, OptionName>,
}

static STANDARD: LazyLock<Catalog> = LazyLock::new(|| {
    Catalog::new(STANDARD_BINDINGS)
        .unwrap_or_else(|e| panic!("option catalog out of sync: {e}"))
});

impl Catalog {
    /// Builds a catalog from a binding table.
    ///
    /// # Errors
    ///
    /// Returns an error unless every [`OptionName`] is bound exactly once and
    /// no environment variable is bound twice.
    pub fn new(bindings: &[(OptionName, &'static str)]) -> Result<Self, CatalogError> {
        let mut vars = BTreeMap::new();
        let mut options = HashMap::new();

        for &(option, var) in bindings {
            if vars.insert(option, var).is_some() {
                return Err(CatalogError::DuplicateOption(option));
            }
            if let Some(first) = options.insert(var, option) {
                return Err(CatalogError::DuplicateVar {
                    var: var.to_string(),
                    first,
                    second: option,
                });
            }
        }

        if let Some(&missing) = OptionName::ALL.iter().find(|o| !vars.contains_key(o)) {
            return Err(CatalogError::Unmapped(missing));
        }

        Ok(Self { vars, options })
    }

    /// The catalog built from [`STANDARD_BINDINGS`].
    ///
    /// # Panics
    ///
    /// Panics on first use if [`STANDARD_BINDINGS`] is not a bijection.
    #[must_use]
    pub fn standard() -> &'static Self {
        &STANDARD
    }

    /// Environment variable bound to `option`.
    #[must_use]
    pub fn env_var_of(&self, option: OptionName) -> &'static str {
        // Construction guarantees every option is present.
        self.vars[&option]
    }

    /// Option bound to the environment variable `var`, if any.
    #[must_use]
    pub fn option_of(&self, var: &str) -> Option<OptionName> {
        self.options.get(var).copied()
    }

    /// Value kind of `option`.
    #[must_use]
    pub const fn kind_of(&self, option: OptionName) -> OptionKind {
        option.kind()
    }

    /// Iterates over `(option, variable)` pairs in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (OptionName, &'static str)> + '_ {
        self.vars.iter().map(|(&option, &var)| (option, var))
    }

    /// Iterates over the bound environment variable names.
    pub fn env_vars(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.vars.values().copied()
    }
}
