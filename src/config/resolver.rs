//! Two-pass resolution of the tool's options.
//!
//! The first parse only sees the invoking shell's environment. When a config
//! script is in play, the tentative options are exported, the script is
//! sourced in a subshell, its variables are read back and exported, and the
//! command line is parsed again over the updated environment.

use std::path::PathBuf;

use super::catalog::Catalog;
use super::cli::{ExitRequest, ParseOutcome, env_defaults, parse};
use super::defaults::CONFIG_FILE_NAME;
use super::error::ConfigError;
use super::options::{OptionValues, ResolvedOptions};
use crate::env::{EnvSnapshot, EnvStore, Synchronizer, WritePolicy, normalize_region};
use crate::shell::{
    ConfigScriptRunner, ScriptOutput, ShellExecutor, TokenSource, UuidTokens, decode,
};

/// Progress of a resolution.
///
/// ```text
/// Init -> ParsedOnce -+-> Final                                   (no config script)
///                     +-> Synced -> Sourced -> Decoded -> SyncedAgain -> Final
/// ```
///
/// Either parse may instead end in `Exit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionState {
    /// Nothing parsed yet
    Init,
    /// First parse, over the startup environment
    ParsedOnce(Box<ResolvedOptions>),
    /// First-pass options exported (protected); config script located
    Synced {
        /// Config script to source
        config: PathBuf,
    },
    /// Config script sourced
    Sourced {
        /// Config script that was sourced
        config: PathBuf,
        /// Raw dump
        output: ScriptOutput,
    },
    /// Dump decoded
    Decoded(OptionValues),
    /// Decoded values exported (protected)
    SyncedAgain,
    /// Options to export and hand downstream
    Final(Box<ResolvedOptions>),
    /// Stop without resolving
    Exit(ExitRequest),
}

impl ResolutionState {
    /// Returns `true` for `Final` and `Exit`.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Final(_) | Self::Exit(_))
    }

    /// Options carried by this state, if any.
    #[must_use]
    pub fn options(&self) -> Option<&ResolvedOptions> {
        match self {
            Self::ParsedOnce(options) | Self::Final(options) => Some(options.as_ref()),
            _ => None,
        }
    }
}

/// Outcome of a completed resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Options resolved; `env` has every set option written to its variable.
    Resolved {
        /// Final options
        options: Box<ResolvedOptions>,
        /// Environment for child processes
        env: EnvStore,
    },
    /// Stop and print usage or version
    Exit(ExitRequest),
}

/// Drives the two-pass merge over one environment.
#[derive(Debug)]
pub struct Resolver<'a, E, T = UuidTokens> {
    catalog: &'a Catalog,
    argv: Vec<String>,
    env: EnvStore,
    snapshot: EnvSnapshot,
    work_dir: PathBuf,
    runner: ConfigScriptRunner<E, T>,
}

impl<'a, E: ShellExecutor> Resolver<'a, E> {
    /// Creates a resolver for `argv` (without the program name).
    ///
    /// The region pair is normalized and the snapshot of pre-existing
    /// catalog variables is taken here, before anything else writes to `env`.
    #[must_use]
    pub fn new(catalog: &'a Catalog, argv: Vec<String>, mut env: EnvStore, executor: E) -> Self {
        normalize_region(&mut env);
        let snapshot = EnvSnapshot::capture(catalog, &env);
        Self {
            catalog,
            argv,
            env,
            snapshot,
            work_dir: PathBuf::new(),
            runner: ConfigScriptRunner::new(executor),
        }
    }
}

impl<'a, E: ShellExecutor, T: TokenSource> Resolver<'a, E, T> {
    /// Replaces the correlation token source.
    #[must_use]
    pub fn with_tokens<U: TokenSource>(self, tokens: U) -> Resolver<'a, E, U> {
        Resolver {
            catalog: self.catalog,
            argv: self.argv,
            env: self.env,
            snapshot: self.snapshot,
            work_dir: self.work_dir,
            runner: self.runner.with_tokens(tokens),
        }
    }

    /// Resolves relative config paths, and looks for the default config
    /// script, in `dir` instead of the current directory.
    #[must_use]
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = dir.into();
        self
    }

    /// Variables the invoking shell had already defined.
    #[must_use]
    pub const fn snapshot(&self) -> &EnvSnapshot {
        &self.snapshot
    }

    /// Current environment.
    #[must_use]
    pub const fn env(&self) -> &EnvStore {
        &self.env
    }

    /// Performs one transition.
    ///
    /// Terminal states are returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the command line is invalid, an explicitly named
    /// config script is missing, or sourcing the config script fails.
    pub fn advance(&mut self, state: ResolutionState) -> Result<ResolutionState, ConfigError> {
        let next = match state {
            ResolutionState::Init => self.parse_pass(false)?,
            ResolutionState::SyncedAgain => self.parse_pass(true)?,
            ResolutionState::ParsedOnce(options) => match self.config_path(&options)? {
                None => ResolutionState::Final(options),
                Some(config) => {
                    self.sync(&options.values(), WritePolicy::Protect);
                    ResolutionState::Synced { config }
                }
            },
            ResolutionState::Synced { config } => {
                tracing::debug!("Using config file: {}", config.display());
                let output = self
                    .runner
                    .run(&config, &self.env)
                    .map_err(|e| ConfigError::config_script(&config, &e))?;
                ResolutionState::Sourced { config, output }
            }
            ResolutionState::Sourced { config, output } => {
                let values = decode(self.catalog, &output.stdout, &output.token);
                tracing::debug!("Config file {} set {} option(s)", config.display(), values.len());
                ResolutionState::Decoded(values)
            }
            ResolutionState::Decoded(values) => {
                self.sync(&values, WritePolicy::Protect);
                ResolutionState::SyncedAgain
            }
            terminal @ (ResolutionState::Final(_) | ResolutionState::Exit(_)) => terminal,
        };
        Ok(next)
    }

    /// Runs to completion.
    ///
    /// # Errors
    ///
    /// See [`Resolver::advance`].
    pub fn run(self) -> Result<Resolution, ConfigError> {
        self.run_with(|_| {})
    }

    /// Runs to completion, calling `on_parse` with the options of each parse.
    ///
    /// The final options are exported with [`WritePolicy::Clobber`] so child
    /// processes observe exactly the resolved configuration.
    ///
    /// # Errors
    ///
    /// See [`Resolver::advance`].
    pub fn run_with(
        mut self,
        mut on_parse: impl FnMut(&ResolvedOptions),
    ) -> Result<Resolution, ConfigError> {
        let mut state = ResolutionState::Init;
        loop {
            state = match state {
                ResolutionState::Final(options) => {
                    self.sync(&options.values(), WritePolicy::Clobber);
                    tracing::debug!("Configuration options: {options}");
                    return Ok(Resolution::Resolved {
                        options,
                        env: self.env,
                    });
                }
                ResolutionState::Exit(request) => return Ok(Resolution::Exit(request)),
                current => {
                    let parsing =
                        matches!(current, ResolutionState::Init | ResolutionState::SyncedAgain);
                    let next = self.advance(current)?;
                    if parsing {
                        if let Some(options) = next.options() {
                            on_parse(options);
                        }
                    }
                    next
                }
            };
        }
    }

    fn parse_pass(&self, second: bool) -> Result<ResolutionState, ConfigError> {
        let defaults = env_defaults(self.catalog, &self.env);
        Ok(match parse(&self.argv, &defaults)? {
            ParseOutcome::Exit(request) => ResolutionState::Exit(request),
            ParseOutcome::Options(options) if second => ResolutionState::Final(options),
            ParseOutcome::Options(options) => ResolutionState::ParsedOnce(options),
        })
    }

    fn sync(&mut self, values: &OptionValues, policy: WritePolicy) {
        Synchronizer::new(self.catalog, &self.snapshot).sync(&mut self.env, values, policy);
    }

    /// Explicit config path, else the default file if present.
    fn config_path(&self, options: &ResolvedOptions) -> Result<Option<PathBuf>, ConfigError> {
        if let Some(ref config) = options.config {
            let path = self.work_dir.join(config);
            if !path.is_file() {
                return Err(ConfigError::ConfigNotFound { path });
            }
            return Ok(Some(path));
        }

        let default = self.work_dir.join(CONFIG_FILE_NAME);
        Ok(default.is_file().then_some(default))
    }
}
