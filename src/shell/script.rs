//! Sourcing a config script and dumping the variables it leaves behind.

use std::path::{Path, PathBuf};

use super::{CorrelationToken, ShellError, ShellExecutor, TokenSource, UuidTokens};
use crate::config::defaults::DUMP_NAME_PATTERN;
use crate::env::EnvStore;

/// Raw result of one config script run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptOutput {
    /// Token separating script output from the dump
    pub token: CorrelationToken,
    /// Everything the shell wrote to stdout
    pub stdout: String,
}

/// Builds the snippet that sources `path` and dumps matching variables.
///
/// Values are base64 encoded so that newlines and `=` survive the trip.
/// A bare relative file name is prefixed with `./` because `.` searches
/// `PATH` for names without a slash.
#[must_use]
pub fn build_script(path: &Path, token: &CorrelationToken) -> String {
    format!(
        ". {path}\n\
         echo\n\
         echo {token}\n\
         for __cfn_tool_var in $(compgen -A variable | grep -E '{DUMP_NAME_PATTERN}'); do\n  \
         printf '%s=%s\\n' \"$__cfn_tool_var\" \"$(printf '%s' \"${{!__cfn_tool_var}}\" | base64 | tr -d '\\n')\"\n\
         done\n",
        path = single_quote(&sourceable(path).to_string_lossy()),
    )
}

fn sourceable(path: &Path) -> PathBuf {
    let bare = path
        .parent()
        .is_none_or(|parent| parent.as_os_str().is_empty());
    if path.is_relative() && bare {
        Path::new(".").join(path)
    } else {
        path.to_path_buf()
    }
}

/// Quotes `text` for a POSIX shell.
fn single_quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', r"'\''"))
}

/// Runs config scripts through a [`ShellExecutor`].
#[derive(Debug, Clone)]
pub struct ConfigScriptRunner<E, T = UuidTokens> {
    executor: E,
    tokens: T,
}

impl<E: ShellExecutor> ConfigScriptRunner<E> {
    /// Creates a runner using random UUID tokens.
    #[must_use]
    pub const fn new(executor: E) -> Self {
        Self {
            executor,
            tokens: UuidTokens,
        }
    }
}

impl<E: ShellExecutor, T: TokenSource> ConfigScriptRunner<E, T> {
    /// Replaces the token source.
    #[must_use]
    pub fn with_tokens<U: TokenSource>(self, tokens: U) -> ConfigScriptRunner<E, U> {
        ConfigScriptRunner {
            executor: self.executor,
            tokens,
        }
    }

    /// Sources `path` in a shell whose environment is `env` and returns the raw dump.
    ///
    /// # Errors
    ///
    /// Returns the executor's error if the shell cannot run or the script fails.
    pub fn run(&self, path: impl AsRef<Path>, env: &EnvStore) -> Result<ScriptOutput, ShellError> {
        let token = self.tokens.next_token();
        let script = build_script(path.as_ref(), &token);
        let stdout = self.executor.execute(&script, env)?;
        Ok(ScriptOutput { token, stdout })
    }
}
