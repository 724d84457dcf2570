//! Shell executor trait and the bash implementation.

use std::path::PathBuf;
use std::process::Stdio;

use super::ShellError;
use crate::env::EnvStore;

/// Trait for running shell commands.
///
/// # Design
///
/// The environment is an explicit argument: the child process sees exactly
/// `env` and nothing inherited from the calling process. This lets tests
/// substitute a fake shell and keeps the real process environment untouched.
pub trait ShellExecutor {
    /// Runs `command` and returns its standard output.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::Spawn`] if the shell cannot be started and
    /// [`ShellError::Failed`] if it exits unsuccessfully.
    fn execute(&self, command: &str, env: &EnvStore) -> Result<String, ShellError>;
}

impl<T: ShellExecutor + ?Sized> ShellExecutor for &T {
    fn execute(&self, command: &str, env: &EnvStore) -> Result<String, ShellError> {
        (**self).execute(command, env)
    }
}

/// Production executor running commands with `bash -c`.
///
/// Bash is required rather than `sh`: the dump snippet relies on `compgen`
/// and indirect expansion.
#[derive(Debug, Clone)]
pub struct BashExecutor {
    program: PathBuf,
}

impl BashExecutor {
    /// Creates an executor using `bash` from the store's `PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            program: PathBuf::from("bash"),
        }
    }

    /// Creates an executor using a specific bash binary.
    #[must_use]
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for BashExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellExecutor for BashExecutor {
    fn execute(&self, command: &str, env: &EnvStore) -> Result<String, ShellError> {
        tracing::trace!("Running shell command:\n{command}");

        let output = env
            .command(&self.program)
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ShellError::Spawn { source })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if output.status.success() {
            return Ok(stdout);
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(ShellError::Failed {
            code: output.status.code(),
            output: format!("{stderr}{stdout}"),
        })
    }
}
