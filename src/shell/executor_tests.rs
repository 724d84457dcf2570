//! Tests for the bash executor.
//!
//! These run a real `bash`; they return early when bash or the coreutils used
//! by the dump snippet are not installed.

use std::io::Write;
use std::path::PathBuf;

use super::{BashExecutor, ConfigScriptRunner, ShellError, ShellExecutor, decode};
use crate::config::{Catalog, OptionName, OptionValue};
use crate::env::EnvStore;

fn process_env() -> EnvStore {
    EnvStore::from_process()
}

fn bash_available() -> bool {
    BashExecutor::new()
        .execute("command -v base64 && command -v grep && command -v tr", &process_env())
        .is_ok()
}

fn config_file(body: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(body.as_bytes()).unwrap();
    file
}

/// Runs bash from a fixed working directory.
struct BashIn(PathBuf);

impl ShellExecutor for BashIn {
    fn execute(&self, command: &str, env: &EnvStore) -> Result<String, ShellError> {
        let output = env
            .command("bash")
            .current_dir(&self.0)
            .arg("-c")
            .arg(command)
            .output()
            .map_err(|source| ShellError::Spawn { source })?;
        assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[test]
fn returns_stdout() {
    if !bash_available() {
        return;
    }

    let output = BashExecutor::new().execute("echo hello", &process_env()).unwrap();

    assert_eq!(output, "hello\n");
}

#[test]
fn sees_only_the_given_environment() {
    if !bash_available() {
        return;
    }
    let mut env = process_env();
    env.set("CFN_TOOL_TAGS", "from-store");

    let output = BashExecutor::new()
        .execute("printf '%s' \"$CFN_TOOL_TAGS\"", &env)
        .unwrap();

    assert_eq!(output, "from-store");
}

#[test]
fn nonzero_exit_carries_combined_output() {
    if !bash_available() {
        return;
    }

    let err = BashExecutor::new()
        .execute("echo to-stderr >&2; echo to-stdout; exit 3", &process_env())
        .unwrap_err();

    match err {
        ShellError::Failed { code, output } => {
            assert_eq!(code, Some(3));
            assert_eq!(output, "to-stderr\nto-stdout\n");
        }
        ShellError::Spawn { .. } => panic!("Expected Failed"),
    }
}

#[test]
fn missing_program_is_spawn_error() {
    let err = BashExecutor::with_program("/nonexistent/bash")
        .execute("true", &process_env())
        .unwrap_err();

    assert!(matches!(err, ShellError::Spawn { .. }));
}

#[test]
fn sourced_script_round_trip() {
    if !bash_available() {
        return;
    }
    let file = config_file(
        "echo 'CFN_TOOL_BUCKET=ZmFrZQ=='\n\
         export CFN_TOOL_BUCKET=from-script\n\
         CFN_TOOL_KEEP=true\n\
         export CFN_TOOL_PARAMETERS='A=1 B=2'\n\
         export AWS_SECRET_ACCESS_KEY=hidden\n",
    );
    let runner = ConfigScriptRunner::new(BashExecutor::new());

    let output = runner.run(file.path(), &process_env()).unwrap();
    let values = decode(Catalog::standard(), &output.stdout, &output.token);

    assert_eq!(values[&OptionName::Bucket], OptionValue::Str("from-script".to_string()));
    assert_eq!(values[&OptionName::Keep], OptionValue::Bool(true));
    assert_eq!(
        values[&OptionName::Parameters],
        OptionValue::Str("A=1 B=2".to_string())
    );
}

#[test]
fn failing_script_is_reported() {
    if !bash_available() {
        return;
    }
    let file = config_file("echo 'bad config' >&2\nfalse\nexit 1\n");
    let runner = ConfigScriptRunner::new(BashExecutor::new());

    let err = runner.run(file.path(), &process_env()).unwrap_err();

    assert!(matches!(err, ShellError::Failed { code: Some(1), .. }));
}

#[test]
fn bare_config_name_is_not_looked_up_on_path() {
    if !bash_available() {
        return;
    }
    let work = tempfile::tempdir().unwrap();
    let bin = tempfile::tempdir().unwrap();
    std::fs::write(work.path().join("cfg.sh"), "export CFN_TOOL_LINTER=from-cwd\n").unwrap();
    std::fs::write(bin.path().join("cfg.sh"), "export CFN_TOOL_LINTER=from-path\n").unwrap();
    let mut env = process_env();
    let search = format!("{}:{}", bin.path().display(), env.get("PATH").unwrap_or_default());
    env.set("PATH", search);
    let runner = ConfigScriptRunner::new(BashIn(work.path().to_path_buf()));

    let output = runner.run("cfg.sh", &env).unwrap();
    let values = decode(Catalog::standard(), &output.stdout, &output.token);

    assert_eq!(values[&OptionName::Linter], OptionValue::Str("from-cwd".to_string()));
}
