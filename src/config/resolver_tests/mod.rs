//! Tests for the two-pass resolver.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tempfile::TempDir;

use super::catalog::Catalog;
use super::cli::ExitRequest;
use super::defaults::{CONFIG_FILE_NAME, DUMP_NAME_PATTERN};
use super::error::ConfigError;
use super::options::ResolvedOptions;
use super::resolver::{Resolution, ResolutionState, Resolver};
use crate::env::EnvStore;
use crate::shell::{CorrelationToken, ShellError, ShellExecutor, TokenSource};

const TOKEN: &str = "6b0a3f0e-1d2c-4e5f-8a9b-0c1d2e3f4a5b";

/// Token source that always returns [`TOKEN`].
struct FixedToken;

impl TokenSource for FixedToken {
    fn next_token(&self) -> CorrelationToken {
        CorrelationToken::new(TOKEN)
    }
}

/// Fake shell that behaves like sourcing a script which sets `exports`.
///
/// The dump contains every prefixed variable of the incoming environment,
/// overlaid with `exports`, after some unrelated script chatter.
#[derive(Default)]
struct FakeShell {
    exports: BTreeMap<String, String>,
    failure: Option<String>,
    seen: RefCell<Vec<EnvStore>>,
}

impl FakeShell {
    fn exporting(pairs: &[(&str, &str)]) -> Self {
        Self {
            exports: pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
            ..Self::default()
        }
    }

    fn failing(output: &str) -> Self {
        Self {
            failure: Some(output.to_string()),
            ..Self::default()
        }
    }

    fn calls(&self) -> usize {
        self.seen.borrow().len()
    }

    fn env_seen(&self) -> EnvStore {
        self.seen.borrow()[0].clone()
    }
}

impl ShellExecutor for FakeShell {
    fn execute(&self, _command: &str, env: &EnvStore) -> Result<String, ShellError> {
        self.seen.borrow_mut().push(env.clone());
        if let Some(ref output) = self.failure {
            return Err(ShellError::Failed {
                code: Some(1),
                output: output.clone(),
            });
        }

        let pattern = regex::Regex::new(DUMP_NAME_PATTERN).unwrap();
        let mut vars: BTreeMap<String, String> = env
            .iter()
            .filter(|(k, _)| pattern.is_match(k))
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        vars.extend(self.exports.clone());

        let mut out = format!("loading config\nCFN_TOOL_BUCKET=bm9pc2U=\n\n{TOKEN}\n");
        for (k, v) in vars {
            out.push_str(&format!("{k}={}\n", STANDARD.encode(v)));
        }
        Ok(out)
    }
}

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

fn env(pairs: &[(&str, &str)]) -> EnvStore {
    EnvStore::from_pairs(pairs.iter().copied())
}

/// Working directory containing a default config file.
fn dir_with_config() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(CONFIG_FILE_NAME), "# sourced by fake shell\n").unwrap();
    dir
}

fn resolver<'a>(
    argv: &[&str],
    env: EnvStore,
    shell: &'a FakeShell,
    dir: &TempDir,
) -> Resolver<'static, &'a FakeShell, FixedToken> {
    Resolver::new(Catalog::standard(), args(argv), env, shell)
        .with_tokens(FixedToken)
        .in_dir(dir.path())
}

fn resolve(
    argv: &[&str],
    env: EnvStore,
    shell: &FakeShell,
    dir: &TempDir,
) -> (ResolvedOptions, EnvStore) {
    match resolver(argv, env, shell, dir).run().unwrap() {
        Resolution::Resolved { options, env } => (*options, env),
        Resolution::Exit(request) => panic!("Expected resolution, got {request:?}"),
    }
}
