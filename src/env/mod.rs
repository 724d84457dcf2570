//! Environment state owned by the tool.
//!
//! This module provides:
//! - An injected key/value environment ([`EnvStore`])
//! - The record of variables the invoking shell already had ([`EnvSnapshot`])
//! - Projection of resolved options into the environment ([`Synchronizer`])
//!
//! The real process environment is read once, at startup, and never written.
//! Child processes receive the store explicitly (see [`EnvStore::command`]).

mod snapshot;
mod sync;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use snapshot::EnvSnapshot;
pub use sync::{Synchronizer, WritePolicy, normalize_region};

use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::process::Command;

/// Versioned environment map.
///
/// The version increases on every write that changes the map, which lets
/// callers and tests tell whether a step touched the environment at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvStore {
    vars: BTreeMap<String, String>,
    /// Inherited variables that are not valid Unicode; passed to children as is
    opaque: BTreeMap<OsString, OsString>,
    version: u64,
}

impl EnvStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies the current process environment.
    #[must_use]
    pub fn from_process() -> Self {
        Self::from_os_pairs(std::env::vars_os())
    }

    /// Builds a store from raw name/value pairs.
    ///
    /// Variables whose name or value is not valid Unicode cannot be read or
    /// written through the store, but child processes still receive them.
    pub fn from_os_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let mut store = Self::new();
        for (name, value) in pairs {
            match (name.into_string(), value.into_string()) {
                (Ok(name), Ok(value)) => {
                    store.vars.insert(name, value);
                }
                (name, value) => {
                    let name = name.map_or_else(|raw| raw, OsString::from);
                    let value = value.map_or_else(|raw| raw, OsString::from);
                    store.opaque.insert(name, value);
                }
            }
        }
        store
    }

    /// Builds a store from explicit name/value pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            vars,
            ..Self::default()
        }
    }

    /// Value of `name`, if defined.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Returns `true` if `name` is defined (possibly empty).
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Sets `name` to `value`.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        self.opaque.remove(OsStr::new(&name));
        let previous = self.vars.insert(name, value.clone());
        if previous.as_ref() != Some(&value) {
            self.version += 1;
        }
    }

    /// Number of writes that changed the map.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Number of defined variables, not counting ones that are not valid Unicode.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Returns `true` if no variable is defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Iterates over variables in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Builds a command whose environment is exactly this store.
    #[must_use]
    pub fn command(&self, program: impl AsRef<OsStr>) -> Command {
        let mut command = Command::new(program);
        command.env_clear().envs(&self.opaque).envs(&self.vars);
        command
    }
}
