//! Catalog variables present before the tool writes anything.

use std::collections::BTreeSet;

use super::EnvStore;
use crate::config::Catalog;

/// Names of catalog variables the invoking shell had already defined.
///
/// Captured once, before the first write, and never changed afterward.
/// The synchronizer consults it to avoid clobbering the user's own values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    names: BTreeSet<String>,
}

impl EnvSnapshot {
    /// Records which of the catalog's variables are defined in `env`.
    #[must_use]
    pub fn capture(catalog: &Catalog, env: &EnvStore) -> Self {
        let names = catalog
            .env_vars()
            .filter(|var| env.contains(var))
            .map(str::to_string)
            .collect();
        Self { names }
    }

    /// Returns `true` if `name` was defined before the tool ran.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Number of recorded variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if no catalog variable was defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
