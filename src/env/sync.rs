//! Projection of option values into the environment store.

use super::{EnvSnapshot, EnvStore};
use crate::config::defaults::{DEFAULT_REGION_VAR, REGION_VAR};
use crate::config::{Catalog, OptionValues};

/// Whether variables from the startup snapshot may be overwritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePolicy {
    /// Skip variables the invoking shell already defined
    Protect,
    /// Overwrite everything
    Clobber,
}

/// Writes option values into an [`EnvStore`] under a [`WritePolicy`].
#[derive(Debug, Clone, Copy)]
pub struct Synchronizer<'a> {
    catalog: &'a Catalog,
    snapshot: &'a EnvSnapshot,
}

impl<'a> Synchronizer<'a> {
    /// Creates a synchronizer guarding the variables in `snapshot`.
    #[must_use]
    pub const fn new(catalog: &'a Catalog, snapshot: &'a EnvSnapshot) -> Self {
        Self { catalog, snapshot }
    }

    /// Writes every value in `values` to its catalog variable, then
    /// normalizes the region pair.
    pub fn sync(&self, env: &mut EnvStore, values: &OptionValues, policy: WritePolicy) {
        for (&option, value) in values {
            let var = self.catalog.env_var_of(option);
            if policy == WritePolicy::Protect && self.snapshot.contains(var) {
                tracing::trace!("Keeping {var} from invoking shell");
                continue;
            }
            env.set(var, value.to_string());
        }
        normalize_region(env);
    }
}

/// Reconciles `AWS_REGION` with `AWS_DEFAULT_REGION`.
///
/// The default-region variable wins when both are set and differ; whichever
/// one is set fills in the other. Empty values count as unset.
pub fn normalize_region(env: &mut EnvStore) {
    let region = env.get(REGION_VAR).filter(|v| !v.is_empty()).map(str::to_string);
    let default = env
        .get(DEFAULT_REGION_VAR)
        .filter(|v| !v.is_empty())
        .map(str::to_string);

    match (region, default) {
        (Some(r), Some(d)) if r != d => env.set(REGION_VAR, d),
        (None, Some(d)) => env.set(REGION_VAR, d),
        (Some(r), None) => env.set(DEFAULT_REGION_VAR, r),
        _ => {}
    }
}
