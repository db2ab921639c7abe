//! Configuration for disposables and containers.
//!
//! Options can be built in code, loaded from the environment, or (with the
//! `config` feature) deserialized from JSON.

use std::env;
use std::str::FromStr;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use crate::{DisposeError, DisposeResult};

/// Environment variable controlling [`DisposeOptions::finalize_on_drop`].
pub const ENV_FINALIZE_ON_DROP: &str = "FERROUS_DISPOSE_FINALIZE_ON_DROP";
/// Environment variable controlling [`DisposeOptions::warn_on_leak`].
pub const ENV_WARN_ON_LEAK: &str = "FERROUS_DISPOSE_WARN_ON_LEAK";
/// Environment variable controlling [`DisposeOptions::sync_release_policy`].
pub const ENV_SYNC_POLICY: &str = "FERROUS_DISPOSE_SYNC_POLICY";

/// What a container does with async-only members when released synchronously.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "snake_case"))]
pub enum SyncReleasePolicy {
    /// Leave async-only members untouched.
    #[default]
    Skip,
    /// Release the sync-capable members, then fail with
    /// [`DisposeError::AsyncOnlyMembers`].
    Reject,
}

impl FromStr for SyncReleasePolicy {
    type Err = DisposeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" => Ok(SyncReleasePolicy::Skip),
            "reject" => Ok(SyncReleasePolicy::Reject),
            _ => Err(DisposeError::InvalidArgument(ENV_SYNC_POLICY)),
        }
    }
}

/// Behavior switches shared by every disposable type.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct DisposeOptions {
    /// Run the unmanaged hook when an unreleased disposable is dropped.
    pub finalize_on_drop: bool,
    /// Print a warning to stderr when an unreleased disposable is dropped.
    pub warn_on_leak: bool,
    /// Handling of async-only members on the synchronous container path.
    pub sync_release_policy: SyncReleasePolicy,
}

impl Default for DisposeOptions {
    fn default() -> Self {
        Self {
            finalize_on_drop: true,
            warn_on_leak: cfg!(debug_assertions),
            sync_release_policy: SyncReleasePolicy::Skip,
        }
    }
}

impl DisposeOptions {
    /// Loads options from `FERROUS_DISPOSE_*` environment variables.
    ///
    /// Unset variables keep their default. Booleans accept
    /// `true/false/1/0/yes/no/on/off`; the policy accepts `skip` or `reject`.
    ///
    /// # Errors
    ///
    /// Returns [`DisposeError::InvalidArgument`] naming the variable whose
    /// value could not be parsed.
    pub fn from_env() -> DisposeResult<Self> {
        let mut options = Self::default();

        if let Some(value) = read_bool(ENV_FINALIZE_ON_DROP)? {
            options.finalize_on_drop = value;
        }
        if let Some(value) = read_bool(ENV_WARN_ON_LEAK)? {
            options.warn_on_leak = value;
        }
        if let Ok(value) = env::var(ENV_SYNC_POLICY) {
            options.sync_release_policy = value.parse()?;
        }

        Ok(options)
    }

    /// Parses options from a JSON document. Missing fields keep their default.
    #[cfg(feature = "config")]
    pub fn from_json(json: &str) -> DisposeResult<Self> {
        serde_json::from_str(json).map_err(|_| DisposeError::InvalidArgument("json"))
    }

    /// Sets [`finalize_on_drop`](Self::finalize_on_drop).
    pub fn finalize_on_drop(mut self, enabled: bool) -> Self {
        self.finalize_on_drop = enabled;
        self
    }

    /// Sets [`warn_on_leak`](Self::warn_on_leak).
    pub fn warn_on_leak(mut self, enabled: bool) -> Self {
        self.warn_on_leak = enabled;
        self
    }

    /// Sets [`sync_release_policy`](Self::sync_release_policy).
    pub fn sync_release_policy(mut self, policy: SyncReleasePolicy) -> Self {
        self.sync_release_policy = policy;
        self
    }
}

fn read_bool(key: &'static str) -> DisposeResult<Option<bool>> {
    match env::var(key) {
        Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Some(true)),
            "false" | "0" | "no" | "off" => Ok(Some(false)),
            _ => Err(DisposeError::InvalidArgument(key)),
        },
        Err(_) => Ok(None),
    }
}
