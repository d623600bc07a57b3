//! Subprocess environment construction.
//!
//! A child's environment is built from an explicit base plus an override map
//! and handed over whole, so the result never depends on how the host
//! environment happens to be ordered.

use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::process::Command;

/// Base environment plus overrides for one toolchain invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandEnv {
  base: BTreeMap<OsString, OsString>,
  overrides: BTreeMap<OsString, OsString>,
}

impl CommandEnv {
  /// An environment with no variables at all.
  pub fn empty() -> Self {
    Self::default()
  }

  /// Snapshot the current process environment as the base.
  pub fn inherited() -> Self {
    Self::from_base(std::env::vars_os())
  }

  pub fn from_base<I, K, V>(vars: I) -> Self
  where
    I: IntoIterator<Item = (K, V)>,
    K: Into<OsString>,
    V: Into<OsString>,
  {
    Self {
      base: vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
      overrides: BTreeMap::new(),
    }
  }

  /// Set `key` for the child, replacing any base value of the same name.
  pub fn with_override(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
    self.overrides.insert(key.into(), value.into());
    self
  }

  pub fn overrides(&self) -> &BTreeMap<OsString, OsString> {
    &self.overrides
  }

  /// The environment the child will see.
  pub fn resolve(&self) -> BTreeMap<OsString, OsString> {
    let mut resolved = self.base.clone();
    resolved.extend(self.overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
    resolved
  }

  pub fn get(&self, key: impl AsRef<OsStr>) -> Option<&OsStr> {
    let key = key.as_ref();
    self
      .overrides
      .get(key)
      .or_else(|| self.base.get(key))
      .map(OsString::as_os_str)
  }

  /// Replace `command`'s environment with the resolved one.
  pub fn apply(&self, command: &mut Command) {
    command.env_clear().envs(self.resolve());
  }
}
