//! Harness configuration.
//!
//! Values are resolved once, up front, and handed to the verifier and the
//! orchestrator at construction. Nothing else in the crate reads the process
//! environment for configuration.

use std::env::{self, VarError};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

use crate::consts::{
  ASSETS_DIR_ENV, DEFAULT_ASSETS_DIR, DEFAULT_TOOLCHAIN_BIN, EXPECTED_ASSETS_ENV, TOOLCHAIN_BIN_ENV,
};

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("invalid build target {0:?}: expected OS/ARCH (e.g. linux/amd64)")]
  InvalidTarget(String),
}

/// Where the asset verifier looks and what it expects to find.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetConfig {
  pub dir: PathBuf,
  /// Relative names that must be regular files under `dir`. `None` skips the check.
  pub expected: Option<Vec<String>>,
}

impl AssetConfig {
  pub fn new(dir: impl AsRef<Path>) -> Self {
    Self {
      dir: dir.as_ref().to_path_buf(),
      expected: None,
    }
  }

  pub fn with_expected(mut self, names: Vec<String>) -> Self {
    self.expected = Some(names);
    self
  }
}

impl Default for AssetConfig {
  fn default() -> Self {
    Self::new(DEFAULT_ASSETS_DIR)
  }
}

/// Everything the harness needs from its environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
  pub assets: AssetConfig,
  pub toolchain_bin: String,
}

impl HarnessConfig {
  /// Resolve configuration through `lookup`, which returns the value of a
  /// variable or `None` when unset. Empty values count as unset.
  pub fn from_lookup<F>(lookup: F) -> Self
  where
    F: Fn(&str) -> Option<String>,
  {
    let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

    let dir = get(ASSETS_DIR_ENV).unwrap_or_else(|| DEFAULT_ASSETS_DIR.to_string());
    let expected = get(EXPECTED_ASSETS_ENV).and_then(|list| parse_asset_list(&list));

    Self {
      assets: AssetConfig {
        dir: PathBuf::from(dir),
        expected,
      },
      toolchain_bin: get(TOOLCHAIN_BIN_ENV).unwrap_or_else(|| DEFAULT_TOOLCHAIN_BIN.to_string()),
    }
  }

  /// Resolve configuration from the process environment.
  ///
  /// The asset directory is taken as raw OS text, so a non-UTF-8 path is kept
  /// rather than replaced by the default. Other non-UTF-8 values are ignored
  /// with a warning.
  pub fn from_env() -> Self {
    let mut config = Self::from_lookup(|key| match env::var(key) {
      Ok(value) => Some(value),
      Err(VarError::NotPresent) => None,
      Err(VarError::NotUnicode(raw)) => {
        if key != ASSETS_DIR_ENV {
          warn!(key, value = ?raw, "ignoring non-UTF-8 environment value");
        }
        None
      }
    });

    if let Some(dir) = env::var_os(ASSETS_DIR_ENV).filter(|dir| !dir.is_empty()) {
      config.assets.dir = PathBuf::from(dir);
    }
    config
  }
}

impl Default for HarnessConfig {
  fn default() -> Self {
    Self::from_lookup(|_| None)
  }
}

#[cfg(windows)]
const LIST_SEPARATOR: char = ';';

#[cfg(not(windows))]
const LIST_SEPARATOR: char = ':';

/// Split an expected-asset list on commas and the platform path-list separator.
///
/// Returns `None` when no names remain after trimming.
pub fn parse_asset_list(list: &str) -> Option<Vec<String>> {
  let names: Vec<String> = list
    .split([',', LIST_SEPARATOR])
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(str::to_string)
    .collect();

  if names.is_empty() { None } else { Some(names) }
}
