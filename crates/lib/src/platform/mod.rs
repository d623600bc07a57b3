pub mod arch;
pub mod os;

use arch::Arch;
use os::Os;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::config::ConfigError;

/// Target platform for a cross-compile, in the toolchain's own naming
/// (e.g. `linux/amd64`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BuildTarget {
  pub os: String,
  pub arch: String,
}

impl BuildTarget {
  pub fn new(os: impl Into<String>, arch: impl Into<String>) -> Self {
    Self {
      os: os.into(),
      arch: arch.into(),
    }
  }

  /// The target matching the host this process runs on
  ///
  /// Returns `None` if the OS or architecture is not supported
  pub fn host() -> Option<Self> {
    let os = Os::current()?;
    let arch = Arch::current()?;
    Some(Self::new(os.toolchain_name(), arch.toolchain_name()))
  }
}

impl FromStr for BuildTarget {
  type Err = ConfigError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.split_once('/') {
      Some((os, arch)) if !os.is_empty() && !arch.is_empty() && !arch.contains('/') => Ok(Self::new(os, arch)),
      _ => Err(ConfigError::InvalidTarget(s.to_string())),
    }
  }
}

impl fmt::Display for BuildTarget {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/{}", self.os, self.arch)
  }
}

/// Returns the host platform as `arch-os` using Rust names (e.g. "x86_64-linux")
///
/// Returns `None` if the current platform is not supported
pub fn platform_triple() -> Option<String> {
  Some(format!("{}-{}", Arch::current()?, Os::current()?))
}
