use std::fmt;

/// Host operating systems the harness knows how to name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Os {
  Linux,
  MacOs,
  Windows,
  FreeBsd,
}

impl Os {
  /// Detect the current operating system at runtime
  pub fn current() -> Option<Self> {
    match std::env::consts::OS {
      "linux" => Some(Self::Linux),
      "macos" => Some(Self::MacOs),
      "windows" => Some(Self::Windows),
      "freebsd" => Some(Self::FreeBsd),
      _ => None,
    }
  }

  /// Returns the name Rust uses for this OS
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Linux => "linux",
      Self::MacOs => "macos",
      Self::Windows => "windows",
      Self::FreeBsd => "freebsd",
    }
  }

  /// Returns the name the toolchain expects in its target OS variable
  pub fn toolchain_name(&self) -> &'static str {
    match self {
      Self::MacOs => "darwin",
      other => other.as_str(),
    }
  }
}

impl fmt::Display for Os {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
