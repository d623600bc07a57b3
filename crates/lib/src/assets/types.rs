//! Types for asset verification.
//!
//! This module defines the error taxonomy and the reports produced when
//! checking a runtime asset directory.

use std::fmt;
use std::io;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Why an expected asset failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingReason {
  /// Nothing exists at the resolved path.
  NotFound,
  /// Something exists, but it is not a regular file.
  NotRegularFile,
}

impl fmt::Display for MissingReason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      MissingReason::NotFound => write!(f, "not found"),
      MissingReason::NotRegularFile => write!(f, "not a regular file"),
    }
  }
}

/// Errors that can occur while verifying an asset directory.
///
/// Every check fails fast: the first offending entry aborts the check.
#[derive(Debug, Error)]
pub enum AssetError {
  /// The asset directory does not exist.
  #[error("assets dir not found: {path}")]
  NotFound { path: PathBuf },

  /// The asset path exists but is not a directory.
  #[error("{path} is not a directory")]
  NotADirectory { path: PathBuf },

  /// The asset directory has no non-directory entries.
  #[error("no files found in assets dir {path}")]
  EmptyDirectory { path: PathBuf },

  /// A regular file could not be read in full.
  #[error("could not read asset {path}: {source}")]
  UnreadableFile {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  /// A regular file has zero length.
  #[error("asset {path} is empty")]
  EmptyFile { path: PathBuf },

  /// The filesystem could not be listed or walked.
  #[error("failed to traverse {path}: {source}")]
  Traversal {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  /// An explicitly expected asset does not resolve to a regular file.
  #[error("expected asset {name} missing at {path}: {reason}")]
  MissingExpectedAsset {
    name: String,
    path: PathBuf,
    reason: MissingReason,
  },
}

/// Totals gathered while walking the asset tree.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct AssetStats {
  pub files_checked: usize,
  pub total_bytes: u64,
}

/// Outcome of the expected-assets check.
///
/// `Skipped` is deliberately distinct from `Verified`: no list was supplied,
/// so nothing specific was confirmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExpectedAssets {
  Skipped,
  Verified { count: usize },
}

impl ExpectedAssets {
  pub fn is_skipped(&self) -> bool {
    matches!(self, ExpectedAssets::Skipped)
  }
}

/// Result of a full verification run.
#[derive(Debug, Clone, Serialize)]
pub struct AssetReport {
  pub dir: PathBuf,
  /// Non-directory entries directly inside `dir`.
  pub top_level_files: usize,
  pub stats: AssetStats,
  pub expected: ExpectedAssets,
}
