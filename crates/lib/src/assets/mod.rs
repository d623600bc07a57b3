//! Asset directory verification.
//!
//! Confirms the runtime asset directory the `sys` program depends on is
//! present and usable before anything runs against it. All checks are
//! read-only and fail on the first offending entry.

mod types;

pub use types::*;

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::config::AssetConfig;

/// Fail unless `path` exists and is a directory.
///
/// Symlinks are followed.
pub fn verify_directory_exists(path: &Path) -> Result<(), AssetError> {
  let metadata = fs::metadata(path).map_err(|source| match source.kind() {
    io::ErrorKind::NotFound => AssetError::NotFound {
      path: path.to_path_buf(),
    },
    _ => AssetError::Traversal {
      path: path.to_path_buf(),
      source,
    },
  })?;

  if !metadata.is_dir() {
    return Err(AssetError::NotADirectory {
      path: path.to_path_buf(),
    });
  }

  Ok(())
}

/// Count the non-directory entries directly inside `path`.
///
/// Subdirectories are not descended into and do not count. Fails with
/// [`AssetError::EmptyDirectory`] when the count is zero.
pub fn verify_contains_files(path: &Path) -> Result<usize, AssetError> {
  let traversal = |source: io::Error| AssetError::Traversal {
    path: path.to_path_buf(),
    source,
  };

  let entries = fs::read_dir(path).map_err(|source| match source.kind() {
    io::ErrorKind::NotFound => AssetError::NotFound {
      path: path.to_path_buf(),
    },
    _ => traversal(source),
  })?;

  let mut count = 0;
  for entry in entries {
    let entry = entry.map_err(traversal)?;
    let file_type = entry.file_type().map_err(traversal)?;
    if !file_type.is_dir() {
      count += 1;
    }
  }

  if count == 0 {
    return Err(AssetError::EmptyDirectory {
      path: path.to_path_buf(),
    });
  }

  debug!(path = %path.display(), count, "asset directory contains files");
  Ok(count)
}

/// Walk `path` recursively and read every regular file in full.
///
/// Symlinks are not followed and are not checked. Entries are visited in file
/// name order, and the walk aborts on the first file that cannot be read or is
/// empty.
pub fn verify_all_readable_and_non_empty(path: &Path) -> Result<AssetStats, AssetError> {
  let mut stats = AssetStats::default();

  for entry in WalkDir::new(path).sort_by_file_name() {
    let entry = entry.map_err(|err| AssetError::Traversal {
      path: err.path().unwrap_or(path).to_path_buf(),
      source: io::Error::from(err),
    })?;

    if !entry.file_type().is_file() {
      continue;
    }

    let len = read_asset(entry.path())?;
    if len == 0 {
      return Err(AssetError::EmptyFile {
        path: entry.path().to_path_buf(),
      });
    }

    stats.files_checked += 1;
    stats.total_bytes += len;
  }

  debug!(
    path = %path.display(),
    files = stats.files_checked,
    bytes = stats.total_bytes,
    "asset files readable and non-empty"
  );
  Ok(stats)
}

/// Open `file` and read it to the end, returning the number of bytes read.
fn read_asset(file: &Path) -> Result<u64, AssetError> {
  let handle = File::open(file).map_err(|source| AssetError::UnreadableFile {
    path: file.to_path_buf(),
    source,
  })?;
  drain(file, handle)
}

/// Read `reader` to exhaustion without buffering its contents.
fn drain(file: &Path, mut reader: impl Read) -> Result<u64, AssetError> {
  io::copy(&mut reader, &mut io::sink()).map_err(|source| AssetError::UnreadableFile {
    path: file.to_path_buf(),
    source,
  })
}

/// Confirm each name in `names` resolves to a regular file under `path`.
///
/// Names are checked in list order and the first failure is reported. With
/// no list the check is skipped rather than passed.
pub fn verify_expected_assets(path: &Path, names: Option<&[String]>) -> Result<ExpectedAssets, AssetError> {
  let Some(names) = names else {
    debug!("no expected assets configured, skipping");
    return Ok(ExpectedAssets::Skipped);
  };

  for name in names {
    let resolved = resolve_under(path, name);
    let missing = |reason| AssetError::MissingExpectedAsset {
      name: name.clone(),
      path: resolved.clone(),
      reason,
    };

    let metadata = fs::metadata(&resolved).map_err(|source| match source.kind() {
      io::ErrorKind::NotFound | io::ErrorKind::NotADirectory => missing(MissingReason::NotFound),
      _ => AssetError::Traversal {
        path: resolved.clone(),
        source,
      },
    })?;
    if !metadata.is_file() {
      return Err(missing(MissingReason::NotRegularFile));
    }
  }

  Ok(ExpectedAssets::Verified { count: names.len() })
}

/// Join `name` onto `base` so the result never leaves `base`.
///
/// Roots and drive prefixes are dropped, so `/logo.png` names `base/logo.png`.
/// `..` cannot climb above `base`.
fn resolve_under(base: &Path, name: &str) -> PathBuf {
  let mut relative = PathBuf::new();
  for component in Path::new(name).components() {
    match component {
      Component::Normal(part) => relative.push(part),
      Component::ParentDir => {
        relative.pop();
      }
      Component::Prefix(_) | Component::RootDir | Component::CurDir => {}
    }
  }
  base.join(relative)
}

/// Runs every asset check against one configured directory.
pub struct AssetVerifier {
  config: AssetConfig,
}

impl AssetVerifier {
  pub fn new(config: AssetConfig) -> Self {
    Self { config }
  }

  pub fn dir(&self) -> &Path {
    &self.config.dir
  }

  /// Run all checks in order, stopping at the first failure.
  pub fn verify(&self) -> Result<AssetReport, AssetError> {
    let dir: PathBuf = self.config.dir.clone();
    info!(dir = %dir.display(), "verifying assets");

    verify_directory_exists(&dir)?;
    let top_level_files = verify_contains_files(&dir)?;
    let stats = verify_all_readable_and_non_empty(&dir)?;
    let expected = verify_expected_assets(&dir, self.config.expected.as_deref())?;

    Ok(AssetReport {
      dir,
      top_level_files,
      stats,
      expected,
    })
  }
}
