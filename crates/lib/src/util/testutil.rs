//! Test utilities for sys-harness-lib.
//!
//! Helpers for building asset trees and stand-in toolchains. Tests that spawn
//! processes or write executables run `#[serial]` so no concurrently forked
//! child holds a fake toolchain open for writing when it is executed.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// Exit code a fake toolchain uses to report success.
pub const FAKE_TOOLCHAIN_OK: i32 = 0;

/// Create a temp directory populated with `files` (relative path, contents).
pub fn asset_tree(files: &[(&str, &str)]) -> TempDir {
  let temp = TempDir::new().unwrap();
  for (relative, contents) in files {
    let path = temp.path().join(relative);
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
  }
  temp
}

/// Returns the shell command and args to execute a shell script.
#[cfg(unix)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("/bin/sh", vec!["-c".to_string(), script.to_string()])
}

/// Write an executable script that stands in for the toolchain.
///
/// It prints its arguments to stdout, the target variables, a line to stderr
/// when failing, and exits with `exit_code`.
#[cfg(unix)]
pub fn fake_toolchain(exit_code: i32) -> (TempDir, PathBuf) {
  use std::os::unix::fs::PermissionsExt;

  let temp = TempDir::new().unwrap();
  let path = temp.path().join("fake-go");
  let script = format!(
    r#"#!/bin/sh
echo "args: $*"
echo "target: ${{GOOS:-host}}/${{GOARCH:-host}}"
if [ {exit_code} -ne 0 ]; then
  echo "fake toolchain failed" >&2
fi
exit {exit_code}
"#
  );
  fs::write(&path, script).unwrap();
  fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
  (temp, path)
}
