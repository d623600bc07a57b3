//! Shared test helpers for CLI integration tests.

use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Isolated test environment.
///
/// Each test gets its own temporary directory holding an asset tree and,
/// when needed, a stand-in toolchain.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  pub fn empty() -> Self {
    Self {
      temp: TempDir::new().unwrap(),
    }
  }

  /// Asset directory (not created until a file is written into it).
  pub fn assets_path(&self) -> PathBuf {
    self.temp.path().join("assets")
  }

  /// Write a file relative to the asset directory.
  pub fn write_asset(&self, relative_path: &str, content: &[u8]) {
    let path = self.assets_path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  /// Write an executable script that stands in for the toolchain.
  ///
  /// It echoes its arguments and target variables, then exits with `exit_code`.
  #[cfg(unix)]
  pub fn fake_toolchain(&self, exit_code: i32) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = self.temp.path().join("fake-go");
    let script = format!(
      "#!/bin/sh\necho \"args: $*\"\necho \"target: ${{GOOS:-host}}/${{GOARCH:-host}}\"\necho \"stderr line\" >&2\nexit {exit_code}\n"
    );
    std::fs::write(&path, script).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
  }

  /// Get a Command for the sys-harness binary with harness variables cleared.
  pub fn harness_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("sys-harness");
    cmd.env_remove("SYS_ASSETS_DIR");
    cmd.env_remove("SYS_EXPECTED_ASSETS");
    cmd.env_remove("SYS_TOOLCHAIN_BIN");
    cmd.current_dir(self.temp.path());
    cmd
  }
}
