#![cfg(unix)]

use predicates::prelude::*;
use serial_test::serial;

use super::common::TestEnv;

#[test]
#[serial]
fn build_all_succeeds() {
  let env = TestEnv::empty();
  let toolchain = env.fake_toolchain(0);

  env
    .harness_cmd()
    .arg("build")
    .arg("--toolchain")
    .arg(&toolchain)
    .assert()
    .success()
    .stdout(predicate::str::contains("Compiled ./..."));
}

#[test]
#[serial]
fn build_failure_shows_captured_output() {
  let env = TestEnv::empty();
  let toolchain = env.fake_toolchain(2);

  env
    .harness_cmd()
    .args(["build", "./cmd/sys"])
    .arg("--toolchain")
    .arg(&toolchain)
    .assert()
    .failure()
    .stderr(predicate::str::contains("caused by: compile failed for ./cmd/sys"))
    .stderr(predicate::str::contains("│ args: build ./cmd/sys"))
    .stderr(predicate::str::contains("│ stderr line"));
}

#[test]
#[serial]
fn toolchain_from_env() {
  let env = TestEnv::empty();
  let toolchain = env.fake_toolchain(0);

  env
    .harness_cmd()
    .arg("clean")
    .env("SYS_TOOLCHAIN_BIN", &toolchain)
    .assert()
    .success()
    .stdout(predicate::str::contains("Build cache cleaned"));
}

#[test]
#[serial]
fn cross_failure_names_target() {
  let env = TestEnv::empty();
  let toolchain = env.fake_toolchain(1);

  env
    .harness_cmd()
    .args(["cross", "windows", "arm64"])
    .arg("--toolchain")
    .arg(&toolchain)
    .env("GOOS", "plan9")
    .assert()
    .failure()
    .stderr(predicate::str::contains("cross-compile failed (windows/arm64)"))
    .stderr(predicate::str::contains("target: windows/arm64"));
}

#[test]
#[serial]
fn cross_accepts_target_flag() {
  let env = TestEnv::empty();
  let toolchain = env.fake_toolchain(0);

  env
    .harness_cmd()
    .args(["cross", "--target", "linux/amd64", "-o", "json"])
    .arg("--toolchain")
    .arg(&toolchain)
    .assert()
    .success()
    .stdout(predicate::str::contains("\"step\": \"cross\""))
    .stdout(predicate::str::contains("\"arch\": \"amd64\""));
}

#[test]
#[serial]
fn cross_rejects_malformed_target() {
  let env = TestEnv::empty();

  env
    .harness_cmd()
    .args(["cross", "--target", "linux"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("OS/ARCH"));
}

#[test]
#[serial]
fn clean_failure_is_reported() {
  let env = TestEnv::empty();
  let toolchain = env.fake_toolchain(3);

  env
    .harness_cmd()
    .arg("clean")
    .arg("--toolchain")
    .arg(&toolchain)
    .assert()
    .failure()
    .stderr(predicate::str::contains("failed to clean build cache"));
}

#[test]
#[serial]
fn build_runs_in_dir() {
  let env = TestEnv::empty();
  let toolchain = env.fake_toolchain(0);
  let module = env.temp.path().join("module");
  std::fs::create_dir_all(&module).unwrap();

  env
    .harness_cmd()
    .arg("build")
    .arg("--toolchain")
    .arg(&toolchain)
    .arg("--dir")
    .arg(&module)
    .assert()
    .success();
}

#[test]
#[serial]
fn missing_toolchain_fails() {
  let env = TestEnv::empty();

  env
    .harness_cmd()
    .args(["build", "--toolchain", "/nonexistent/go"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("failed to run toolchain /nonexistent/go"));
}
