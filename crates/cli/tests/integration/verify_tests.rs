use predicates::prelude::*;
use serial_test::serial;

use super::common::TestEnv;

#[test]
#[serial]
fn verify_default_dir_succeeds() {
  let env = TestEnv::empty();
  env.write_asset("logo.png", b"0123456789ab");
  std::fs::create_dir_all(env.assets_path().join("tmp")).unwrap();

  env
    .harness_cmd()
    .arg("verify")
    .assert()
    .success()
    .stdout(predicate::str::contains("Assets verified"))
    .stdout(predicate::str::contains("specific-file checks skipped"));
}

#[test]
#[serial]
fn verify_missing_dir_fails() {
  let env = TestEnv::empty();

  env
    .harness_cmd()
    .arg("verify")
    .assert()
    .failure()
    .stderr(predicate::str::contains("assets dir not found"));
}

#[test]
#[serial]
fn verify_empty_file_fails_with_path() {
  let env = TestEnv::empty();
  env.write_asset("logo.png", b"png");
  env.write_asset("fonts/blank.ttf", b"");

  env
    .harness_cmd()
    .arg("verify")
    .assert()
    .failure()
    .stderr(predicate::str::contains("blank.ttf"))
    .stderr(predicate::str::contains("is empty"));
}

#[test]
#[serial]
fn verify_only_subdirectories_fails() {
  let env = TestEnv::empty();
  env.write_asset("fonts/mono.ttf", b"font");

  env
    .harness_cmd()
    .arg("verify")
    .assert()
    .failure()
    .stderr(predicate::str::contains("no files found"));
}

#[test]
#[serial]
fn verify_reads_dir_from_env() {
  let env = TestEnv::empty();
  let custom = env.temp.path().join("custom");
  std::fs::create_dir_all(&custom).unwrap();
  std::fs::write(custom.join("sound.ogg"), b"ogg").unwrap();

  env
    .harness_cmd()
    .arg("verify")
    .env("SYS_ASSETS_DIR", &custom)
    .assert()
    .success();
}

#[test]
#[serial]
fn verify_expected_assets_from_env() {
  let env = TestEnv::empty();
  env.write_asset("logo.png", b"png");

  env
    .harness_cmd()
    .arg("verify")
    .env("SYS_EXPECTED_ASSETS", "logo.png,icon.svg")
    .assert()
    .failure()
    .stderr(predicate::str::contains("expected asset icon.svg missing"));
}

#[test]
#[serial]
fn verify_expect_flag_overrides_env() {
  let env = TestEnv::empty();
  env.write_asset("logo.png", b"png");

  env
    .harness_cmd()
    .arg("verify")
    .args(["--expect", "logo.png"])
    .env("SYS_EXPECTED_ASSETS", "icon.svg")
    .assert()
    .success()
    .stdout(predicate::str::contains("Expected assets"));
}

#[test]
#[serial]
fn verify_assets_dir_flag() {
  let env = TestEnv::empty();
  env.write_asset("logo.png", b"png");

  env
    .harness_cmd()
    .arg("verify")
    .arg("--assets-dir")
    .arg(env.assets_path())
    .current_dir(std::env::temp_dir())
    .assert()
    .success();
}

#[test]
#[serial]
fn verify_json_output() {
  let env = TestEnv::empty();
  env.write_asset("logo.png", b"png");

  env
    .harness_cmd()
    .arg("verify")
    .args(["-o", "json"])
    .assert()
    .success()
    .stdout(predicate::str::contains("\"top_level_files\": 1"))
    .stdout(predicate::str::contains("\"status\": \"skipped\""));
}

#[test]
#[serial]
fn verify_absolute_expect_is_resolved_inside_assets() {
  let env = TestEnv::empty();
  env.write_asset("logo.png", b"png");
  let outside = env.temp.path().join("secret.txt");
  std::fs::write(&outside, b"secret").unwrap();

  env
    .harness_cmd()
    .arg("verify")
    .arg("--expect")
    .arg(&outside)
    .assert()
    .failure()
    .stderr(predicate::str::contains("not found"));
}
