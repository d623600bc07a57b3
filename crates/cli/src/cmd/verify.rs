//! Implementation of the `sys-harness verify` command.

use std::time::Instant;

use anyhow::{Context, Result};

use sys_harness_lib::assets::{AssetVerifier, ExpectedAssets};
use sys_harness_lib::config::AssetConfig;

use crate::output::{OutputFormat, format_bytes, format_duration, print_info, print_json, print_stat, print_success};

/// Run every asset check against `config.dir`, stopping at the first failure.
pub fn cmd_verify(config: AssetConfig, output: OutputFormat) -> Result<()> {
  let start = Instant::now();
  let verifier = AssetVerifier::new(config);

  let mut report = verifier
    .verify()
    .with_context(|| format!("Asset verification failed for {}", verifier.dir().display()))?;

  report.dir = dunce::canonicalize(&report.dir).unwrap_or(report.dir);

  if output.is_json() {
    return print_json(&report);
  }

  print_success(&format!("Assets verified in {}", report.dir.display()));
  print_stat("Top-level files", &report.top_level_files.to_string());
  print_stat("Files checked", &report.stats.files_checked.to_string());
  print_stat("Total size", &format_bytes(report.stats.total_bytes));
  match report.expected {
    ExpectedAssets::Skipped => print_info("No expected assets configured; specific-file checks skipped"),
    ExpectedAssets::Verified { count } => print_stat("Expected assets", &count.to_string()),
  }
  print_stat("Duration", &format_duration(start.elapsed()));

  Ok(())
}
