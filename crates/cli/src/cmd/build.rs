//! Toolchain commands: `build`, `cross` and `clean`.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;

use sys_harness_lib::platform::BuildTarget;
use sys_harness_lib::toolchain::{BuildOrchestrator, Toolchain};

use crate::output::{OutputFormat, format_duration, print_json, print_stat, print_success};

/// Resolved toolchain settings for one command.
pub struct ToolchainOptions {
  pub program: String,
  pub dir: Option<PathBuf>,
}

impl ToolchainOptions {
  fn orchestrator(self) -> BuildOrchestrator {
    let orchestrator = BuildOrchestrator::new(Toolchain::go().with_program(self.program));
    match self.dir {
      Some(dir) => orchestrator.with_workdir(dir),
      None => orchestrator,
    }
  }
}

#[derive(Serialize)]
struct StepResult<'a> {
  step: &'a str,
  #[serde(skip_serializing_if = "Option::is_none")]
  scope: Option<&'a str>,
  #[serde(skip_serializing_if = "Option::is_none")]
  target: Option<&'a BuildTarget>,
  duration_ms: u128,
}

fn report(result: &StepResult<'_>, message: &str, start: Instant, output: OutputFormat) -> Result<()> {
  if output.is_json() {
    return print_json(result);
  }
  print_success(message);
  print_stat("Duration", &format_duration(start.elapsed()));
  Ok(())
}

/// Build the whole module, or `path` alone, for the host.
pub fn cmd_build(path: Option<&str>, opts: ToolchainOptions, output: OutputFormat) -> Result<()> {
  let start = Instant::now();
  let orchestrator = opts.orchestrator();

  let scope = match path {
    Some(path) => {
      orchestrator.compile_path(path).context("Compile check failed")?;
      path
    }
    None => {
      orchestrator.compile_all().context("Compile check failed")?;
      orchestrator.toolchain().build_all_pattern.as_str()
    }
  };

  let result = StepResult {
    step: "build",
    scope: Some(scope),
    target: None,
    duration_ms: start.elapsed().as_millis(),
  };
  report(&result, &format!("Compiled {}", scope), start, output)
}

/// Build the whole module for `target`.
pub fn cmd_cross(target: &BuildTarget, opts: ToolchainOptions, output: OutputFormat) -> Result<()> {
  let start = Instant::now();

  opts
    .orchestrator()
    .cross_compile(target)
    .with_context(|| format!("Cross-compile check failed for {}", target))?;

  let result = StepResult {
    step: "cross",
    scope: None,
    target: Some(target),
    duration_ms: start.elapsed().as_millis(),
  };
  report(&result, &format!("Cross-compiled for {}", target), start, output)
}

/// Remove the toolchain's build cache.
pub fn cmd_clean(opts: ToolchainOptions, output: OutputFormat) -> Result<()> {
  let start = Instant::now();

  opts
    .orchestrator()
    .clean_build_cache()
    .context("Failed to clean build cache")?;

  let result = StepResult {
    step: "clean",
    scope: None,
    target: None,
    duration_ms: start.elapsed().as_millis(),
  };
  report(&result, "Build cache cleaned", start, output)
}
