//! Compiler toolchain orchestration.
//!
//! Drives an external toolchain as a subprocess to check that the `sys`
//! module compiles, optionally for a foreign platform, and to reclaim the
//! toolchain's build cache. Every operation blocks until the subprocess exits
//! and surfaces a non-zero exit as a typed error carrying the captured output.

pub mod env;
pub mod exec;

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::consts::{DEFAULT_TOOLCHAIN_BIN, ORCHESTRATOR_VERSION};
use crate::platform::BuildTarget;

pub use env::CommandEnv;
pub use exec::{CommandOutput, run_combined};

/// Errors that can occur while driving the toolchain.
#[derive(Debug, Error)]
pub enum ToolchainError {
  /// A build of `scope` exited non-zero.
  #[error("compile failed for {scope} (exit code {code:?})\nOutput: {output}")]
  Compile {
    scope: String,
    code: Option<i32>,
    output: String,
  },

  /// A build for a foreign target exited non-zero.
  #[error("cross-compile failed ({os}/{arch}) (exit code {code:?})\nOutput: {output}")]
  CrossCompile {
    os: String,
    arch: String,
    code: Option<i32>,
    output: String,
  },

  /// The cache-clean command exited non-zero.
  #[error("failed to clean build cache (exit code {code:?})\nOutput: {output}")]
  CacheClean { code: Option<i32>, output: String },

  /// The toolchain process could not be started or waited on.
  #[error("failed to run toolchain {program}: {source}")]
  Spawn {
    program: String,
    #[source]
    source: io::Error,
  },
}

impl ToolchainError {
  /// Captured toolchain output, if the process ran at all.
  pub fn output(&self) -> Option<&str> {
    match self {
      ToolchainError::Compile { output, .. }
      | ToolchainError::CrossCompile { output, .. }
      | ToolchainError::CacheClean { output, .. } => Some(output),
      ToolchainError::Spawn { .. } => None,
    }
  }
}

/// How to invoke a particular compiler toolchain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
  pub program: String,
  /// Arguments preceding the package pattern or path in a build.
  pub build_args: Vec<String>,
  /// Package pattern meaning "everything under the current module".
  pub build_all_pattern: String,
  pub clean_cache_args: Vec<String>,
  /// Variable selecting the target operating system.
  pub os_var: String,
  /// Variable selecting the target architecture.
  pub arch_var: String,
}

impl Toolchain {
  /// The Go toolchain: `go build ./...`, `go clean -cache`, `GOOS`/`GOARCH`.
  pub fn go() -> Self {
    Self {
      program: DEFAULT_TOOLCHAIN_BIN.to_string(),
      build_args: vec!["build".to_string()],
      build_all_pattern: "./...".to_string(),
      clean_cache_args: vec!["clean".to_string(), "-cache".to_string()],
      os_var: "GOOS".to_string(),
      arch_var: "GOARCH".to_string(),
    }
  }

  pub fn with_program(mut self, program: impl Into<String>) -> Self {
    self.program = program.into();
    self
  }

  fn build_command(&self, target: &str) -> Vec<String> {
    let mut args = self.build_args.clone();
    args.push(target.to_string());
    args
  }
}

impl Default for Toolchain {
  fn default() -> Self {
    Self::go()
  }
}

/// Returns the identifying version string of this orchestrator.
pub fn version() -> &'static str {
  ORCHESTRATOR_VERSION
}

/// Runs build, cross-compile and cache-clean steps through a [`Toolchain`].
///
/// Holds no mutable state; each call spawns its own subprocess.
#[derive(Debug, Clone)]
pub struct BuildOrchestrator {
  toolchain: Toolchain,
  env: CommandEnv,
  workdir: Option<PathBuf>,
}

impl BuildOrchestrator {
  /// Create an orchestrator whose subprocesses inherit this process's environment.
  pub fn new(toolchain: Toolchain) -> Self {
    Self {
      toolchain,
      env: CommandEnv::inherited(),
      workdir: None,
    }
  }

  /// Use `env` as the base environment for every subprocess.
  pub fn with_env(mut self, env: CommandEnv) -> Self {
    self.env = env;
    self
  }

  /// Run the toolchain from `dir` (typically the module root).
  pub fn with_workdir(mut self, dir: impl AsRef<Path>) -> Self {
    self.workdir = Some(dir.as_ref().to_path_buf());
    self
  }

  pub fn toolchain(&self) -> &Toolchain {
    &self.toolchain
  }

  /// Build everything under the current module for the host.
  pub fn compile_all(&self) -> Result<(), ToolchainError> {
    self.compile_path(&self.toolchain.build_all_pattern)
  }

  /// Build a single subpath for the host.
  pub fn compile_path(&self, path: &str) -> Result<(), ToolchainError> {
    info!(path, "compiling");
    let out = self.run(&self.toolchain.build_command(path), &self.env)?;

    if !out.success() {
      debug!(output = %out.output, "compile output");
      return Err(ToolchainError::Compile {
        scope: path.to_string(),
        code: out.code(),
        output: out.output,
      });
    }

    Ok(())
  }

  /// Build everything for `target`, overriding the toolchain's target variables.
  pub fn cross_compile(&self, target: &BuildTarget) -> Result<(), ToolchainError> {
    info!(os = %target.os, arch = %target.arch, "cross-compiling");
    let env = self
      .env
      .clone()
      .with_override(&self.toolchain.os_var, &target.os)
      .with_override(&self.toolchain.arch_var, &target.arch);

    let out = self.run(&self.toolchain.build_command(&self.toolchain.build_all_pattern), &env)?;

    if !out.success() {
      debug!(output = %out.output, "cross-compile output");
      return Err(ToolchainError::CrossCompile {
        os: target.os.clone(),
        arch: target.arch.clone(),
        code: out.code(),
        output: out.output,
      });
    }

    Ok(())
  }

  /// Remove the toolchain's build cache.
  pub fn clean_build_cache(&self) -> Result<(), ToolchainError> {
    info!("cleaning build cache");
    let out = self.run(&self.toolchain.clean_cache_args, &self.env)?;

    if !out.success() {
      debug!(output = %out.output, "clean output");
      return Err(ToolchainError::CacheClean {
        code: out.code(),
        output: out.output,
      });
    }

    Ok(())
  }

  fn run(&self, args: &[String], env: &CommandEnv) -> Result<CommandOutput, ToolchainError> {
    info!(
      program = %self.toolchain.program,
      ?args,
      overrides = ?env.overrides(),
      "invoking toolchain"
    );

    run_combined(&self.toolchain.program, args, env, self.workdir.as_deref()).map_err(|source| {
      ToolchainError::Spawn {
        program: self.toolchain.program.clone(),
        source,
      }
    })
  }
}
