mod cmd;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use sys_harness_lib::config::HarnessConfig;
use sys_harness_lib::platform::BuildTarget;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cmd::{ToolchainOptions, cmd_build, cmd_clean, cmd_cross, cmd_info, cmd_verify, cmd_version};
use crate::output::{OutputFormat, print_failure};

/// sys-harness - asset verification and toolchain checks for sys
#[derive(Parser)]
#[command(name = "sys-harness")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Output format
  #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
  output: OutputFormat,

  #[command(subcommand)]
  command: Commands,
}

/// Options shared by commands that invoke the toolchain.
#[derive(Args)]
struct ToolchainArgs {
  /// Toolchain program to invoke (default: $SYS_TOOLCHAIN_BIN or go)
  #[arg(long)]
  toolchain: Option<String>,

  /// Directory to run the toolchain from (the module root)
  #[arg(long)]
  dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
  /// Verify the asset directory is present, non-empty and readable
  Verify {
    /// Asset directory (default: $SYS_ASSETS_DIR or ./assets)
    #[arg(long)]
    assets_dir: Option<PathBuf>,

    /// Asset that must exist as a regular file; repeatable
    #[arg(long = "expect", value_name = "NAME")]
    expect: Vec<String>,
  },

  /// Build everything, or a single path, for the host
  Build {
    /// Subpath to build instead of the whole module
    path: Option<String>,

    #[command(flatten)]
    toolchain: ToolchainArgs,
  },

  /// Build everything for another OS/architecture
  Cross {
    /// Target operating system (e.g. linux)
    #[arg(required_unless_present = "target", requires = "arch")]
    os: Option<String>,

    /// Target architecture (e.g. amd64)
    arch: Option<String>,

    /// Target as OS/ARCH
    #[arg(long, conflicts_with_all = ["os", "arch"])]
    target: Option<BuildTarget>,

    #[command(flatten)]
    toolchain: ToolchainArgs,
  },

  /// Clean the toolchain's build cache
  Clean {
    #[command(flatten)]
    toolchain: ToolchainArgs,
  },

  /// Show the orchestrator version
  Version,

  /// Show host platform information
  Info,
}

fn init_logging(verbose: bool) {
  let default = if verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}

fn main() {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  if let Err(err) = run(cli) {
    print_failure(&err);
    std::process::exit(1);
  }
}

fn run(cli: Cli) -> Result<()> {
  let config = HarnessConfig::from_env();
  debug!(?config, "resolved configuration");

  let toolchain_opts = |args: ToolchainArgs| ToolchainOptions {
    program: args.toolchain.unwrap_or_else(|| config.toolchain_bin.clone()),
    dir: args.dir,
  };

  match cli.command {
    Commands::Verify { assets_dir, expect } => {
      let mut assets = config.assets.clone();
      if let Some(dir) = assets_dir {
        assets.dir = dir;
      }
      if !expect.is_empty() {
        assets.expected = Some(expect);
      }
      cmd_verify(assets, cli.output)
    }
    Commands::Build { path, toolchain } => cmd_build(path.as_deref(), toolchain_opts(toolchain), cli.output),
    Commands::Cross {
      os,
      arch,
      target,
      toolchain,
    } => {
      let target = match (target, os, arch) {
        (Some(target), _, _) => target,
        (None, Some(os), Some(arch)) => BuildTarget::new(os, arch),
        _ => anyhow::bail!("cross requires OS and ARCH, or --target OS/ARCH"),
      };
      cmd_cross(&target, toolchain_opts(toolchain), cli.output)
    }
    Commands::Clean { toolchain } => cmd_clean(toolchain_opts(toolchain), cli.output),
    Commands::Version => cmd_version(cli.output),
    Commands::Info => cmd_info(cli.output),
  }
}
