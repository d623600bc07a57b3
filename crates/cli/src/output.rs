//! Terminal output for harness commands.
//!
//! Successful steps print to stdout as a status line followed by indented
//! stats. Failures print to stderr with the cause chain, and a failed toolchain
//! run gets its captured output replayed in a gutter block.

use std::time::Duration;

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};
use sys_harness_lib::toolchain::ToolchainError;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const FAILURE: &str = "✗";
  pub const INFO: &str = "•";
  /// Prefix for each line of replayed toolchain output.
  pub const GUTTER: &str = "│";
}

/// Size of an asset tree in binary units.
pub fn format_bytes(bytes: u64) -> String {
  const UNITS: [&str; 4] = ["KiB", "MiB", "GiB", "TiB"];

  if bytes < 1024 {
    return format!("{bytes} B");
  }

  let mut value = bytes as f64 / 1024.0;
  let mut unit = 0;
  while value >= 1024.0 && unit + 1 < UNITS.len() {
    value /= 1024.0;
    unit += 1;
  }
  format!("{value:.1} {}", UNITS[unit])
}

/// Wall time of a verification or toolchain step.
///
/// Sub-second steps show milliseconds; longer toolchain runs show tenths of a
/// second, then minutes.
pub fn format_duration(duration: Duration) -> String {
  let millis = duration.as_millis();
  match millis {
    0..=999 => format!("{millis}ms"),
    1_000..=59_999 => format!("{:.1}s", duration.as_secs_f64()),
    _ => {
      let secs = duration.as_secs();
      format!("{}m{:02}s", secs / 60, secs % 60)
    }
  }
}

/// Render a command failure as plain text.
///
/// Each cause in the chain gets its own line. A [`ToolchainError`] is shown
/// by its headline, followed by the toolchain's captured output.
pub fn render_failure(err: &anyhow::Error) -> String {
  let mut rendered = String::new();

  for (depth, cause) in err.chain().enumerate() {
    let (headline, captured) = match cause.downcast_ref::<ToolchainError>() {
      Some(toolchain_err) => {
        let message = toolchain_err.to_string();
        let headline = message.lines().next().unwrap_or_default().to_string();
        (headline, toolchain_err.output())
      }
      None => (cause.to_string(), None),
    };

    if depth == 0 {
      rendered.push_str(&headline);
    } else {
      rendered.push_str(&format!("\n  caused by: {headline}"));
    }

    if let Some(captured) = captured {
      rendered.push_str("\n  toolchain output:");
      if captured.trim().is_empty() {
        rendered.push_str(&format!("\n  {} (none)", symbols::GUTTER));
      }
      for line in captured.lines() {
        rendered.push_str(&format!("\n  {} {line}", symbols::GUTTER));
      }
    }
  }

  rendered
}

pub fn print_success(message: &str) {
  println!(
    "{} {}",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    message
  );
}

/// Print a failed command to stderr.
pub fn print_failure(err: &anyhow::Error) {
  eprintln!(
    "{} {}",
    symbols::FAILURE.if_supports_color(Stream::Stderr, |s| s.red()),
    render_failure(err)
  );
}

pub fn print_info(message: &str) {
  println!(
    "{} {}",
    symbols::INFO.if_supports_color(Stream::Stdout, |s| s.blue()),
    message
  );
}

pub fn print_stat(label: &str, value: &str) {
  println!(
    "  {}: {}",
    label.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    value
  );
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize report")?;
  println!("{json}");
  Ok(())
}
