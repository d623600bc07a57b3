use anyhow::Result;
use serde_json::json;

use sys_harness_lib::toolchain::version;

use crate::output::{OutputFormat, print_json};

pub fn cmd_version(output: OutputFormat) -> Result<()> {
  if output.is_json() {
    return print_json(&json!({ "orchestrator": version(), "cli": env!("CARGO_PKG_VERSION") }));
  }

  println!("{} (sys-harness {})", version(), env!("CARGO_PKG_VERSION"));
  Ok(())
}
