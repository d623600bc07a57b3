use anyhow::Result;
use serde_json::json;

use sys_harness_lib::platform::{BuildTarget, platform_triple};

use crate::output::{OutputFormat, print_json};

pub fn cmd_info(output: OutputFormat) -> Result<()> {
  let triple = platform_triple();
  let target = BuildTarget::host();

  if output.is_json() {
    return print_json(&json!({ "platform": triple, "toolchain_target": target }));
  }

  println!("System:");
  match triple {
    Some(triple) => println!("Platform: {}", triple),
    _ => println!("Could not detect platform."),
  }
  if let Some(target) = target {
    println!("Toolchain target: {}", target);
  }
  Ok(())
}
