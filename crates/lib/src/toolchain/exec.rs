//! Blocking subprocess execution with combined output capture.

use std::io::{self, Read};
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use tracing::debug;

use super::env::CommandEnv;

/// Exit status and interleaved stdout/stderr of a finished process.
#[derive(Debug)]
pub struct CommandOutput {
  pub status: ExitStatus,
  pub output: String,
}

impl CommandOutput {
  pub fn success(&self) -> bool {
    self.status.success()
  }

  pub fn code(&self) -> Option<i32> {
    self.status.code()
  }
}

/// Run `program` to completion, blocking the calling thread.
///
/// stdout and stderr share one pipe, so `output` keeps the order in which the
/// child wrote it. The child gets exactly the environment `env` resolves to.
pub fn run_combined(program: &str, args: &[String], env: &CommandEnv, cwd: Option<&Path>) -> io::Result<CommandOutput> {
  let (mut reader, writer) = io::pipe()?;

  let mut command = Command::new(program);
  command
    .args(args)
    .stdin(Stdio::null())
    .stdout(writer.try_clone()?)
    .stderr(writer);
  env.apply(&mut command);
  if let Some(dir) = cwd {
    command.current_dir(dir);
  }

  debug!(program, ?args, cwd = ?cwd, "spawning process");
  let mut child = command.spawn()?;

  // The command still holds write ends of the pipe; drop them so the read
  // below sees EOF once the child exits.
  drop(command);

  let mut buf = Vec::new();
  let read = reader.read_to_end(&mut buf);
  let status = child.wait()?;
  read?;

  Ok(CommandOutput {
    status,
    output: String::from_utf8_lossy(&buf).into_owned(),
  })
}
