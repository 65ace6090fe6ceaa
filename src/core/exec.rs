//! Synchronous external command execution
//!
//! Commands are given as single strings and tokenized with a quote-aware
//! splitter: a token is either a double-quoted run of non-quote characters
//! or a maximal run of non-whitespace characters. Execution blocks the
//! calling thread until the child exits or the 60-minute bound elapses.

use crate::core::error::{ProcessError, ReleaseError, ReleaseResult};
use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// Upper bound on a single command, in minutes
pub const TIMEOUT_MINUTES: u64 = 60;

/// Interval between child exit polls
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// How the child's stdio is wired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
  /// Pipe stdout/stderr for programmatic inspection
  Captured,
  /// Connect the child directly to the controlling terminal
  /// (for fully interactive subprocesses)
  Inherited,
}

/// Outcome of a successfully exited command
#[derive(Debug, Clone)]
pub struct CommandOutput {
  pub exit_code: i32,
  pub stdout: String,
}

/// Split a raw command string into arguments
///
/// Double-quoted substrings become single arguments with the quotes
/// stripped; everything else splits on whitespace.
pub fn split_command(raw: &str) -> Vec<String> {
  let mut tokens = Vec::new();
  let mut chars = raw.chars().peekable();

  while let Some(&c) = chars.peek() {
    if c.is_whitespace() {
      chars.next();
    } else if c == '"' {
      chars.next();
      let mut token = String::new();
      for q in chars.by_ref() {
        if q == '"' {
          break;
        }
        token.push(q);
      }
      tokens.push(token);
    } else {
      let mut token = String::new();
      while let Some(&w) = chars.peek() {
        if w.is_whitespace() || w == '"' {
          break;
        }
        token.push(w);
        chars.next();
      }
      tokens.push(token);
    }
  }

  tokens
}

/// Run an external command, blocking until it exits
///
/// Fails with `ProcessError::CommandFailed` on a non-zero exit code and
/// `ProcessError::TimedOut` when the child outlives the 60-minute bound
/// (the child is killed in that case).
pub fn run(raw: &str, cwd: &Path, mode: OutputMode) -> ReleaseResult<CommandOutput> {
  let tokens = split_command(raw);
  let Some((program, args)) = tokens.split_first() else {
    return Err(ReleaseError::message("Cannot run an empty command"));
  };

  let mut cmd = Command::new(program);
  cmd.args(args).current_dir(cwd);

  match mode {
    OutputMode::Captured => {
      cmd.stdin(Stdio::null());
      cmd.stdout(Stdio::piped());
      cmd.stderr(Stdio::piped());
    }
    OutputMode::Inherited => {
      cmd.stdin(Stdio::inherit());
      cmd.stdout(Stdio::inherit());
      cmd.stderr(Stdio::inherit());
    }
  }

  let mut child = cmd
    .spawn()
    .map_err(|e| ReleaseError::message(format!("Failed to spawn `{}`: {}", raw, e)))?;

  // Drain pipes on separate threads so a chatty child can't block on a
  // full pipe buffer while we poll for exit.
  let stdout_reader = child.stdout.take().map(spawn_reader);
  let stderr_reader = child.stderr.take().map(spawn_reader);

  let status = wait_with_deadline(&mut child, raw)?;

  let stdout = stdout_reader.map(join_reader).unwrap_or_default();
  let stderr = stderr_reader.map(join_reader).unwrap_or_default();

  let exit_code = status_code(&status);
  if !status.success() {
    return Err(
      ProcessError::CommandFailed {
        command: raw.to_string(),
        exit_code,
        stderr,
      }
      .into(),
    );
  }

  Ok(CommandOutput { exit_code, stdout })
}

fn spawn_reader<R: Read + Send + 'static>(mut source: R) -> thread::JoinHandle<String> {
  thread::spawn(move || {
    let mut buf = String::new();
    source.read_to_string(&mut buf).ok();
    buf
  })
}

fn join_reader(handle: thread::JoinHandle<String>) -> String {
  handle.join().unwrap_or_default()
}

fn wait_with_deadline(child: &mut Child, raw: &str) -> ReleaseResult<std::process::ExitStatus> {
  let deadline = Instant::now() + Duration::from_secs(TIMEOUT_MINUTES * 60);

  loop {
    if let Some(status) = child.try_wait()? {
      return Ok(status);
    }
    if Instant::now() >= deadline {
      child.kill().ok();
      child.wait().ok();
      return Err(
        ProcessError::TimedOut {
          command: raw.to_string(),
          minutes: TIMEOUT_MINUTES,
        }
        .into(),
      );
    }
    thread::sleep(POLL_INTERVAL);
  }
}

fn status_code(status: &std::process::ExitStatus) -> i32 {
  // Terminated by signal on Unix leaves no code
  status.code().unwrap_or(-1)
}
