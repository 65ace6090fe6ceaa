//! Git operations via system git subprocesses
//!
//! All queries go through the string-command runner in `core::exec`, so
//! the same tokenizer and timeout bound apply to every git call.

use crate::core::error::{ProcessError, ReleaseError, ReleaseResult};
use crate::core::exec::{self, CommandOutput, OutputMode};
use std::path::{Path, PathBuf};

/// Handle on the repository the release runs in
pub struct GitRepo {
  work_dir: PathBuf,
}

impl GitRepo {
  /// Open the repository containing `dir`
  ///
  /// One subprocess call, which doubles as the "is this a git repo" check.
  pub fn open(dir: &Path) -> ReleaseResult<GitRepo> {
    match exec::run("git rev-parse --show-toplevel", dir, OutputMode::Captured) {
      Ok(_) => Ok(GitRepo {
        work_dir: dir.to_path_buf(),
      }),
      Err(ReleaseError::Process(ProcessError::CommandFailed { .. })) => Err(ReleaseError::with_help(
        format!("Not a git repository: {}", dir.display()),
        "Run reltrain from the root of the library repository.",
      )),
      Err(other) => Err(other),
    }
  }

  /// Directory git commands run in
  pub fn work_dir(&self) -> &Path {
    &self.work_dir
  }

  /// Run a command with output piped for inspection
  pub fn run_captured(&self, command: &str) -> ReleaseResult<CommandOutput> {
    exec::run(command, &self.work_dir, OutputMode::Captured)
  }

  /// Run a command wired to the controlling terminal
  pub fn run_interactive(&self, command: &str) -> ReleaseResult<()> {
    exec::run(command, &self.work_dir, OutputMode::Inherited)?;
    Ok(())
  }

  /// Name of the currently checked-out branch
  pub fn current_branch(&self) -> ReleaseResult<String> {
    let out = self.run_captured("git rev-parse --abbrev-ref HEAD")?;
    Ok(out.stdout.trim_end().to_string())
  }

  /// Fail with `WrongBranch` unless `expected` is checked out
  pub fn assert_on_branch(&self, expected: &str) -> ReleaseResult<()> {
    let current = self.current_branch()?;
    if current == expected {
      Ok(())
    } else {
      Err(ReleaseError::WrongBranch {
        current,
        expected: expected.to_string(),
      })
    }
  }

  /// All tags in the repository, one per entry
  pub fn tags(&self) -> ReleaseResult<Vec<String>> {
    let out = self.run_captured("git tag")?;
    Ok(out.stdout.lines().map(str::to_string).collect())
  }

  /// Fail with `NoChangesDetected` unless `path` differs from HEAD
  ///
  /// `git diff --exit-code` exits 0 when the file is unchanged and 1 when
  /// a difference exists; any other exit code is a real failure.
  pub fn assert_changed(&self, path: &Path) -> ReleaseResult<()> {
    let command = format!("git diff HEAD --exit-code \"{}\"", path.display());
    match self.run_captured(&command) {
      Ok(_) => Err(ReleaseError::NoChangesDetected {
        path: path.to_path_buf(),
      }),
      Err(ReleaseError::Process(ProcessError::CommandFailed { exit_code: 1, .. })) => Ok(()),
      Err(other) => Err(other),
    }
  }
}
