//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Name the binary expects for the versions file
pub const VERSIONS_FILE: &str = "libraries_version.properties";

/// Name the binary expects for the checkpoint file
pub const CHECKPOINT_FILE: &str = "ongoing_release.reltrain";

/// A throwaway git repository prepared for a release run
pub struct TestRepo {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestRepo {
  /// Create a repository on the `develop` branch carrying `version` in
  /// its versions file, with README and CHANGELOG committed
  pub fn new(version: &str) -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();

    git(&path, &["init", "--initial-branch=develop"])?;
    git(&path, &["config", "user.name", "Test User"])?;
    git(&path, &["config", "user.email", "test@example.com"])?;

    std::fs::write(
      path.join(VERSIONS_FILE),
      format!("# library versions\nsplitties.version={}\n", version),
    )?;
    std::fs::write(path.join("README.md"), "# test library\n\nCurrent version: none\n")?;
    std::fs::write(path.join("CHANGELOG.md"), "# Changelog\n")?;

    git(&path, &["add", "."])?;
    git(&path, &["commit", "-m", "Initial project setup"])?;

    Ok(Self { _root: root, path })
  }

  /// Add a bare `origin` remote with `develop` and `master` pushed and
  /// tracking set up, so pushes and pulls inside steps work offline
  pub fn with_bare_remote(&self) -> Result<TempDir> {
    let remote = TempDir::new()?;
    git(remote.path(), &["init", "--bare", "--initial-branch=develop"])?;

    let remote_path = remote.path().to_string_lossy().to_string();
    git(&self.path, &["remote", "add", "origin", &remote_path])?;
    git(&self.path, &["branch", "master"])?;
    git(&self.path, &["push", "-u", "origin", "develop"])?;
    git(&self.path, &["checkout", "master"])?;
    git(&self.path, &["push", "-u", "origin", "master"])?;
    git(&self.path, &["checkout", "develop"])?;

    Ok(remote)
  }

  /// Write a checkpoint as if a release had been interrupted
  pub fn write_checkpoint(&self, dev_version: &str, new_version: &str, step: &str) -> Result<()> {
    std::fs::write(
      self.checkpoint_path(),
      format!("{}\n{}\n{}\n", dev_version, new_version, step),
    )?;
    Ok(())
  }

  pub fn checkpoint_path(&self) -> PathBuf {
    self.path.join(CHECKPOINT_FILE)
  }

  /// Read a file relative to the repository root
  pub fn read_file(&self, name: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.path.join(name))?)
  }

  /// Overwrite a file relative to the repository root
  pub fn write_file(&self, name: &str, content: &str) -> Result<()> {
    std::fs::write(self.path.join(name), content)?;
    Ok(())
  }

  /// Commit all current changes
  pub fn commit(&self, message: &str) -> Result<()> {
    git(&self.path, &["add", "."])?;
    git(&self.path, &["commit", "-m", message])?;
    Ok(())
  }

  /// Last commit subjects, newest first
  pub fn git_log(&self, n: usize) -> Result<Vec<String>> {
    let output = git(&self.path, &["log", &format!("-{}", n), "--format=%s"])?;
    Ok(
      String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(String::from)
        .collect(),
    )
  }
}

/// Run git command in a directory
pub fn git(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run git command")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("Git command failed: git {}\n{}", args.join(" "), stderr);
  }

  Ok(output)
}

/// Run the reltrain binary with the given stdin script
///
/// Returns the raw output; callers assert on the exit status themselves
/// since many scenarios expect a non-zero exit.
pub fn run_reltrain(cwd: &Path, args: &[&str], stdin_input: &str) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_reltrain");

  let mut child = Command::new(bin)
    .current_dir(cwd)
    .args(args)
    .stdin(Stdio::piped())
    .stdout(Stdio::piped())
    .stderr(Stdio::piped())
    .spawn()
    .context("Failed to run reltrain")?;

  child
    .stdin
    .take()
    .context("reltrain stdin not piped")?
    .write_all(stdin_input.as_bytes())?;

  Ok(child.wait_with_output()?)
}

/// Convenience: stdout as a string
pub fn stdout_of(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).to_string()
}

/// Convenience: stderr as a string
pub fn stderr_of(output: &Output) -> String {
  String::from_utf8_lossy(&output.stderr).to_string()
}
