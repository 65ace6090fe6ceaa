//! Persisted release progress
//!
//! The checkpoint is a three-line plain-text file: current dev version,
//! target version, and the name of the next step to run. It is rewritten
//! wholesale before each step and deleted only after the terminal step
//! succeeds, so at most one release is ever in flight.

use crate::core::config::Config;
use crate::core::error::{ReleaseError, ReleaseResult, ResultExt};
use crate::core::steps::ReleaseStep;
use crate::core::vcs::GitRepo;
use crate::core::{version, versions_file};
use crate::ui::Console;
use std::fs;
use std::path::Path;

/// In-memory record of the release in progress
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseState {
  /// Dev version the repository carried before the release started
  pub current_dev_version: String,

  /// Version being released
  pub new_version: String,

  /// Step the sequencer (re)starts at
  pub resume_step: ReleaseStep,
}

impl ReleaseState {
  /// Load the checkpoint, or `None` when no release is in progress
  pub fn load(checkpoint: &Path) -> ReleaseResult<Option<ReleaseState>> {
    if !checkpoint.exists() {
      return Ok(None);
    }

    let content =
      fs::read_to_string(checkpoint).with_context(|| format!("Failed to read checkpoint {}", checkpoint.display()))?;
    let mut lines = content.lines();
    let (Some(current_dev_version), Some(new_version), Some(step_name)) =
      (lines.next(), lines.next(), lines.next())
    else {
      return Err(ReleaseError::with_help(
        format!("Malformed checkpoint file: {}", checkpoint.display()),
        "Expected three lines: current dev version, new version, step name. \
         Run `reltrain abort` to discard it.",
      ));
    };

    Ok(Some(ReleaseState {
      current_dev_version: current_dev_version.trim_end().to_string(),
      new_version: new_version.trim_end().to_string(),
      resume_step: ReleaseStep::from_name(step_name.trim_end())?,
    }))
  }

  /// Overwrite the checkpoint with the current fields
  ///
  /// Called before each step runs, so a crash mid-step resumes at that
  /// same step rather than the next one.
  pub fn persist(&self, checkpoint: &Path) -> ReleaseResult<()> {
    let content = format!(
      "{}\n{}\n{}\n",
      self.current_dev_version,
      self.new_version,
      self.resume_step.name()
    );
    fs::write(checkpoint, content)
      .with_context(|| format!("Failed to write checkpoint {}", checkpoint.display()))?;
    Ok(())
  }

  /// Delete the checkpoint (only after the terminal step succeeds)
  pub fn clear(checkpoint: &Path) -> ReleaseResult<()> {
    fs::remove_file(checkpoint)
      .with_context(|| format!("Failed to delete checkpoint {}", checkpoint.display()))?;
    Ok(())
  }
}

/// Build a fresh state interactively when no checkpoint exists
///
/// Requires the dev branch, a single dev-marked version line in the
/// versions file, and a new version passing every validation rule.
pub fn init_fresh(config: &Config, repo: &GitRepo, console: &Console) -> ReleaseResult<ReleaseState> {
  repo.assert_on_branch(&config.git.dev_branch)?;

  let versions_path = config.versions_file(repo.work_dir());
  let current_dev_version = versions_file::read_version(&versions_path, &config.versions.key)?;
  if !current_dev_version.contains(version::DEV_MARKER) {
    return Err(ReleaseError::NotADevVersion {
      version: current_dev_version,
      path: versions_path,
    });
  }

  console.info(&format!("Current version: {}", current_dev_version));
  console.question("Please enter the name of the new version you want to release:");
  let input = console.read_line()?;

  let existing_tags = version::release_tags(&repo.tags()?, &config.git.tag_prefix);
  let new_version = version::validate(&input, &existing_tags, &config.git.tag_prefix)?;

  Ok(ReleaseState {
    current_dev_version,
    new_version,
    resume_step: ReleaseStep::first(),
  })
}
