//! The release state machine
//!
//! Execution is linear and total: steps run in catalogue order from the
//! resume point through `PushAtLast`. The checkpoint is rewritten with the
//! current step before that step runs, so any failure or interruption
//! resumes at the failed step, never past it. There is no rollback; every
//! error aborts the run and leaves the checkpoint in place.

use crate::core::config::Config;
use crate::core::error::{ReleaseError, ReleaseResult};
use crate::core::state::ReleaseState;
use crate::core::steps::ReleaseStep;
use crate::core::vcs::GitRepo;
use crate::core::{version, versions_file};
use crate::ui::Console;
use std::path::{Path, PathBuf};

/// Drives a release from its resume point to completion
pub struct Sequencer<'a> {
  config: &'a Config,
  repo: &'a GitRepo,
  console: &'a Console,
  checkpoint: PathBuf,
}

impl<'a> Sequencer<'a> {
  pub fn new(config: &'a Config, repo: &'a GitRepo, console: &'a Console) -> Sequencer<'a> {
    let checkpoint = config.checkpoint_file(repo.work_dir());
    Sequencer {
      config,
      repo,
      console,
      checkpoint,
    }
  }

  /// Run every step from `state.resume_step` through the terminal step,
  /// then delete the checkpoint
  pub fn execute(&self, state: &mut ReleaseState) -> ReleaseResult<()> {
    for &step in state.resume_step.remaining() {
      state.resume_step = step;
      state.persist(&self.checkpoint)?;
      self.run_step(step, state)?;
    }

    ReleaseState::clear(&self.checkpoint)?;
    self.console.question("All done! Let's brag about this new release!!");
    Ok(())
  }

  fn run_step(&self, step: ReleaseStep, state: &mut ReleaseState) -> ReleaseResult<()> {
    match step {
      ReleaseStep::BumpVersion => self.bump_version(state),
      ReleaseStep::RequestReadmeUpdate => self.request_edit(
        "Update the `README.md` with the new version and any other changes.",
        Path::new("README.md"),
      ),
      ReleaseStep::RequestChangelogUpdate => self.request_edit(
        "Update the `CHANGELOG.md` for the impending release.",
        Path::new("CHANGELOG.md"),
      ),
      ReleaseStep::CommitAndTag => self.commit_and_tag(state),
      ReleaseStep::CleanAndUpload => Err(ReleaseError::with_help(
        "The clean-and-upload step is obsolete and has no implementation.",
        "Artifact publishing moved to CI. Once it has run, change line 3 of the \
         checkpoint file to `PushRelease` and run `reltrain run` again.",
      )),
      ReleaseStep::PushRelease => {
        let command = format!("git push {}", self.config.git.remote);
        self.console.info(&format!("Will now run {}", command));
        self.console.confirm("Continue?")?;
        self.repo.run_interactive(&command)
      }
      ReleaseStep::RequestPrSubmission => self.console.request_manual_action(&format!(
        "Create a pull request from the `{}` to the `{}` branch for the new version, if not already done.",
        self.config.git.dev_branch, self.config.git.main_branch
      )),
      ReleaseStep::RequestPackagePublish => self
        .console
        .request_manual_action("Sign in to the package repository and publish the artifacts."),
      ReleaseStep::PushTags => {
        let command = format!("git push {} --tags", self.config.git.remote);
        self.console.info(&format!("Will now run {}", command));
        self.console.confirm("Continue?")?;
        self.repo.run_interactive(&command)
      }
      ReleaseStep::RequestPrMerge => self
        .console
        .request_manual_action("Merge the pull request for the new version."),
      ReleaseStep::RequestGithubRelease => self.console.request_manual_action("Publish the release on GitHub."),
      ReleaseStep::UpdateMasterBranch => {
        self.console.info(&format!(
          "Will now checkout the `{}` branch and pull from `{}` to update it.",
          self.config.git.main_branch, self.config.git.remote
        ));
        self.console.confirm("Continue?")?;
        self
          .repo
          .run_interactive(&format!("git checkout {}", self.config.git.main_branch))?;
        self.repo.run_interactive(&format!("git pull {}", self.config.git.remote))
      }
      ReleaseStep::UpdateDevelopBranch => {
        self.console.info(&format!(
          "About to checkout the `{}` branch and update it from `{}` for merge commits.",
          self.config.git.dev_branch, self.config.git.main_branch
        ));
        self.console.confirm("Continue?")?;
        self
          .repo
          .run_interactive(&format!("git checkout {}", self.config.git.dev_branch))?;
        self
          .repo
          .run_interactive(&format!("git merge {}", self.config.git.main_branch))
      }
      ReleaseStep::RevertToDevVersion => self.revert_to_dev_version(state),
      ReleaseStep::CommitNextDevVersion => {
        let command = "git commit -am \"Prepare next development version.\"";
        self.console.confirm(&format!("Will run {} Continue?", command))?;
        self.repo.run_interactive(command)
      }
      ReleaseStep::PushAtLast => {
        let command = format!("git push {}", self.config.git.remote);
        self
          .console
          .confirm(&format!("Finally the last step: running `{}`. Continue?", command))?;
        self.repo.run_interactive(&command)
      }
    }
  }

  fn bump_version(&self, state: &ReleaseState) -> ReleaseResult<()> {
    self.repo.assert_on_branch(&self.config.git.dev_branch)?;
    self.console.info(&format!("New version: \"{}\"", state.new_version));
    self.console.confirm("Confirm?")?;

    let versions_path = self.config.versions_file(self.repo.work_dir());
    versions_file::set_version(&versions_path, &self.config.versions.key, &state.new_version)
  }

  fn request_edit(&self, instructions: &str, file: &Path) -> ReleaseResult<()> {
    self.console.request_manual_action(instructions)?;
    self.repo.assert_changed(file)
  }

  fn commit_and_tag(&self, state: &ReleaseState) -> ReleaseResult<()> {
    self
      .repo
      .run_interactive(&format!("git commit -am \"Prepare for release {}\"", state.new_version))?;
    self.repo.run_interactive(&format!(
      "git tag -a {}{} -m \"Version {}\"",
      self.config.git.tag_prefix, state.new_version, state.new_version
    ))
  }

  fn revert_to_dev_version(&self, state: &ReleaseState) -> ReleaseResult<()> {
    self.console.info("Let's update the library to the next development version.");
    self.console.info(&format!(
      "If you want to keep using {}, enter an empty line.",
      state.current_dev_version
    ));
    self.console.info(&format!(
      "Otherwise, enter the name of the next target version (`{}001` will be added automatically).",
      version::DEV_MARKER
    ));

    let input = self.console.read_line()?;
    let next_dev_version = if input.trim().is_empty() {
      state.current_dev_version.clone()
    } else {
      format!("{}{}001", input, version::DEV_MARKER)
    };

    let versions_path = self.config.versions_file(self.repo.work_dir());
    versions_file::set_version(&versions_path, &self.config.versions.key, &next_dev_version)?;
    self.console.info(&format!(
      "{} has been edited with the next development version ({}).",
      versions_path.display(),
      next_dev_version
    ));
    Ok(())
  }
}
