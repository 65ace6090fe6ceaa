//! Run command: start a new release or resume the persisted one

use crate::core::config::Config;
use crate::core::error::{ReleaseResult, ResultExt};
use crate::core::sequencer::Sequencer;
use crate::core::state::{self, ReleaseState};
use crate::core::steps::ReleaseStep;
use crate::core::vcs::GitRepo;
use crate::ui::Console;
use std::env;

pub fn run_release() -> ReleaseResult<()> {
  let work_dir = env::current_dir().context("Failed to get the working directory")?;
  let config = Config::load(&work_dir)?;
  let repo = GitRepo::open(&work_dir)?;
  let console = Console::new();

  let checkpoint = config.checkpoint_file(&work_dir);
  let mut state = match ReleaseState::load(&checkpoint)? {
    Some(state) => {
      console.info(&format!(
        "Resuming the release of version {} at step {} ({}/{}).",
        state.new_version,
        state.resume_step,
        state.resume_step.ordinal() + 1,
        ReleaseStep::ALL.len()
      ));
      state
    }
    None => state::init_fresh(&config, &repo, &console)?,
  };

  Sequencer::new(&config, &repo, &console).execute(&mut state)
}
