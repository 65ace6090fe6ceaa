//! Abort command: discard the persisted release progress

use crate::core::config::Config;
use crate::core::error::ReleaseResult;
use crate::core::state::ReleaseState;
use crate::ui::Console;
use std::env;

pub fn run_abort(yes: bool) -> ReleaseResult<()> {
  let work_dir = env::current_dir()?;
  let config = Config::load(&work_dir)?;
  let checkpoint = config.checkpoint_file(&work_dir);

  let Some(state) = ReleaseState::load(&checkpoint)? else {
    println!("No release in progress, nothing to abort.");
    return Ok(());
  };

  if !yes {
    let console = Console::new();
    console.info(&format!(
      "A release of version {} is in progress (next step: {}).",
      state.new_version, state.resume_step
    ));
    console.confirm("Discard it? This deletes the checkpoint, not any commit or tag.")?;
  }

  ReleaseState::clear(&checkpoint)?;
  println!("✅ Checkpoint deleted. The next `reltrain run` starts a fresh release.");
  Ok(())
}
