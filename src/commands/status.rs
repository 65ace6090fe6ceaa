//! Status command: inspect the release in progress

use crate::core::config::Config;
use crate::core::error::ReleaseResult;
use crate::core::state::ReleaseState;
use crate::core::steps::ReleaseStep;
use chrono::{DateTime, Local};
use std::env;
use std::fs;
use std::path::Path;

pub fn run_status(json: bool) -> ReleaseResult<()> {
  let work_dir = env::current_dir()?;
  let config = Config::load(&work_dir)?;
  let checkpoint = config.checkpoint_file(&work_dir);

  let Some(state) = ReleaseState::load(&checkpoint)? else {
    if json {
      println!("{}", serde_json::json!({ "in_progress": false }));
    } else {
      println!("No release in progress.");
    }
    return Ok(());
  };

  let total = ReleaseStep::ALL.len();
  let position = state.resume_step.ordinal() + 1;

  if json {
    let payload = serde_json::json!({
      "in_progress": true,
      "current_dev_version": state.current_dev_version,
      "new_version": state.new_version,
      "resume_step": state.resume_step.name(),
      "step_position": position,
      "step_count": total,
      "remaining_steps": state
        .resume_step
        .remaining()
        .iter()
        .map(|step| step.name())
        .collect::<Vec<_>>(),
      "checkpoint_updated": checkpoint_timestamp(&checkpoint),
    });
    println!("{}", serde_json::to_string_pretty(&payload)?);
    return Ok(());
  }

  println!("📦 Release in progress: {}", state.new_version);
  println!("   From dev version: {}", state.current_dev_version);
  if let Some(updated) = checkpoint_timestamp(&checkpoint) {
    println!("   Checkpoint updated: {}", updated);
  }
  println!();
  println!("   Next step ({}/{}): {}", position, total, state.resume_step.describe());
  println!();
  println!("   Remaining steps:");
  for step in state.resume_step.remaining() {
    println!("   {:>2}. {}", step.ordinal() + 1, step.describe());
  }
  println!();
  println!("   Run `reltrain run` to continue.");

  Ok(())
}

fn checkpoint_timestamp(checkpoint: &Path) -> Option<String> {
  let modified = fs::metadata(checkpoint).ok()?.modified().ok()?;
  let local: DateTime<Local> = modified.into();
  Some(local.format("%Y-%m-%d %H:%M:%S").to_string())
}
