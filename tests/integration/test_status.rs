//! Status command output, plain and JSON

use crate::helpers::{TestRepo, run_reltrain, stdout_of};
use anyhow::Result;

#[test]
fn test_status_without_checkpoint() -> Result<()> {
  let repo = TestRepo::new("1.0-dev-01")?;

  let output = run_reltrain(&repo.path, &["status"], "")?;
  assert!(output.status.success());
  assert!(stdout_of(&output).contains("No release in progress"));

  Ok(())
}

#[test]
fn test_status_reports_versions_and_next_step() -> Result<()> {
  let repo = TestRepo::new("1.0-dev-01")?;
  repo.write_checkpoint("1.0-dev-01", "1.0.0", "PushTags")?;

  let output = run_reltrain(&repo.path, &["status"], "")?;
  assert!(output.status.success());
  let stdout = stdout_of(&output);
  assert!(stdout.contains("1.0.0"), "{}", stdout);
  assert!(stdout.contains("1.0-dev-01"), "{}", stdout);
  assert!(stdout.contains("9/16"), "{}", stdout);
  assert!(stdout.contains("Push tags to origin"), "{}", stdout);

  Ok(())
}

#[test]
fn test_status_json_shape() -> Result<()> {
  let repo = TestRepo::new("1.0-dev-01")?;
  repo.write_checkpoint("1.0-dev-01", "1.0.0", "PushTags")?;

  let output = run_reltrain(&repo.path, &["status", "--json"], "")?;
  assert!(output.status.success());

  let json: serde_json::Value = serde_json::from_str(&stdout_of(&output))?;
  assert_eq!(json["in_progress"], true);
  assert_eq!(json["new_version"], "1.0.0");
  assert_eq!(json["resume_step"], "PushTags");
  assert_eq!(json["step_position"], 9);
  assert_eq!(json["step_count"], 16);
  assert_eq!(json["remaining_steps"][0], "PushTags");

  Ok(())
}

#[test]
fn test_status_json_without_checkpoint() -> Result<()> {
  let repo = TestRepo::new("1.0-dev-01")?;

  let output = run_reltrain(&repo.path, &["status", "--json"], "")?;
  assert!(output.status.success());

  let json: serde_json::Value = serde_json::from_str(&stdout_of(&output))?;
  assert_eq!(json["in_progress"], false);

  Ok(())
}
