//! Checkpoint creation, resume positioning and validator behavior
//! through the binary

use crate::helpers::{TestRepo, run_reltrain, stderr_of};
use anyhow::Result;

#[test]
fn test_fresh_run_bumps_version_and_checkpoints_the_next_step() -> Result<()> {
  let repo = TestRepo::new("1.0-dev-01")?;

  // New version -> 1.0.0, confirm the bump, then decline the README
  // confirmation so the run aborts on step 2.
  let output = run_reltrain(&repo.path, &["run"], "1.0.0\nY\nn\n")?;
  assert!(!output.status.success());
  assert_eq!(output.status.code(), Some(1)); // UserAborted

  // Step 1 side effect happened
  let versions = repo.read_file("libraries_version.properties")?;
  assert!(versions.contains("splitties.version=1.0.0"), "{}", versions);

  // Checkpoint points at the aborted step, not past it
  let checkpoint = repo.read_file("ongoing_release.reltrain")?;
  let lines: Vec<&str> = checkpoint.lines().collect();
  assert_eq!(lines, vec!["1.0-dev-01", "1.0.0", "RequestReadmeUpdate"]);

  Ok(())
}

#[test]
fn test_resume_does_not_rerun_earlier_steps() -> Result<()> {
  let repo = TestRepo::new("1.0-dev-01")?;
  repo.write_checkpoint("1.0-dev-01", "1.0.0", "RequestChangelogUpdate")?;

  // Decline immediately: the only prompt must be the CHANGELOG one,
  // proving BumpVersion was skipped (the versions file stays untouched).
  let output = run_reltrain(&repo.path, &["run"], "n\n")?;
  assert!(!output.status.success());

  let versions = repo.read_file("libraries_version.properties")?;
  assert!(versions.contains("splitties.version=1.0-dev-01"), "{}", versions);

  let checkpoint = repo.read_file("ongoing_release.reltrain")?;
  assert!(checkpoint.ends_with("RequestChangelogUpdate\n"), "{}", checkpoint);

  Ok(())
}

#[test]
fn test_v_prefixed_version_is_rejected_before_any_checkpoint() -> Result<()> {
  let repo = TestRepo::new("1.0-dev-01")?;

  let output = run_reltrain(&repo.path, &["run"], "v1.0.0\n")?;
  assert_eq!(output.status.code(), Some(3)); // validation failure
  assert!(stderr_of(&output).contains("v` prefix"), "{}", stderr_of(&output));
  assert!(!repo.checkpoint_path().exists());

  Ok(())
}

#[test]
fn test_existing_tag_rejects_the_version() -> Result<()> {
  let repo = TestRepo::new("1.0-dev-01")?;
  crate::helpers::git(&repo.path, &["tag", "v2.0.0"])?;

  let output = run_reltrain(&repo.path, &["run"], "2.0.0\n")?;
  assert_eq!(output.status.code(), Some(3));
  assert!(
    stderr_of(&output).contains("already exists"),
    "{}",
    stderr_of(&output)
  );

  Ok(())
}

#[test]
fn test_wrong_branch_refuses_to_start() -> Result<()> {
  let repo = TestRepo::new("1.0-dev-01")?;
  crate::helpers::git(&repo.path, &["checkout", "-b", "feature/shiny"])?;

  let output = run_reltrain(&repo.path, &["run"], "")?;
  assert_eq!(output.status.code(), Some(3));
  assert!(stderr_of(&output).contains("develop"), "{}", stderr_of(&output));

  Ok(())
}

#[test]
fn test_non_dev_version_in_file_refuses_to_start() -> Result<()> {
  let repo = TestRepo::new("1.0.0")?;

  let output = run_reltrain(&repo.path, &["run"], "")?;
  assert_eq!(output.status.code(), Some(3));
  assert!(stderr_of(&output).contains("-dev-"), "{}", stderr_of(&output));

  Ok(())
}

#[test]
fn test_stale_step_name_fails_loudly() -> Result<()> {
  let repo = TestRepo::new("1.0-dev-01")?;
  repo.write_checkpoint("1.0-dev-01", "1.0.0", "UploadToBintray")?;

  let output = run_reltrain(&repo.path, &["run"], "")?;
  assert!(!output.status.success());
  assert!(
    stderr_of(&output).contains("UploadToBintray"),
    "{}",
    stderr_of(&output)
  );

  Ok(())
}

#[test]
fn test_obsolete_upload_step_is_a_hard_stop() -> Result<()> {
  let repo = TestRepo::new("1.0-dev-01")?;
  repo.write_checkpoint("1.0-dev-01", "1.0.0", "CleanAndUpload")?;

  let output = run_reltrain(&repo.path, &["run"], "")?;
  assert!(!output.status.success());
  assert!(stderr_of(&output).contains("obsolete"), "{}", stderr_of(&output));

  // Checkpoint still parked on the placeholder step
  let checkpoint = repo.read_file("ongoing_release.reltrain")?;
  assert!(checkpoint.ends_with("CleanAndUpload\n"), "{}", checkpoint);

  Ok(())
}
