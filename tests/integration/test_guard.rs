//! Manual-edit gating: the sequence must not advance past an edit request
//! the operator confirmed but never performed

use crate::helpers::{TestRepo, run_reltrain, stderr_of};
use anyhow::Result;

#[test]
fn test_unchanged_readme_halts_without_advancing() -> Result<()> {
  let repo = TestRepo::new("1.0-dev-01")?;
  repo.write_checkpoint("1.0-dev-01", "1.0.0", "RequestReadmeUpdate")?;

  // Operator claims "Done?" -> Y but edited nothing
  let output = run_reltrain(&repo.path, &["run"], "Y\n")?;
  assert_eq!(output.status.code(), Some(3));
  assert!(
    stderr_of(&output).contains("Expected changes"),
    "{}",
    stderr_of(&output)
  );

  let checkpoint = repo.read_file("ongoing_release.reltrain")?;
  assert!(checkpoint.ends_with("RequestReadmeUpdate\n"), "{}", checkpoint);

  Ok(())
}

#[test]
fn test_edited_readme_advances_to_the_changelog_step() -> Result<()> {
  let repo = TestRepo::new("1.0-dev-01")?;
  repo.write_checkpoint("1.0-dev-01", "1.0.0", "RequestReadmeUpdate")?;
  repo.write_file("README.md", "# test library\n\nCurrent version: 1.0.0\n")?;

  // README confirm passes the guard; decline the CHANGELOG confirm to stop
  let output = run_reltrain(&repo.path, &["run"], "Y\nn\n")?;
  assert_eq!(output.status.code(), Some(1)); // aborted at the next step

  let checkpoint = repo.read_file("ongoing_release.reltrain")?;
  assert!(checkpoint.ends_with("RequestChangelogUpdate\n"), "{}", checkpoint);

  Ok(())
}
