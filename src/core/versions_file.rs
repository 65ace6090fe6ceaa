//! Properties-style versions file handling
//!
//! The file must contain exactly one line beginning with the configured
//! key; zero or multiple matches fail with `VersionLineNotFound`.

use crate::core::error::{ReleaseError, ReleaseResult, ResultExt};
use std::fs;
use std::path::Path;

/// Read the current version from the versions file
pub fn read_version(path: &Path, key: &str) -> ReleaseResult<String> {
  let prefix = line_prefix(key);
  let content =
    fs::read_to_string(path).with_context(|| format!("Failed to read versions file {}", path.display()))?;

  let matches: Vec<&str> = content.lines().filter(|line| line.starts_with(&prefix)).collect();
  match matches.as_slice() {
    [line] => Ok(line[prefix.len()..].to_string()),
    found => Err(ReleaseError::VersionLineNotFound {
      path: path.to_path_buf(),
      matches: found.len(),
    }),
  }
}

/// Rewrite the single version line in place, leaving every other line as is
pub fn set_version(path: &Path, key: &str, new_version: &str) -> ReleaseResult<()> {
  let prefix = line_prefix(key);
  let content =
    fs::read_to_string(path).with_context(|| format!("Failed to read versions file {}", path.display()))?;

  let matches = content.lines().filter(|line| line.starts_with(&prefix)).count();
  if matches != 1 {
    return Err(ReleaseError::VersionLineNotFound {
      path: path.to_path_buf(),
      matches,
    });
  }

  let mut rewritten: Vec<String> = content
    .lines()
    .map(|line| {
      if line.starts_with(&prefix) {
        format!("{}{}", prefix, new_version)
      } else {
        line.to_string()
      }
    })
    .collect();
  rewritten.push(String::new()); // trailing newline

  fs::write(path, rewritten.join("\n"))
    .with_context(|| format!("Failed to write versions file {}", path.display()))?;
  Ok(())
}

fn line_prefix(key: &str) -> String {
  format!("{}=", key)
}
