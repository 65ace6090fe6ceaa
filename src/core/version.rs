//! Version string validation
//!
//! Rules are evaluated in a fixed order and the first failure wins, so an
//! input violating several rules reports the earliest one.

use crate::core::error::VersionError;

/// Marker flagging a version as a non-release development version
pub const DEV_MARKER: &str = "-dev-";

/// Marker flagging a version as a snapshot
pub const SNAPSHOT_MARKER: &str = "-SNAPSHOT";

/// Validate a proposed release version
///
/// `existing_tags` must be the version tags already in the repository
/// (see [`release_tags`]); the prefixed form of `input` must not be among
/// them.
pub fn validate(input: &str, existing_tags: &[String], tag_prefix: &str) -> Result<String, VersionError> {
  if input.is_empty() {
    return Err(VersionError::Empty);
  }
  if input.contains(' ') {
    return Err(VersionError::ContainsSpace);
  }
  if input.starts_with('v') {
    return Err(VersionError::VPrefix);
  }
  let first = input.chars().next().unwrap_or(' ');
  if !first.is_ascii_digit() {
    return Err(VersionError::MustStartWithDigit);
  }
  if let Some(bad) = input.chars().find(|c| !c.is_alphanumeric() && *c != '.' && *c != '-') {
    return Err(VersionError::InvalidCharacter(bad));
  }
  if input.contains(DEV_MARKER) {
    return Err(VersionError::DevNotAllowed);
  }
  if input.contains(SNAPSHOT_MARKER) {
    return Err(VersionError::SnapshotNotAllowed);
  }

  let tag = format!("{}{}", tag_prefix, input);
  if existing_tags.iter().any(|existing| *existing == tag) {
    return Err(VersionError::AlreadyExists(tag));
  }

  Ok(input.to_string())
}

/// Filter raw `git tag` output down to version tags, sorted
///
/// Only tags starting with the prefix followed by a digit count; this
/// excludes non-version tags that happen to share the prefix letter
/// (e.g. `very-old-experiment`).
pub fn release_tags(tags: &[String], tag_prefix: &str) -> Vec<String> {
  let mut versions: Vec<String> = tags
    .iter()
    .filter(|tag| {
      tag
        .strip_prefix(tag_prefix)
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_digit())
    })
    .cloned()
    .collect();
  versions.sort();
  versions
}
