//! The release step catalogue
//!
//! Declaration order is execution order and must be kept right: the
//! sequencer walks the catalogue from the resume point to the end, and the
//! checkpoint file stores the exact variant name of the next step to run.

use crate::core::error::{ReleaseError, ReleaseResult};
use std::fmt;

/// One named unit of the release workflow, executed at most once per
/// successful run, in fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReleaseStep {
  BumpVersion,
  RequestReadmeUpdate,
  RequestChangelogUpdate,
  CommitAndTag,
  /// Obsolete upload step, kept as a hard-stop placeholder
  CleanAndUpload,
  PushRelease,
  RequestPrSubmission,
  RequestPackagePublish,
  PushTags,
  RequestPrMerge,
  RequestGithubRelease,
  UpdateMasterBranch,
  UpdateDevelopBranch,
  RevertToDevVersion,
  CommitNextDevVersion,
  PushAtLast,
}

impl ReleaseStep {
  /// All steps, in execution order
  pub const ALL: [ReleaseStep; 16] = [
    ReleaseStep::BumpVersion,
    ReleaseStep::RequestReadmeUpdate,
    ReleaseStep::RequestChangelogUpdate,
    ReleaseStep::CommitAndTag,
    ReleaseStep::CleanAndUpload,
    ReleaseStep::PushRelease,
    ReleaseStep::RequestPrSubmission,
    ReleaseStep::RequestPackagePublish,
    ReleaseStep::PushTags,
    ReleaseStep::RequestPrMerge,
    ReleaseStep::RequestGithubRelease,
    ReleaseStep::UpdateMasterBranch,
    ReleaseStep::UpdateDevelopBranch,
    ReleaseStep::RevertToDevVersion,
    ReleaseStep::CommitNextDevVersion,
    ReleaseStep::PushAtLast,
  ];

  /// The step a fresh release starts at
  pub fn first() -> ReleaseStep {
    ReleaseStep::BumpVersion
  }

  /// Position in the execution sequence (0-based)
  pub fn ordinal(self) -> usize {
    self as usize
  }

  /// Steps from this one through the terminal step, inclusive
  pub fn remaining(self) -> &'static [ReleaseStep] {
    &Self::ALL[self.ordinal()..]
  }

  /// Exact enumerant spelling, used in the checkpoint file
  pub fn name(self) -> &'static str {
    match self {
      ReleaseStep::BumpVersion => "BumpVersion",
      ReleaseStep::RequestReadmeUpdate => "RequestReadmeUpdate",
      ReleaseStep::RequestChangelogUpdate => "RequestChangelogUpdate",
      ReleaseStep::CommitAndTag => "CommitAndTag",
      ReleaseStep::CleanAndUpload => "CleanAndUpload",
      ReleaseStep::PushRelease => "PushRelease",
      ReleaseStep::RequestPrSubmission => "RequestPrSubmission",
      ReleaseStep::RequestPackagePublish => "RequestPackagePublish",
      ReleaseStep::PushTags => "PushTags",
      ReleaseStep::RequestPrMerge => "RequestPrMerge",
      ReleaseStep::RequestGithubRelease => "RequestGithubRelease",
      ReleaseStep::UpdateMasterBranch => "UpdateMasterBranch",
      ReleaseStep::UpdateDevelopBranch => "UpdateDevelopBranch",
      ReleaseStep::RevertToDevVersion => "RevertToDevVersion",
      ReleaseStep::CommitNextDevVersion => "CommitNextDevVersion",
      ReleaseStep::PushAtLast => "PushAtLast",
    }
  }

  /// Parse a persisted step name
  ///
  /// Fails loudly rather than silently defaulting when the persisted name
  /// no longer exists in the catalogue.
  pub fn from_name(name: &str) -> ReleaseResult<ReleaseStep> {
    Self::ALL
      .iter()
      .copied()
      .find(|step| step.name() == name)
      .ok_or_else(|| ReleaseError::UnknownStepName { name: name.to_string() })
  }

  /// Short human-readable label for status output
  pub fn describe(self) -> &'static str {
    match self {
      ReleaseStep::BumpVersion => "Change the library version",
      ReleaseStep::RequestReadmeUpdate => "Request README update confirmation",
      ReleaseStep::RequestChangelogUpdate => "Request CHANGELOG update confirmation",
      ReleaseStep::CommitAndTag => "Commit \"prepare for release\" and tag",
      ReleaseStep::CleanAndUpload => "Clean and upload (obsolete)",
      ReleaseStep::PushRelease => "Push release to origin",
      ReleaseStep::RequestPrSubmission => "Request PR submission",
      ReleaseStep::RequestPackagePublish => "Request package publish",
      ReleaseStep::PushTags => "Push tags to origin",
      ReleaseStep::RequestPrMerge => "Request PR merge",
      ReleaseStep::RequestGithubRelease => "Request GitHub release publication",
      ReleaseStep::UpdateMasterBranch => "Update master branch",
      ReleaseStep::UpdateDevelopBranch => "Update develop branch from master",
      ReleaseStep::RevertToDevVersion => "Change the library version back to a dev version",
      ReleaseStep::CommitNextDevVersion => "Commit \"prepare next dev version\"",
      ReleaseStep::PushAtLast => "Push, at last",
    }
  }
}

impl fmt::Display for ReleaseStep {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.name())
  }
}
