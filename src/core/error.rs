//! Error types for reltrain with contextual messages and exit codes
//!
//! Every failure surfaces to the top level and terminates the process;
//! nothing is retried automatically. The checkpoint persisted before the
//! failing step lets a corrected re-invocation resume at that exact step.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for reltrain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (aborted confirmation, bad checkpoint, invalid args)
  User = 1,
  /// System error (subprocess, I/O)
  System = 2,
  /// Validation failure (branch, version rules, unchanged files)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for reltrain
#[derive(Debug)]
pub enum ReleaseError {
  /// Not on the branch a release must start from
  WrongBranch { current: String, expected: String },

  /// Versions file has zero or multiple lines with the version key
  VersionLineNotFound { path: PathBuf, matches: usize },

  /// Version read from the versions file carries no dev marker
  NotADevVersion { version: String, path: PathBuf },

  /// Proposed version string violated a validation rule
  Version(VersionError),

  /// External command errors
  Process(ProcessError),

  /// A file the operator was asked to edit shows no diff against HEAD
  NoChangesDetected { path: PathBuf },

  /// Operator declined a Y/n confirmation
  UserAborted,

  /// Persisted step name no longer exists in the step catalogue
  UnknownStepName { name: String },

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional help
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl ReleaseError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    ReleaseError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    ReleaseError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      ReleaseError::Message { message, context, help } => ReleaseError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      other => ReleaseError::Message {
        message: other.to_string(),
        context: Some(ctx_str),
        help: other.help_message(),
      },
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      ReleaseError::UserAborted => ExitCode::User,
      ReleaseError::UnknownStepName { .. } => ExitCode::User,
      ReleaseError::Message { .. } => ExitCode::User,
      ReleaseError::Process(_) => ExitCode::System,
      ReleaseError::Io(_) => ExitCode::System,
      ReleaseError::WrongBranch { .. } => ExitCode::Validation,
      ReleaseError::VersionLineNotFound { .. } => ExitCode::Validation,
      ReleaseError::NotADevVersion { .. } => ExitCode::Validation,
      ReleaseError::Version(_) => ExitCode::Validation,
      ReleaseError::NoChangesDetected { .. } => ExitCode::Validation,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      ReleaseError::WrongBranch { expected, .. } => {
        Some(format!("Run `git checkout {}` first, then start again.", expected))
      }
      ReleaseError::NoChangesDetected { path } => Some(format!(
        "Make the requested edit to {}, then run `reltrain run` to resume at this step.",
        path.display()
      )),
      ReleaseError::UserAborted => {
        Some("Progress is saved. Run `reltrain run` to resume from this step.".to_string())
      }
      ReleaseError::UnknownStepName { .. } => Some(
        "The checkpoint was written by an incompatible version of reltrain. \
         Fix the step name on line 3, or run `reltrain abort` to start over."
          .to_string(),
      ),
      ReleaseError::Version(e) => e.help_message(),
      ReleaseError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for ReleaseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ReleaseError::WrongBranch { current, expected } => {
        write!(f, "On branch `{}` but releases start from `{}`", current, expected)
      }
      ReleaseError::VersionLineNotFound { path, matches } => {
        if *matches == 0 {
          write!(f, "Library version line not found in {}", path.display())
        } else {
          write!(
            f,
            "Expected exactly one version line in {} but found {}",
            path.display(),
            matches
          )
        }
      }
      ReleaseError::NotADevVersion { version, path } => {
        write!(
          f,
          "Version `{}` in {} should be a `-dev-` version",
          version,
          path.display()
        )
      }
      ReleaseError::Version(e) => write!(f, "{}", e),
      ReleaseError::Process(e) => write!(f, "{}", e),
      ReleaseError::NoChangesDetected { path } => {
        write!(f, "Expected changes in the following file: {}", path.display())
      }
      ReleaseError::UserAborted => write!(f, "Process aborted by operator"),
      ReleaseError::UnknownStepName { name } => {
        write!(f, "Unknown release step name in checkpoint: `{}`", name)
      }
      ReleaseError::Io(e) => write!(f, "I/O error: {}", e),
      ReleaseError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for ReleaseError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ReleaseError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for ReleaseError {
  fn from(err: io::Error) -> Self {
    ReleaseError::Io(err)
  }
}

impl From<VersionError> for ReleaseError {
  fn from(err: VersionError) -> Self {
    ReleaseError::Version(err)
  }
}

impl From<ProcessError> for ReleaseError {
  fn from(err: ProcessError) -> Self {
    ReleaseError::Process(err)
  }
}

impl From<toml_edit::de::Error> for ReleaseError {
  fn from(err: toml_edit::de::Error) -> Self {
    ReleaseError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<serde_json::Error> for ReleaseError {
  fn from(err: serde_json::Error) -> Self {
    ReleaseError::message(format!("JSON error: {}", err))
  }
}

/// Version validation errors, evaluated in rule order (first failure wins)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
  /// No version entered
  Empty,

  /// Versions can't contain spaces
  ContainsSpace,

  /// `v` prefix belongs to the tag, not the version
  VPrefix,

  /// First character must be a digit
  MustStartWithDigit,

  /// Character outside {alphanumeric, `.`, `-`}
  InvalidCharacter(char),

  /// Dev versions are not release targets
  DevNotAllowed,

  /// Snapshot versions are not release targets
  SnapshotNotAllowed,

  /// Tag for this version already exists
  AlreadyExists(String),
}

impl VersionError {
  fn help_message(&self) -> Option<String> {
    match self {
      VersionError::VPrefix => Some("Enter the version without the `v`; the tag prefix is added automatically.".to_string()),
      VersionError::AlreadyExists(tag) => Some(format!(
        "Tag `{}` is already in this repository. Pick a version with no existing tag (see `git tag`).",
        tag
      )),
      _ => None,
    }
  }
}

impl fmt::Display for VersionError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      VersionError::Empty => write!(f, "No version entered"),
      VersionError::ContainsSpace => write!(f, "Versions can't contain spaces"),
      VersionError::VPrefix => write!(f, "Please don't include the `v` prefix"),
      VersionError::MustStartWithDigit => write!(f, "Versions should start with a digit"),
      VersionError::InvalidCharacter(c) => {
        write!(f, "Only digits, letters, dots and dashes are allowed (found `{}`)", c)
      }
      VersionError::DevNotAllowed => write!(f, "Dev versions are not allowed as release targets"),
      VersionError::SnapshotNotAllowed => write!(f, "Snapshot versions are not allowed as release targets"),
      VersionError::AlreadyExists(tag) => write!(f, "This version already exists (tag `{}`)", tag),
    }
  }
}

/// External command errors
#[derive(Debug)]
pub enum ProcessError {
  /// Command exited with a non-zero code
  CommandFailed {
    command: String,
    exit_code: i32,
    stderr: String,
  },

  /// Command exceeded the execution time bound
  TimedOut { command: String, minutes: u64 },
}

impl fmt::Display for ProcessError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ProcessError::CommandFailed {
        command,
        exit_code,
        stderr,
      } => {
        write!(f, "Command failed with exit code {}: {}", exit_code, command)?;
        if !stderr.is_empty() {
          write!(f, "\n{}", stderr.trim_end())?;
        }
        Ok(())
      }
      ProcessError::TimedOut { command, minutes } => {
        write!(f, "Command timed out after {} minutes: {}", minutes, command)
      }
    }
  }
}

/// Result type alias for reltrain
pub type ReleaseResult<T> = Result<T, ReleaseError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> ReleaseResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<ReleaseError>,
{
  fn context(self, ctx: impl Into<String>) -> ReleaseResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &ReleaseError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
