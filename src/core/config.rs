//! reltrain configuration (reltrain.toml) parsing
//!
//! The config file is optional: every field has a default matching the
//! workflow this tool was built for, so a bare repository needs no setup.

use crate::core::error::{ReleaseResult, ResultExt};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the optional config file, looked up in the working directory
pub const CONFIG_FILE: &str = "reltrain.toml";

/// Configuration for reltrain
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
  #[serde(default)]
  pub paths: PathsConfig,
  #[serde(default)]
  pub git: GitConfig,
  #[serde(default)]
  pub versions: VersionsConfig,
}

/// Files reltrain reads and writes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
  /// Properties-style file holding the library version line
  #[serde(default = "default_versions_file")]
  pub versions_file: PathBuf,

  /// Checkpoint recording release progress for resume
  #[serde(default = "default_checkpoint_file")]
  pub checkpoint_file: PathBuf,
}

/// Branch, remote and tag conventions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitConfig {
  /// Branch releases start from
  #[serde(default = "default_dev_branch")]
  pub dev_branch: String,

  /// Branch the release PR merges into
  #[serde(default = "default_main_branch")]
  pub main_branch: String,

  /// Remote pushed to
  #[serde(default = "default_remote")]
  pub remote: String,

  /// Prefix prepended to the version when tagging
  #[serde(default = "default_tag_prefix")]
  pub tag_prefix: String,
}

/// Versions file conventions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionsConfig {
  /// Key whose line holds the current version (`<key>=<version>`)
  #[serde(default = "default_version_key")]
  pub key: String,
}

fn default_versions_file() -> PathBuf {
  PathBuf::from("libraries_version.properties")
}

fn default_checkpoint_file() -> PathBuf {
  PathBuf::from("ongoing_release.reltrain")
}

fn default_dev_branch() -> String {
  "develop".to_string()
}

fn default_main_branch() -> String {
  "master".to_string()
}

fn default_remote() -> String {
  "origin".to_string()
}

fn default_tag_prefix() -> String {
  "v".to_string()
}

fn default_version_key() -> String {
  "splitties.version".to_string()
}

impl Default for PathsConfig {
  fn default() -> Self {
    Self {
      versions_file: default_versions_file(),
      checkpoint_file: default_checkpoint_file(),
    }
  }
}

impl Default for GitConfig {
  fn default() -> Self {
    Self {
      dev_branch: default_dev_branch(),
      main_branch: default_main_branch(),
      remote: default_remote(),
      tag_prefix: default_tag_prefix(),
    }
  }
}

impl Default for VersionsConfig {
  fn default() -> Self {
    Self {
      key: default_version_key(),
    }
  }
}

impl Config {
  /// Load reltrain.toml from `dir`, falling back to defaults when absent
  pub fn load(dir: &Path) -> ReleaseResult<Self> {
    let path = dir.join(CONFIG_FILE);
    if !path.exists() {
      return Ok(Config::default());
    }

    let content = fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
    let config: Config =
      toml_edit::de::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(config)
  }

  /// Absolute path of the versions file under `dir`
  pub fn versions_file(&self, dir: &Path) -> PathBuf {
    dir.join(&self.paths.versions_file)
  }

  /// Absolute path of the checkpoint file under `dir`
  pub fn checkpoint_file(&self, dir: &Path) -> PathBuf {
    dir.join(&self.paths.checkpoint_file)
  }
}
