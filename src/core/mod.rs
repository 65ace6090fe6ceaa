//! Core engine for the release workflow
//!
//! - **config**: reltrain.toml parsing with built-in defaults
//! - **error**: error taxonomy with exit codes and help messages
//! - **exec**: synchronous subprocess runner with quote-aware tokenizing
//! - **sequencer**: ordered step execution with persist-before-run
//! - **state**: checkpoint load/persist/clear and fresh initialization
//! - **steps**: the fixed 16-step release catalogue
//! - **version**: release version validation rules
//! - **versions_file**: properties-style version line read/rewrite
//! - **vcs**: git operations over system git

pub mod config;
pub mod error;
pub mod exec;
pub mod sequencer;
pub mod state;
pub mod steps;
pub mod version;
pub mod versions_file;
pub mod vcs;
