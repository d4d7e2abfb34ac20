// src/changes/mod.rs

//! Pluggable source of changed files.
//!
//! The pipeline talks to a `ChangeSource` instead of running git directly, so
//! tests can script the changed-file list without a repository.

pub mod git;

use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;

pub use git::GitChangeSource;

/// Trait abstracting how changed files are discovered.
pub trait ChangeSource: Send + Sync {
    /// Workspace-relative paths of modified and untracked files, deleted
    /// files excluded.
    fn changed_files(&self) -> Pin<Box<dyn Future<Output = Result<Vec<String>>> + Send + '_>>;
}
