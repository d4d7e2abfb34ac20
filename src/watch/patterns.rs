// src/watch/patterns.rs

use std::fmt;

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};

/// Directories whose churn never affects which specs should run.
pub const DEFAULT_IGNORED_DIRS: &[&str] = &[".git", "node_modules", "dist", ".angular"];

/// Compiled set of workspace-relative paths the watcher drops.
#[derive(Clone)]
pub struct IgnoreSet {
    patterns: Vec<String>,
    set: GlobSet,
}

impl fmt::Debug for IgnoreSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IgnoreSet")
            .field("patterns", &self.patterns)
            .finish()
    }
}

impl IgnoreSet {
    /// Ignore each directory in `dirs` (at any depth) and everything below it.
    pub fn for_dirs(dirs: &[&str]) -> Result<Self> {
        let patterns: Vec<String> = dirs
            .iter()
            .flat_map(|dir| [format!("**/{dir}"), format!("**/{dir}/**")])
            .collect();
        let set = build_globset(&patterns)?;
        Ok(Self { patterns, set })
    }

    pub fn default_set() -> Result<Self> {
        Self::for_dirs(DEFAULT_IGNORED_DIRS)
    }

    /// `rel_path` is relative to the watch root, with forward slashes.
    pub fn is_ignored(&self, rel_path: &str) -> bool {
        rel_path.is_empty() || self.set.is_match(rel_path)
    }
}

/// Build a GlobSet from simple string patterns.
fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let glob = Glob::new(pat).with_context(|| format!("invalid glob pattern: {pat}"))?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}
