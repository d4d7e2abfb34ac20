// src/changes/git.rs

use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use super::ChangeSource;
use crate::errors::{Result, SpecscopeError};

/// Lists changed files with `git ls-files`.
///
/// Runs `git -C <root> ls-files -z -m -o --exclude-standard -- *<suffix>`:
/// tracked files with modifications plus untracked files, honouring ignore
/// rules. `-z` keeps paths unquoted, so non-ASCII names come through as is.
/// Paths that no longer exist on disk (deletions) are dropped.
#[derive(Debug, Clone)]
pub struct GitChangeSource {
    root: PathBuf,
    pathspec: String,
}

impl GitChangeSource {
    pub fn new(root: impl Into<PathBuf>, source_suffix: &str) -> Self {
        Self {
            root: root.into(),
            pathspec: format!("*{source_suffix}"),
        }
    }

    async fn list(&self) -> Result<Vec<String>> {
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.root)
            .args(["ls-files", "-z", "-m", "-o", "--exclude-standard", "--"])
            .arg(&self.pathspec)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|err| match err.kind() {
                ErrorKind::NotFound => SpecscopeError::ToolNotFound(err.to_string()),
                _ => SpecscopeError::Io(err),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(SpecscopeError::CommandFailed(stderr));
        }

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let root = self.root.clone();
        let files = tokio::task::spawn_blocking(move || parse_ls_files(&stdout, &root))
            .await
            .map_err(|e| SpecscopeError::Other(e.into()))?;
        debug!(root = ?self.root, count = files.len(), "git reported changed files");
        Ok(files)
    }
}

impl ChangeSource for GitChangeSource {
    fn changed_files(&self) -> Pin<Box<dyn Future<Output = Result<Vec<String>>> + Send + '_>> {
        Box::pin(self.list())
    }
}

/// NUL-separated paths; empty entries and paths missing under `root` are
/// skipped.
fn parse_ls_files(stdout: &str, root: &Path) -> Vec<String> {
    let mut files: Vec<String> = Vec::new();
    for line in stdout.split('\0').filter(|l| !l.is_empty()) {
        // `-m` also lists deleted tracked files.
        if !root.join(line).exists() {
            debug!(path = line, "skipping deleted file");
            continue;
        }
        // A file can be reported once per flag.
        if !files.iter().any(|f| f == line) {
            files.push(line.to_string());
        }
    }
    files
}
