// src/rewrite/mod.rs

//! Test entry file rewriting.
//!
//! A test entry file builds its spec context with a call of the shape
//!
//! ```text
//! const context = require.context('./', true, /\.spec\.ts$/);
//! ```
//!
//! and only the trailing regex argument of that call is ever rewritten. The
//! rest of the file stays byte-for-byte the same.

use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use regex::{Captures, Regex};
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::errors::{Result, SpecscopeError};
use crate::fs::FileSystem;
use crate::scope::Pattern;

/// The `require.context('./', true, <pattern>);` call, on one line.
static CONTEXT_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(require\.context\('\./', true,).*(\);)").expect("static")
});

/// Replace the trailing argument of every live context call in `contents`.
///
/// A call sitting inside a `//` or block comment line is not a live call and
/// is left untouched. Fails with [`SpecscopeError::FormatMismatch`] when
/// `contents` has no live call. `pattern` is inserted literally.
pub fn replace_context_pattern(path: &Path, contents: &str, pattern: &Pattern) -> Result<String> {
    let mut live_calls = 0usize;
    let replaced = CONTEXT_CALL.replace_all(contents, |caps: &Captures| {
        let whole = &caps[0];
        let start = caps.get(0).map_or(0, |m| m.start());
        if is_commented_out(&contents[line_start(contents, start)..start]) {
            return whole.to_string();
        }
        live_calls += 1;
        format!("{} {}{}", &caps[1], pattern.as_str(), &caps[2])
    });

    if live_calls == 0 {
        return Err(SpecscopeError::FormatMismatch(path.to_path_buf()));
    }
    Ok(replaced.into_owned())
}

fn line_start(contents: &str, offset: usize) -> usize {
    contents[..offset].rfind('\n').map_or(0, |i| i + 1)
}

/// Whether the text before a match on its line puts the match in a comment.
fn is_commented_out(line_prefix: &str) -> bool {
    let trimmed = line_prefix.trim_start();
    trimmed.starts_with('*') || trimmed.starts_with("/*") || line_prefix.contains("//")
}

/// Read, patch and write back one test entry file.
///
/// Returns `true` if the file was written, `false` if it already held the
/// requested pattern.
pub fn rewrite_entry_file(fs: &dyn FileSystem, path: &Path, pattern: &Pattern) -> Result<bool> {
    if !fs.is_file(path) {
        return Err(SpecscopeError::EntryNotFound(path.to_path_buf()));
    }

    let contents = fs.read_to_string(path)?;
    let updated = replace_context_pattern(path, &contents, pattern)?;
    if updated == contents {
        debug!(?path, "test entry already scoped; skipping write");
        return Ok(false);
    }

    fs.write(path, updated.as_bytes())?;
    Ok(true)
}

/// Rewrites test entry files under a workspace root.
///
/// Failures never escape: each call returns a report line, so one broken
/// project cannot stop its siblings from being updated.
#[derive(Debug, Clone)]
pub struct EntryRewriter {
    fs: Arc<dyn FileSystem>,
    root: PathBuf,
    default_pattern: Pattern,
}

impl EntryRewriter {
    pub fn new(fs: Arc<dyn FileSystem>, root: impl Into<PathBuf>, settings: &Settings) -> Self {
        Self {
            fs,
            root: root.into(),
            default_pattern: Pattern::default_for(&settings.spec_suffix),
        }
    }

    /// Scope `test_entry` to `pattern`.
    pub async fn update(&self, test_entry: &str, pattern: &Pattern) -> String {
        match self.apply(test_entry, pattern.clone()).await {
            Ok(written) => {
                info!(test_entry, written, pattern = %pattern, "test entry scoped");
                format!("File updated: {test_entry}")
            }
            Err(err) => failure_line(test_entry, &err),
        }
    }

    /// Restore the catch-all spec pattern in `test_entry`.
    pub async fn revert(&self, test_entry: &str) -> String {
        match self.apply(test_entry, self.default_pattern.clone()).await {
            Ok(written) => {
                info!(test_entry, written, "test entry reverted");
                format!("File updated (undone): {test_entry}")
            }
            Err(err) => failure_line(test_entry, &err),
        }
    }

    async fn apply(&self, test_entry: &str, pattern: Pattern) -> Result<bool> {
        let fs = Arc::clone(&self.fs);
        let path = self.root.join(test_entry);
        tokio::task::spawn_blocking(move || rewrite_entry_file(fs.as_ref(), &path, &pattern))
            .await
            .map_err(|e| SpecscopeError::Other(e.into()))?
    }
}

fn failure_line(test_entry: &str, err: &SpecscopeError) -> String {
    warn!(test_entry, error = %err, "test entry update failed");
    format!("FAILED file update: {test_entry} {err}")
}
