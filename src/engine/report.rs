// src/engine/report.rs

use std::fmt;
use std::io::Write;

use crate::errors::Result;

/// Outcome of one successful pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassReport {
    /// Git reported no changed files; nothing was touched.
    NoChanges,
    /// Only test entry files changed; every test entry was reverted.
    Reverted(Vec<String>),
    /// Affected projects were scoped to their changed specs.
    Updated(Vec<String>),
}

impl PassReport {
    /// Per-project report lines, success and failure alike.
    pub fn messages(&self) -> &[String] {
        match self {
            PassReport::NoChanges => &[],
            PassReport::Reverted(m) | PassReport::Updated(m) => m,
        }
    }

    /// Number of per-project lines that report a failure.
    pub fn failures(&self) -> usize {
        self.messages()
            .iter()
            .filter(|m| m.starts_with("FAILED"))
            .count()
    }
}

impl fmt::Display for PassReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PassReport::NoChanges => f.write_str("No file changes found"),
            PassReport::Updated(m) if m.is_empty() => {
                f.write_str("No project owns the changed files")
            }
            PassReport::Reverted(m) | PassReport::Updated(m) => f.write_str(&m.join("\n")),
        }
    }
}

/// Where pass outcomes go.
///
/// The binary prints to the console; tests collect outcomes instead.
pub trait Reporter: Send {
    fn report(&mut self, outcome: &Result<PassReport>);
}

/// Report to stdout, errors to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn print_report(report: &PassReport) {
        let mut out = std::io::stdout().lock();
        let _ = write!(out, "\n{report}\n\n");
        let _ = out.flush();
    }
}

impl Reporter for ConsoleReporter {
    fn report(&mut self, outcome: &Result<PassReport>) {
        match outcome {
            Ok(report) => Self::print_report(report),
            Err(err) => eprint!("\n specscope error: {err}\n\n"),
        }
    }
}
