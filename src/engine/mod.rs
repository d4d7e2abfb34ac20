// src/engine/mod.rs

//! Orchestration for `specscope`.
//!
//! - [`pipeline`] runs one pass: changed files -> spec files -> projects ->
//!   patterns -> test entry rewrites.
//! - [`coordinator`] repeats passes in watch mode, debouncing filesystem
//!   events and guaranteeing passes never overlap.
//! - [`report`] turns pass outcomes into console output.

/// Events flowing into the watch coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    /// Something under the workspace root changed.
    FileChanged {
        /// Workspace-relative path, forward slashes.
        path: String,
        /// The path was newly created.
        created: bool,
    },
    /// Graceful shutdown requested (e.g. Ctrl-C).
    ShutdownRequested,
}

/// Where the coordinator is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorState {
    /// Waiting for the first event after a pass.
    Idle,
    /// Coalescing events until the quiet window elapses.
    Debouncing,
    /// A pass is in flight.
    Running,
}

pub mod coordinator;
pub mod pipeline;
pub mod report;

pub use coordinator::WatchCoordinator;
pub use pipeline::Pipeline;
pub use report::{ConsoleReporter, PassReport, Reporter};
