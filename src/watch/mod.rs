// src/watch/mod.rs

//! File watching.
//!
//! This module is responsible for:
//! - Wiring up a cross-platform filesystem watcher (`notify`).
//! - Dropping churn from directories that never affect spec selection.
//! - Forwarding the rest as [`WatchEvent`](crate::engine::WatchEvent)s.
//!
//! It does **not** debounce or run passes; that is the coordinator's job.

pub mod path_utils;
pub mod patterns;
pub mod watcher;

pub use patterns::{IgnoreSet, DEFAULT_IGNORED_DIRS};
pub use watcher::{spawn_watcher, translate_event, WatcherHandle};
