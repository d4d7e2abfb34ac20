// src/config/mod.rs

//! Workspace configuration and tool settings.
//!
//! Responsibilities:
//! - Model the parts of `angular.json` that locate test entry files (`model.rs`).
//! - Load the file from disk with typed errors (`loader.rs`).
//! - Memoize it across watch passes with explicit invalidation (`cache.rs`).
//! - Hold the tool's own constants and env overrides (`settings.rs`).

pub mod cache;
pub mod loader;
pub mod model;
pub mod settings;

pub use cache::WorkspaceCache;
pub use loader::{load_workspace_config, workspace_config_path};
pub use model::{ProjectConfig, WorkspaceConfig};
pub use settings::Settings;
