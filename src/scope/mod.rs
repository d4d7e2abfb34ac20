// src/scope/mod.rs

//! Pure change-to-scope transforms.
//!
//! Nothing in here touches the filesystem or spawns processes:
//! - `spec_files`: changed source paths -> deduplicated spec paths.
//! - `projects`: spec paths -> per-project buckets (first match wins).
//! - `pattern`: spec paths -> escaped regex literal for a test entry file.

pub mod pattern;
pub mod projects;
pub mod spec_files;

pub use pattern::{escape_file_name, Pattern};
pub use projects::{assign_projects, Project};
pub use spec_files::{convert_to_spec_files, to_spec_path};
