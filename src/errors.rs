// src/errors.rs

//! Crate-wide error type and result alias.
//!
//! Change-source and configuration errors are fatal to a pass. Entry errors
//! are local to one project and end up as `FAILED file update:` report lines.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpecscopeError {
    #[error("Git was not found: {0}")]
    ToolNotFound(String),

    #[error("Git ls-files failed\n\n{0}")]
    CommandFailed(String),

    #[error("can't find file {0}")]
    ConfigNotFound(PathBuf),

    #[error("workspace config is not valid JSON {path}: {source}")]
    ConfigParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("can't find file {0}")]
    EntryNotFound(PathBuf),

    #[error("file is in unexpected format {0}")]
    FormatMismatch(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, SpecscopeError>;
