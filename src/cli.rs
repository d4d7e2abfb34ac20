// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::Parser;

/// Command-line arguments for `specscope`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "specscope",
    version,
    about = "Scope a workspace's test entry files to the specs of changed sources.",
    long_about = None
)]
pub struct CliArgs {
    /// Workspace root containing `angular.json`.
    ///
    /// Default: the current working directory.
    #[arg(value_name = "ROOT")]
    pub root: Option<PathBuf>,

    /// Keep running and re-scope test entry files whenever files change.
    #[arg(short, long)]
    pub watch: bool,
}

impl CliArgs {
    /// Resolve the workspace root, falling back to the current directory.
    pub fn root_dir(&self) -> PathBuf {
        match &self.root {
            Some(root) => root.clone(),
            None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
