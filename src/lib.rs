// src/lib.rs

pub mod changes;
pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod fs;
pub mod logging;
pub mod rewrite;
pub mod scope;
pub mod watch;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::changes::GitChangeSource;
use crate::cli::CliArgs;
use crate::config::{Settings, WorkspaceCache};
use crate::engine::{ConsoleReporter, Pipeline, WatchCoordinator, WatchEvent};
use crate::fs::{FileSystem, RealFileSystem};
use crate::rewrite::EntryRewriter;
use crate::watch::IgnoreSet;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - git change source and the memoized workspace config
/// - the single-pass pipeline
/// - (optional) file watcher + debouncing coordinator
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let root = args.root_dir();
    let settings = Settings::from_env();
    debug!(?root, ?settings, watch = args.watch, "starting specscope");

    let pipeline = build_pipeline(&root, &settings);

    if !args.watch {
        let report = pipeline.run_pass().await?;
        ConsoleReporter::print_report(&report);
        return Ok(());
    }

    let (event_tx, event_rx) = mpsc::channel::<WatchEvent>(256);
    let _watcher_handle =
        crate::watch::spawn_watcher(&root, IgnoreSet::default_set()?, event_tx.clone())?;

    // Ctrl-C → graceful shutdown.
    {
        let tx = event_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(WatchEvent::ShutdownRequested).await;
        });
    }
    drop(event_tx);

    let coordinator =
        WatchCoordinator::new(pipeline, ConsoleReporter, settings.debounce, event_rx);
    let passes = coordinator.run().await;
    info!(passes, "specscope exiting");
    Ok(())
}

/// Production collaborators for a workspace rooted at `root`.
pub fn build_pipeline(root: &Path, settings: &Settings) -> Pipeline<GitChangeSource> {
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    let workspace = Arc::new(WorkspaceCache::new(Arc::clone(&fs), root, settings.clone()));
    let rewriter = EntryRewriter::new(fs, root, settings);
    let changes = GitChangeSource::new(root, &settings.source_suffix);
    Pipeline::new(changes, workspace, rewriter, settings.clone())
}
