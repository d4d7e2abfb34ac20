// src/config/cache.rs

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::config::loader::load_workspace_config;
use crate::config::model::WorkspaceConfig;
use crate::config::settings::Settings;
use crate::errors::{Result, SpecscopeError};
use crate::fs::FileSystem;

/// Memoized workspace configuration.
///
/// The first [`get`](Self::get) loads `angular.json`; later calls hand out the
/// same snapshot until [`invalidate`](Self::invalidate) drops it. Snapshots are
/// never mutated, only replaced, so a pass holding one keeps a consistent view.
#[derive(Debug)]
pub struct WorkspaceCache {
    fs: Arc<dyn FileSystem>,
    root: PathBuf,
    settings: Settings,
    snapshot: Mutex<Option<Arc<WorkspaceConfig>>>,
}

impl WorkspaceCache {
    pub fn new(fs: Arc<dyn FileSystem>, root: impl Into<PathBuf>, settings: Settings) -> Self {
        Self {
            fs,
            root: root.into(),
            settings,
            snapshot: Mutex::new(None),
        }
    }

    /// Return the cached config, loading it on first use.
    pub async fn get(&self) -> Result<Arc<WorkspaceConfig>> {
        if let Some(cfg) = self.cached() {
            return Ok(cfg);
        }

        debug!(root = ?self.root, "cache miss: loading workspace config");
        let fs = Arc::clone(&self.fs);
        let root = self.root.clone();
        let settings = self.settings.clone();
        let loaded = tokio::task::spawn_blocking(move || {
            load_workspace_config(fs.as_ref(), &root, &settings)
        })
        .await
        .map_err(|e| SpecscopeError::Other(e.into()))??;

        let loaded = Arc::new(loaded);
        *self.lock() = Some(Arc::clone(&loaded));
        Ok(loaded)
    }

    /// Drop the cached snapshot so the next `get` reloads from disk.
    pub fn invalidate(&self) {
        if self.lock().take().is_some() {
            debug!("invalidated cached workspace config");
        }
    }

    pub fn is_cached(&self) -> bool {
        self.lock().is_some()
    }

    fn cached(&self) -> Option<Arc<WorkspaceConfig>> {
        self.lock().as_ref().map(Arc::clone)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Arc<WorkspaceConfig>>> {
        self.snapshot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
