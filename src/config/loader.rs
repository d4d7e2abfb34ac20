// src/config/loader.rs

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::WorkspaceConfig;
use crate::config::settings::Settings;
use crate::errors::{Result, SpecscopeError};
use crate::fs::FileSystem;

/// Path of the workspace configuration file under `root`.
pub fn workspace_config_path(root: &Path, settings: &Settings) -> PathBuf {
    root.join(&settings.config_file_name)
}

/// Load and parse the workspace configuration found under `root`.
///
/// - missing file -> [`SpecscopeError::ConfigNotFound`]
/// - invalid JSON -> [`SpecscopeError::ConfigParseError`]
pub fn load_workspace_config(
    fs: &dyn FileSystem,
    root: &Path,
    settings: &Settings,
) -> Result<WorkspaceConfig> {
    let path = workspace_config_path(root, settings);
    if !fs.is_file(&path) {
        return Err(SpecscopeError::ConfigNotFound(path));
    }

    let contents = fs.read_to_string(&path)?;
    let config: WorkspaceConfig = serde_json::from_str(&contents)
        .map_err(|source| SpecscopeError::ConfigParseError {
            path: path.clone(),
            source,
        })?;

    debug!(path = ?path, projects = config.projects.len(), "loaded workspace config");
    Ok(config)
}
