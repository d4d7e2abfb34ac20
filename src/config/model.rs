// src/config/model.rs

use indexmap::IndexMap;
use serde::Deserialize;

/// Workspace configuration as read from `angular.json`.
///
/// Only the parts needed to locate each project's test entry file are
/// modelled; everything else in the file is ignored:
///
/// ```json
/// {
///   "projects": {
///     "app": {
///       "architect": {
///         "test": { "options": { "main": "apps/app/src/test.ts" } }
///       }
///     }
///   }
/// }
/// ```
///
/// `projects` keeps the file's insertion order, which decides project
/// assignment when project directories nest.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkspaceConfig {
    #[serde(default)]
    pub projects: IndexMap<String, Option<ProjectConfig>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub architect: Option<ArchitectConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArchitectConfig {
    #[serde(default)]
    pub test: Option<TargetConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TargetConfig {
    #[serde(default)]
    pub options: Option<TestOptions>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TestOptions {
    /// Workspace-relative path of the project's test entry file.
    #[serde(default)]
    pub main: Option<String>,
}

impl ProjectConfig {
    /// `architect.test.options.main`, if the project defines it.
    pub fn test_entry(&self) -> Option<&str> {
        self.architect
            .as_ref()?
            .test
            .as_ref()?
            .options
            .as_ref()?
            .main
            .as_deref()
    }
}

impl WorkspaceConfig {
    /// Test entry paths of every project that declares one, in project order.
    pub fn test_entry_files(&self) -> Vec<String> {
        self.projects
            .values()
            .filter_map(|project| project.as_ref()?.test_entry())
            .map(str::to_string)
            .collect()
    }
}
