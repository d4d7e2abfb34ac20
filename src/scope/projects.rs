// src/scope/projects.rs

use std::path::Path;

use tracing::debug;

/// A project that has spec files to run in the current pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// Workspace-relative path of the project's test entry file.
    pub test_entry: String,
    /// Spec files assigned to this project, in assignment order.
    pub spec_files: Vec<String>,
}

impl Project {
    pub fn new(test_entry: impl Into<String>) -> Self {
        Self {
            test_entry: test_entry.into(),
            spec_files: Vec::new(),
        }
    }

    /// Whether `spec_file` lives under this project's test entry directory.
    pub fn owns(&self, spec_file: &str) -> bool {
        let project_dir = parent_dir(&self.test_entry);
        parent_dir(spec_file).starts_with(project_dir)
    }
}

fn parent_dir(path: &str) -> &Path {
    Path::new(path).parent().unwrap_or(Path::new(""))
}

/// Group spec files under the project that owns them.
///
/// Each spec file goes to the **first** project, in `test_entries` order,
/// whose test entry directory is a path prefix of the spec file's directory.
/// There is no longest-prefix resolution: with nested projects the outer one
/// wins if it is listed first. Unowned spec files are dropped, and projects
/// that end up with no spec files are not returned.
pub fn assign_projects<E, S>(test_entries: &[E], spec_files: &[S]) -> Vec<Project>
where
    E: AsRef<str>,
    S: AsRef<str>,
{
    let mut projects: Vec<Project> = test_entries
        .iter()
        .map(|entry| Project::new(entry.as_ref()))
        .collect();

    for spec in spec_files {
        let spec = spec.as_ref();
        match projects.iter_mut().find(|p| p.owns(spec)) {
            Some(project) => project.spec_files.push(spec.to_string()),
            None => debug!(spec, "spec file belongs to no project; dropping"),
        }
    }

    projects.retain(|p| !p.spec_files.is_empty());
    projects
}
