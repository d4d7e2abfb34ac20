#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use serde_json::{json, Value};
use specscope::config::{Settings, WorkspaceCache};
use specscope::engine::Pipeline;
use specscope::fs::mock::MockFileSystem;
use specscope::rewrite::EntryRewriter;

use crate::fake_change_source::FakeChangeSource;

/// A test entry file in the stock Angular CLI layout, scoped to every spec.
pub const DEFAULT_TEST_ENTRY: &str = "\
import 'zone.js/testing';
import { getTestBed } from '@angular/core/testing';

declare const require: {
  context(path: string, deep?: boolean, filter?: RegExp): {
    <T>(id: string): T;
    keys(): string[];
  };
};

// Then we find all the tests.
const context = require.context('./', true, /\\.spec\\.ts$/);
// And load the modules.
context.keys().map(context);
";

/// Builder for `angular.json` contents.
///
/// Projects are rendered in the order they were added.
pub struct WorkspaceConfigBuilder {
    projects: Vec<(String, Value)>,
}

impl WorkspaceConfigBuilder {
    pub fn new() -> Self {
        Self {
            projects: Vec::new(),
        }
    }

    /// Add a project whose test target uses `test_entry` as `main`.
    pub fn with_project(mut self, name: &str, test_entry: &str) -> Self {
        self.projects.push((
            name.to_string(),
            json!({
                "projectType": "application",
                "architect": {
                    "build": { "options": { "main": "src/main.ts" } },
                    "test": { "options": { "main": test_entry, "karmaConfig": "karma.conf.js" } }
                }
            }),
        ));
        self
    }

    /// Add a project with no test target.
    pub fn with_untested_project(mut self, name: &str) -> Self {
        self.projects.push((
            name.to_string(),
            json!({ "projectType": "library", "architect": { "build": {} } }),
        ));
        self
    }

    /// Render `angular.json`, keeping project order.
    pub fn to_json(&self) -> String {
        let projects = self
            .projects
            .iter()
            .map(|(name, project)| format!("    {}: {}", Value::from(name.as_str()), project))
            .collect::<Vec<_>>()
            .join(",\n");
        format!(
            "{{\n  \"$schema\": \"./node_modules/@angular/cli/lib/config/schema.json\",\n  \"version\": 1,\n  \"projects\": {{\n{projects}\n  }}\n}}\n"
        )
    }

    /// Write `angular.json` plus a default test entry for every project
    /// into a real directory.
    pub fn write_to(&self, root: &Path) {
        std::fs::write(root.join("angular.json"), self.to_json()).expect("write angular.json");
        for entry in self.test_entries() {
            let path = root.join(&entry);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).expect("create test entry dir");
            }
            std::fs::write(path, DEFAULT_TEST_ENTRY).expect("write test entry");
        }
    }

    /// Seed `angular.json` plus default test entries into a mock filesystem.
    pub fn seed(&self, fs: &MockFileSystem, root: &Path) {
        fs.add_file(root.join("angular.json"), self.to_json());
        for entry in self.test_entries() {
            fs.add_file(root.join(entry), DEFAULT_TEST_ENTRY);
        }
    }

    fn test_entries(&self) -> Vec<String> {
        self.projects
            .iter()
            .filter_map(|(_, p)| p.pointer("/architect/test/options/main")?.as_str())
            .map(str::to_string)
            .collect()
    }
}

impl Default for WorkspaceConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A pipeline over a mock filesystem rooted at `root`.
pub fn mock_pipeline(
    fs: &MockFileSystem,
    root: &Path,
    changes: FakeChangeSource,
) -> Pipeline<FakeChangeSource> {
    let settings = Settings::default();
    let fs = Arc::new(fs.clone());
    let workspace = Arc::new(WorkspaceCache::new(fs.clone(), root, settings.clone()));
    let rewriter = EntryRewriter::new(fs, root, &settings);
    Pipeline::new(changes, workspace, rewriter, settings)
}
