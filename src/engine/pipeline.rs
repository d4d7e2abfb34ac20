// src/engine/pipeline.rs

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::changes::ChangeSource;
use crate::config::{Settings, WorkspaceCache};
use crate::errors::Result;
use crate::rewrite::EntryRewriter;
use crate::scope::{assign_projects, convert_to_spec_files, Pattern, Project};

use super::report::PassReport;

/// One change-resolution-to-rewrite pass, end to end.
///
/// Holds the collaborators for a workspace; [`run_pass`](Self::run_pass) can
/// be called any number of times and always starts from a fresh change list.
pub struct Pipeline<C: ChangeSource> {
    changes: C,
    workspace: Arc<WorkspaceCache>,
    rewriter: EntryRewriter,
    settings: Settings,
}

impl<C: ChangeSource> Pipeline<C> {
    pub fn new(
        changes: C,
        workspace: Arc<WorkspaceCache>,
        rewriter: EntryRewriter,
        settings: Settings,
    ) -> Self {
        Self {
            changes,
            workspace,
            rewriter,
            settings,
        }
    }

    pub fn workspace(&self) -> &Arc<WorkspaceCache> {
        &self.workspace
    }

    /// Run one pass.
    ///
    /// Errors from the change source or the workspace config abort the pass.
    /// Per-project rewrite failures are folded into the report instead.
    pub async fn run_pass(&self) -> Result<PassReport> {
        let (changed, config) =
            tokio::try_join!(self.changes.changed_files(), self.workspace.get())?;

        if changed.is_empty() {
            info!("no changed files");
            return Ok(PassReport::NoChanges);
        }

        let test_entries = config.test_entry_files();
        let sources: Vec<String> = changed
            .into_iter()
            .filter(|file| !test_entries.contains(file))
            .collect();

        if sources.is_empty() {
            info!(entries = test_entries.len(), "only test entries changed; reverting");
            let messages = self.revert_all(&test_entries).await;
            return Ok(PassReport::Reverted(messages));
        }

        let spec_files = convert_to_spec_files(
            &sources,
            &self.settings.source_suffix,
            &self.settings.spec_suffix,
        );
        let projects = assign_projects(&test_entries, &spec_files);
        debug!(?spec_files, projects = projects.len(), "resolved changed specs");

        let messages = self.update_all(projects).await;
        Ok(PassReport::Updated(messages))
    }

    async fn update_all(&self, projects: Vec<Project>) -> Vec<String> {
        let handles = projects
            .into_iter()
            .map(|project| {
                let rewriter = self.rewriter.clone();
                let pattern = Pattern::for_files(&project.spec_files);
                let entry = project.test_entry;
                let task_entry = entry.clone();
                let handle =
                    tokio::spawn(async move { rewriter.update(&task_entry, &pattern).await });
                (entry, handle)
            })
            .collect();
        join_in_order(handles).await
    }

    async fn revert_all(&self, test_entries: &[String]) -> Vec<String> {
        let handles = test_entries
            .iter()
            .map(|entry| {
                let rewriter = self.rewriter.clone();
                let task_entry = entry.clone();
                let handle = tokio::spawn(async move { rewriter.revert(&task_entry).await });
                (entry.clone(), handle)
            })
            .collect();
        join_in_order(handles).await
    }
}

/// Await every rewrite, keeping project order in the report.
async fn join_in_order(handles: Vec<(String, JoinHandle<String>)>) -> Vec<String> {
    let mut messages = Vec::with_capacity(handles.len());
    for (entry, handle) in handles {
        let message = match handle.await {
            Ok(message) => message,
            Err(err) => format!("FAILED file update: {entry} {err}"),
        };
        messages.push(message);
    }
    messages
}
