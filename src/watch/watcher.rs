// src/watch/watcher.rs

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, Weak};

use anyhow::{Context, Result};
use notify::event::CreateKind;
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::engine::WatchEvent;
use crate::watch::path_utils::relative_str;
use crate::watch::patterns::IgnoreSet;

/// Handle for the filesystem watcher.
///
/// Keeps the underlying `RecommendedWatcher` alive. Dropping this handle
/// stops file watching.
pub struct WatcherHandle {
    _inner: Arc<Mutex<RecommendedWatcher>>,
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle").finish()
    }
}

/// Spawn a filesystem watcher over `root` and forward every relevant change
/// as a [`WatchEvent::FileChanged`].
///
/// - `root` is the workspace root; forwarded paths are relative to it.
/// - `ignore` drops paths such as `.git/` and `node_modules/`. Ignored
///   top-level directories are never registered with the OS watcher, so a
///   large `node_modules/` does not eat into the inotify watch limit.
///   Ignored directories nested deeper (e.g. `apps/web/node_modules/`) are
///   still watched and only filtered.
/// - `event_tx` is the channel into the watch coordinator.
pub fn spawn_watcher(
    root: impl Into<PathBuf>,
    ignore: IgnoreSet,
    event_tx: mpsc::Sender<WatchEvent>,
) -> Result<WatcherHandle> {
    let root = root.into();
    // Canonicalize once so we have a stable base path.
    let root = root.canonicalize().unwrap_or_else(|_| root.clone());

    // Channel from the blocking notify callback into the async world.
    let (raw_tx, mut raw_rx) = mpsc::unbounded_channel::<Event>();

    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if let Err(err) = raw_tx.send(event) {
                    // No tracing subscriber guarantees on notify's thread.
                    eprintln!("specscope: failed to forward notify event: {err}");
                }
            }
            Err(err) => eprintln!("specscope: file watch error: {err}"),
        },
        Config::default(),
    )?;

    for (path, mode) in watch_targets(&root, &ignore)? {
        watcher
            .watch(&path, mode)
            .with_context(|| format!("watching {:?}", path))?;
    }
    info!("file watcher started on {:?}", root);

    let watcher = Arc::new(Mutex::new(watcher));
    // The task must not keep the watcher alive past the handle.
    let task_watcher = Arc::downgrade(&watcher);

    tokio::spawn(async move {
        while let Some(event) = raw_rx.recv().await {
            if let Some(dir) = new_top_level_dir(&root, &ignore, &event) {
                watch_new_dir(&task_watcher, &dir);
            }
            for watch_event in translate_event(&root, &ignore, &event) {
                if let Err(err) = event_tx.send(watch_event).await {
                    warn!("failed to send WatchEvent: {err}");
                    // The coordinator is gone; stop forwarding.
                    return;
                }
            }
        }
        debug!("watcher event loop finished");
    });

    Ok(WatcherHandle { _inner: watcher })
}

/// What to register with the OS watcher: `root` itself non-recursively, plus
/// every top-level directory that is not ignored, recursively.
pub fn watch_targets(root: &Path, ignore: &IgnoreSet) -> Result<Vec<(PathBuf, RecursiveMode)>> {
    let mut dirs = Vec::new();
    for entry in std::fs::read_dir(root).with_context(|| format!("reading dir {:?}", root))? {
        let path = entry?.path();
        if path.is_dir() && !is_ignored_child(root, ignore, &path) {
            dirs.push(path);
        }
    }
    dirs.sort();

    let mut targets = vec![(root.to_path_buf(), RecursiveMode::NonRecursive)];
    targets.extend(dirs.into_iter().map(|dir| (dir, RecursiveMode::Recursive)));
    Ok(targets)
}

/// A directory created directly under `root` that needs its own watch.
fn new_top_level_dir(root: &Path, ignore: &IgnoreSet, event: &Event) -> Option<PathBuf> {
    if !matches!(
        event.kind,
        EventKind::Create(CreateKind::Folder | CreateKind::Any)
    ) {
        return None;
    }
    event
        .paths
        .iter()
        .find(|path| {
            path.parent() == Some(root) && path.is_dir() && !is_ignored_child(root, ignore, path)
        })
        .cloned()
}

fn is_ignored_child(root: &Path, ignore: &IgnoreSet, path: &Path) -> bool {
    relative_str(root, path).is_none_or(|rel| ignore.is_ignored(&rel))
}

fn watch_new_dir(watcher: &Weak<Mutex<RecommendedWatcher>>, dir: &Path) {
    let Some(watcher) = watcher.upgrade() else {
        return;
    };
    let mut watcher = watcher.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    match watcher.watch(dir, RecursiveMode::Recursive) {
        Ok(()) => debug!(?dir, "watching new top-level directory"),
        Err(err) => warn!(?dir, "failed to watch new directory: {err}"),
    }
}

/// Turn one notify event into coordinator events.
///
/// Access events (open/close/read) carry no content change and are dropped,
/// as are ignored paths and paths outside `root`.
pub fn translate_event(root: &Path, ignore: &IgnoreSet, event: &Event) -> Vec<WatchEvent> {
    if matches!(event.kind, EventKind::Access(_)) {
        return Vec::new();
    }
    let created = matches!(event.kind, EventKind::Create(_));

    event
        .paths
        .iter()
        .filter_map(|path| match relative_str(root, path) {
            Some(rel) => Some(rel),
            None => {
                warn!("could not relativize path {:?} against root {:?}", path, root);
                None
            }
        })
        .filter(|rel| !ignore.is_ignored(rel))
        .map(|path| WatchEvent::FileChanged { path, created })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, ModifyKind};

    fn event(kind: EventKind, paths: &[&str]) -> Event {
        let mut e = Event::new(kind);
        for p in paths {
            e = e.add_path(PathBuf::from(p));
        }
        e
    }

    #[test]
    fn create_events_are_flagged() {
        let ignore = IgnoreSet::default_set().unwrap();
        let out = translate_event(
            Path::new("/ws"),
            &ignore,
            &event(EventKind::Create(CreateKind::File), &["/ws/libs/new/src/test.ts"]),
        );
        assert_eq!(out, vec![WatchEvent::FileChanged {
            path: "libs/new/src/test.ts".to_string(),
            created: true,
        }]);
    }

    #[test]
    fn ignored_and_access_events_are_dropped() {
        let ignore = IgnoreSet::default_set().unwrap();
        let root = Path::new("/ws");

        let modify = event(
            EventKind::Modify(ModifyKind::Any),
            &["/ws/node_modules/a.ts", "/ws/app/a.ts"],
        );
        assert_eq!(translate_event(root, &ignore, &modify), vec![WatchEvent::FileChanged {
            path: "app/a.ts".to_string(),
            created: false,
        }]);

        let access = event(EventKind::Access(AccessKind::Any), &["/ws/app/a.ts"]);
        assert!(translate_event(root, &ignore, &access).is_empty());
    }

    #[test]
    fn ignored_top_level_dirs_are_not_registered() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        for sub in ["src", "projects", "node_modules", "dist", ".git"] {
            std::fs::create_dir_all(root.join(sub)).unwrap();
        }
        std::fs::write(root.join("angular.json"), "{}").unwrap();

        let targets = watch_targets(root, &IgnoreSet::default_set().unwrap()).unwrap();

        assert_eq!(targets, vec![
            (root.to_path_buf(), RecursiveMode::NonRecursive),
            (root.join("projects"), RecursiveMode::Recursive),
            (root.join("src"), RecursiveMode::Recursive),
        ]);
    }

    #[test]
    fn created_top_level_dir_gets_a_watch_unless_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("libs/new")).unwrap();
        std::fs::create_dir_all(root.join("dist")).unwrap();
        let ignore = IgnoreSet::default_set().unwrap();

        let libs = Event::new(EventKind::Create(CreateKind::Folder)).add_path(root.join("libs"));
        assert_eq!(new_top_level_dir(root, &ignore, &libs), Some(root.join("libs")));

        let nested =
            Event::new(EventKind::Create(CreateKind::Folder)).add_path(root.join("libs/new"));
        assert_eq!(new_top_level_dir(root, &ignore, &nested), None);

        let dist = Event::new(EventKind::Create(CreateKind::Folder)).add_path(root.join("dist"));
        assert_eq!(new_top_level_dir(root, &ignore, &dist), None);
    }
}
