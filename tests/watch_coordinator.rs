// tests/watch_coordinator.rs

use std::path::Path;
use std::time::Duration;

use specscope::engine::{WatchCoordinator, WatchEvent};
use specscope::fs::mock::MockFileSystem;
use specscope_test_utils::builders::{mock_pipeline, WorkspaceConfigBuilder};
use specscope_test_utils::fake_change_source::{FakeChangeSource, FakeChanges};
use specscope_test_utils::reporter::CollectingReporter;
use specscope_test_utils::{init_tracing, with_timeout};
use tokio::sync::mpsc;
use tokio::time::sleep;

const DEBOUNCE: Duration = Duration::from_millis(200);

fn changed(path: &str) -> WatchEvent {
    WatchEvent::FileChanged {
        path: path.to_string(),
        created: false,
    }
}

fn created(path: &str) -> WatchEvent {
    WatchEvent::FileChanged {
        path: path.to_string(),
        created: true,
    }
}

fn app_workspace(fs: &MockFileSystem) {
    WorkspaceConfigBuilder::new()
        .with_project("app", "app/src/test.ts")
        .seed(fs, Path::new("/ws"));
}

#[tokio::test]
async fn burst_of_changes_runs_a_single_pass() {
    init_tracing();

    let fs = MockFileSystem::new();
    app_workspace(&fs);
    let changes = FakeChangeSource::with_files(&["app/src/foo.ts"]);
    let pipeline = mock_pipeline(&fs, Path::new("/ws"), changes.clone());
    let reporter = CollectingReporter::new();

    let (tx, rx) = mpsc::channel(64);
    let coordinator = WatchCoordinator::new(pipeline, reporter.clone(), DEBOUNCE, rx);
    let handle = tokio::spawn(coordinator.run());

    for i in 0..10 {
        tx.send(changed(&format!("app/src/file{i}.ts"))).await.unwrap();
        sleep(Duration::from_millis(5)).await;
    }
    sleep(DEBOUNCE * 3).await;
    tx.send(WatchEvent::ShutdownRequested).await.unwrap();

    let passes = with_timeout(handle).await.unwrap();

    // Startup pass plus one for the whole burst.
    assert_eq!(passes, 2);
    assert_eq!(changes.calls(), 2);
    assert_eq!(
        reporter.outcomes(),
        vec!["File updated: app/src/test.ts", "File updated: app/src/test.ts"]
    );
    // The second pass found the entry already scoped.
    assert_eq!(fs.write_count(), 1);
}

#[tokio::test]
async fn separate_bursts_run_separate_passes() {
    init_tracing();

    let fs = MockFileSystem::new();
    app_workspace(&fs);
    let changes = FakeChangeSource::with_files(&[]);
    let pipeline = mock_pipeline(&fs, Path::new("/ws"), changes.clone());

    let (tx, rx) = mpsc::channel(64);
    let coordinator = WatchCoordinator::new(pipeline, CollectingReporter::new(), DEBOUNCE, rx);
    let handle = tokio::spawn(coordinator.run());

    tx.send(changed("app/src/a.ts")).await.unwrap();
    sleep(DEBOUNCE * 3).await;
    tx.send(changed("app/src/b.ts")).await.unwrap();
    sleep(DEBOUNCE * 3).await;
    tx.send(WatchEvent::ShutdownRequested).await.unwrap();

    let passes = with_timeout(handle).await.unwrap();
    assert_eq!(passes, 3);
    assert_eq!(changes.calls(), 3);
}

#[tokio::test]
async fn created_files_reload_the_workspace_config() {
    init_tracing();

    let fs = MockFileSystem::new();
    app_workspace(&fs);
    let changes = FakeChangeSource::with_files(&["lib/src/util.ts"]);
    let pipeline = mock_pipeline(&fs, Path::new("/ws"), changes);
    let reporter = CollectingReporter::new();

    let (tx, rx) = mpsc::channel(64);
    let coordinator = WatchCoordinator::new(pipeline, reporter.clone(), DEBOUNCE, rx);
    let handle = tokio::spawn(coordinator.run());

    // Let the startup pass cache the single-project config.
    sleep(DEBOUNCE).await;

    // A plain modification keeps the cached config.
    WorkspaceConfigBuilder::new()
        .with_project("app", "app/src/test.ts")
        .with_project("lib", "lib/src/test.ts")
        .seed(&fs, Path::new("/ws"));
    tx.send(changed("angular.json")).await.unwrap();
    sleep(DEBOUNCE * 3).await;

    // A new file drops it.
    tx.send(created("lib/src/test.ts")).await.unwrap();
    sleep(DEBOUNCE * 3).await;
    tx.send(WatchEvent::ShutdownRequested).await.unwrap();

    let passes = with_timeout(handle).await.unwrap();
    assert_eq!(passes, 3);
    assert_eq!(
        reporter.outcomes(),
        vec![
            "No project owns the changed files",
            "No project owns the changed files",
            "File updated: lib/src/test.ts",
        ]
    );
    let lib = fs.contents("/ws/lib/src/test.ts").unwrap();
    assert!(lib.contains(r"/(util\.spec\.ts)/);"));
}

#[tokio::test]
async fn failed_pass_keeps_watching() {
    init_tracing();

    let fs = MockFileSystem::new();
    app_workspace(&fs);
    let changes = FakeChangeSource::scripted(vec![
        FakeChanges::CommandFailed("fatal: not a git repository".to_string()),
        FakeChanges::Files(Vec::new()),
    ]);
    let pipeline = mock_pipeline(&fs, Path::new("/ws"), changes);
    let reporter = CollectingReporter::new();

    let (tx, rx) = mpsc::channel(64);
    let coordinator = WatchCoordinator::new(pipeline, reporter.clone(), DEBOUNCE, rx);
    let handle = tokio::spawn(coordinator.run());

    tx.send(changed("app/src/a.ts")).await.unwrap();
    sleep(DEBOUNCE * 3).await;
    tx.send(WatchEvent::ShutdownRequested).await.unwrap();

    let passes = with_timeout(handle).await.unwrap();
    assert_eq!(passes, 2);
    assert_eq!(
        reporter.outcomes(),
        vec![
            "error: Git ls-files failed\n\nfatal: not a git repository",
            "No file changes found",
        ]
    );
}

#[tokio::test]
async fn shutdown_while_debouncing_skips_the_pending_pass() {
    init_tracing();

    let fs = MockFileSystem::new();
    app_workspace(&fs);
    let changes = FakeChangeSource::with_files(&["app/src/foo.ts"]);
    let pipeline = mock_pipeline(&fs, Path::new("/ws"), changes.clone());

    let (tx, rx) = mpsc::channel(64);
    let coordinator = WatchCoordinator::new(pipeline, CollectingReporter::new(), DEBOUNCE, rx);
    let handle = tokio::spawn(coordinator.run());

    tx.send(changed("app/src/a.ts")).await.unwrap();
    tx.send(WatchEvent::ShutdownRequested).await.unwrap();

    let passes = with_timeout(handle).await.unwrap();
    assert_eq!(passes, 1);
    assert_eq!(changes.calls(), 1);
}

#[tokio::test]
async fn closed_channel_stops_the_loop() {
    init_tracing();

    let fs = MockFileSystem::new();
    app_workspace(&fs);
    let pipeline = mock_pipeline(&fs, Path::new("/ws"), FakeChangeSource::with_files(&[]));

    let (tx, rx) = mpsc::channel(1);
    drop(tx);
    let coordinator = WatchCoordinator::new(pipeline, CollectingReporter::new(), DEBOUNCE, rx);

    let passes = with_timeout(coordinator.run()).await;
    assert_eq!(passes, 1);
}
