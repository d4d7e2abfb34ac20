// tests/workspace_on_disk.rs

use std::error::Error;
use std::sync::Arc;

use specscope::config::{load_workspace_config, Settings};
use specscope::errors::SpecscopeError;
use specscope::fs::{FileSystem, RealFileSystem};
use specscope::rewrite::EntryRewriter;
use specscope::scope::Pattern;
use specscope_test_utils::builders::{WorkspaceConfigBuilder, DEFAULT_TEST_ENTRY};
use specscope_test_utils::init_tracing;
use tempfile::tempdir;

type TestResult = Result<(), Box<dyn Error>>;

fn rewriter(root: &std::path::Path) -> EntryRewriter {
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    EntryRewriter::new(fs, root, &Settings::default())
}

#[tokio::test]
async fn update_then_revert_restores_the_original_file() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    WorkspaceConfigBuilder::new()
        .with_project("app", "projects/app/src/test.ts")
        .write_to(dir.path());
    let entry = dir.path().join("projects/app/src/test.ts");
    let rewriter = rewriter(dir.path());

    let pattern = Pattern::for_files(&["projects/app/src/foo.spec.ts", "projects/app/src/bar.spec.ts"]);
    let message = rewriter.update("projects/app/src/test.ts", &pattern).await;
    assert_eq!(message, "File updated: projects/app/src/test.ts");

    let scoped = std::fs::read_to_string(&entry)?;
    assert!(scoped.contains(r"require.context('./', true, /(foo\.spec\.ts|bar\.spec\.ts)/);"));
    assert_eq!(scoped.lines().count(), DEFAULT_TEST_ENTRY.lines().count());

    let message = rewriter.revert("projects/app/src/test.ts").await;
    assert_eq!(message, "File updated (undone): projects/app/src/test.ts");
    assert_eq!(std::fs::read_to_string(&entry)?, DEFAULT_TEST_ENTRY);
    Ok(())
}

#[tokio::test]
async fn crlf_line_endings_survive_a_rewrite() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    let crlf = DEFAULT_TEST_ENTRY.replace('\n', "\r\n");
    std::fs::create_dir_all(dir.path().join("src"))?;
    std::fs::write(dir.path().join("src/test.ts"), &crlf)?;

    let message = rewriter(dir.path())
        .update("src/test.ts", &Pattern::for_files(&["src/a.spec.ts"]))
        .await;
    assert_eq!(message, "File updated: src/test.ts");

    let scoped = std::fs::read_to_string(dir.path().join("src/test.ts"))?;
    assert!(scoped.contains("/(a\\.spec\\.ts)/);\r\n"));
    assert_eq!(scoped.matches("\r\n").count(), crlf.matches("\r\n").count());
    Ok(())
}

#[tokio::test]
async fn missing_entry_reports_a_failure_line() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    let message = rewriter(dir.path()).revert("src/test.ts").await;

    assert!(message.starts_with("FAILED file update: src/test.ts can't find file"));
    assert!(!dir.path().join("src/test.ts").exists());
    Ok(())
}

#[test]
fn workspace_config_keeps_project_order() -> TestResult {
    let dir = tempdir()?;
    WorkspaceConfigBuilder::new()
        .with_project("zeta", "zeta/src/test.ts")
        .with_untested_project("docs")
        .with_project("alpha", "alpha/src/test.ts")
        .write_to(dir.path());

    let config = load_workspace_config(&RealFileSystem, dir.path(), &Settings::default())?;

    assert_eq!(
        config.test_entry_files(),
        vec!["zeta/src/test.ts".to_string(), "alpha/src/test.ts".to_string()]
    );
    Ok(())
}

#[test]
fn missing_workspace_config_names_the_expected_path() {
    let dir = tempdir().unwrap();

    match load_workspace_config(&RealFileSystem, dir.path(), &Settings::default()) {
        Err(SpecscopeError::ConfigNotFound(path)) => {
            assert_eq!(path, dir.path().join("angular.json"));
        }
        other => panic!("expected ConfigNotFound, got {other:?}"),
    }
}

#[test]
fn malformed_workspace_config_is_a_parse_error() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("angular.json"), r#"{ "projects": [1, 2] }"#).unwrap();

    let err = load_workspace_config(&RealFileSystem, dir.path(), &Settings::default()).unwrap_err();

    assert!(matches!(err, SpecscopeError::ConfigParseError { .. }));
    assert!(err.to_string().contains("angular.json"));
}
