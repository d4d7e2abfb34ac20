use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use specscope::changes::ChangeSource;
use specscope::errors::{Result, SpecscopeError};

/// Scripted response for one `changed_files` call.
#[derive(Debug, Clone)]
pub enum FakeChanges {
    Files(Vec<String>),
    ToolNotFound,
    CommandFailed(String),
}

/// A change source that:
/// - replays scripted responses in order, then repeats the last one
/// - counts how many times it was asked.
#[derive(Debug, Clone)]
pub struct FakeChangeSource {
    script: Arc<Mutex<VecDeque<FakeChanges>>>,
    last: Arc<Mutex<FakeChanges>>,
    calls: Arc<AtomicUsize>,
}

impl FakeChangeSource {
    /// Always report `files`.
    pub fn with_files(files: &[&str]) -> Self {
        Self::scripted(vec![FakeChanges::Files(
            files.iter().map(|f| f.to_string()).collect(),
        )])
    }

    pub fn scripted(script: Vec<FakeChanges>) -> Self {
        let last = script
            .last()
            .cloned()
            .unwrap_or(FakeChanges::Files(Vec::new()));
        Self {
            script: Arc::new(Mutex::new(script.into())),
            last: Arc::new(Mutex::new(last)),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of `changed_files` calls so far (one per pass).
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn next(&self) -> FakeChanges {
        let mut script = self.script.lock().unwrap();
        match script.pop_front() {
            Some(step) => {
                *self.last.lock().unwrap() = step.clone();
                step
            }
            None => self.last.lock().unwrap().clone(),
        }
    }
}

impl ChangeSource for FakeChangeSource {
    fn changed_files(&self) -> Pin<Box<dyn Future<Output = Result<Vec<String>>> + Send + '_>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let step = self.next();
        Box::pin(async move {
            match step {
                FakeChanges::Files(files) => Ok(files),
                FakeChanges::ToolNotFound => Err(SpecscopeError::ToolNotFound(
                    "No such file or directory (os error 2)".to_string(),
                )),
                FakeChanges::CommandFailed(stderr) => Err(SpecscopeError::CommandFailed(stderr)),
            }
        })
    }
}
