use std::sync::{Arc, Mutex};

use specscope::engine::{PassReport, Reporter};
use specscope::errors::Result;

/// Records each pass outcome as a line of text.
///
/// Successful passes are stored as their report text; failed passes as
/// `"error: <message>"`.
#[derive(Debug, Clone, Default)]
pub struct CollectingReporter {
    outcomes: Arc<Mutex<Vec<String>>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outcomes(&self) -> Vec<String> {
        self.outcomes.lock().unwrap().clone()
    }
}

impl Reporter for CollectingReporter {
    fn report(&mut self, outcome: &Result<PassReport>) {
        let line = match outcome {
            Ok(report) => report.to_string(),
            Err(err) => format!("error: {err}"),
        };
        self.outcomes.lock().unwrap().push(line);
    }
}
