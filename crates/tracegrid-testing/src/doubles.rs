//! Stand-ins for the engine's collaborators.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tracegrid_engine::{AnalyticsSink, FetchError, Lookup, RelatedRuns, RelatedRunsSource};
use tracegrid_types::Run;

/// In-memory [`RelatedRunsSource`] with canned answers per run id
///
/// Ids without an answer resolve to an empty list. Every call is counted.
#[derive(Default)]
pub struct StubSource {
    answers: HashMap<String, Result<Vec<Run>, FetchError>>,
    calls: AtomicUsize,
}

impl StubSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_related(mut self, run_id: &str, related: Vec<Run>) -> Self {
        self.answers.insert(run_id.to_string(), Ok(related));
        self
    }

    pub fn with_failure(mut self, run_id: &str, error: FetchError) -> Self {
        self.answers.insert(run_id.to_string(), Err(error));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RelatedRunsSource for StubSource {
    fn fetch_related(&self, run_id: &str) -> Result<Vec<Run>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answers
            .get(run_id)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// [`RelatedRuns`] that answers every row the same way
pub struct FixedLookup(pub Lookup);

impl FixedLookup {
    pub fn resolved(runs: Vec<Run>) -> Self {
        Self(Lookup::Resolved(Arc::new(runs)))
    }

    pub fn failed() -> Self {
        Self(Lookup::Failed)
    }

    pub fn pending() -> Self {
        Self(Lookup::Pending)
    }
}

impl RelatedRuns for FixedLookup {
    fn lookup(&self, _run: &Run) -> Lookup {
        self.0.clone()
    }
}

/// [`AnalyticsSink`] that records every call, including repeats
#[derive(Default)]
pub struct RecordingAnalytics {
    calls: Mutex<Vec<String>>,
}

impl RecordingAnalytics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `track_once` call in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("analytics lock").clone()
    }

    /// How many calls named `event`
    pub fn count(&self, event: &str) -> usize {
        self.calls().iter().filter(|e| e.as_str() == event).count()
    }
}

impl AnalyticsSink for RecordingAnalytics {
    fn track_once(&self, event: &str) -> bool {
        let mut calls = self.calls.lock().expect("analytics lock");
        let first = !calls.iter().any(|e| e == event);
        calls.push(event.to_string());
        first
    }
}
