//! Access to the runs related to a row (same conversation or trace).

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracegrid_types::Run;

use crate::error::FetchError;

/// Remote (or local) store that can list the runs related to a run id
pub trait RelatedRunsSource: Send + Sync {
    fn fetch_related(&self, run_id: &str) -> Result<Vec<Run>, FetchError>;
}

impl<S: RelatedRunsSource + ?Sized> RelatedRunsSource for Arc<S> {
    fn fetch_related(&self, run_id: &str) -> Result<Vec<Run>, FetchError> {
        (**self).fetch_related(run_id)
    }
}

/// State of a row's related-runs read as seen by a renderer
#[derive(Debug, Clone)]
pub enum Lookup {
    /// Read scheduled or in flight
    Pending,
    /// Related runs in fetch order
    Resolved(Arc<Vec<Run>>),
    Failed,
}

/// Non-failing view of related runs used by the aggregated feedback column
///
/// Implementations must return promptly: a renderer calls `lookup` on every
/// draw.
pub trait RelatedRuns: Send + Sync {
    fn lookup(&self, run: &Run) -> Lookup;
}

/// Fetches inline on first lookup and memoizes the outcome per run id
///
/// Suited to one-shot output where blocking the caller is acceptable.
pub struct BlockingRelatedRuns<S> {
    source: S,
    cache: Mutex<HashMap<String, Lookup>>,
}

impl<S: RelatedRunsSource> BlockingRelatedRuns<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: Mutex::new(HashMap::new()),
        }
    }
}

impl<S: RelatedRunsSource> RelatedRuns for BlockingRelatedRuns<S> {
    fn lookup(&self, run: &Run) -> Lookup {
        let mut cache = self
            .cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(hit) = cache.get(&run.id) {
            return hit.clone();
        }

        let outcome = match self.source.fetch_related(&run.id) {
            Ok(runs) => Lookup::Resolved(Arc::new(runs)),
            Err(err) => {
                tracing::warn!(run_id = %run.id, error = %err, "related runs fetch failed");
                Lookup::Failed
            }
        };
        cache.insert(run.id.clone(), outcome.clone());
        outcome
    }
}
