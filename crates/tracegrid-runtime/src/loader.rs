//! Background related-runs loader.
//!
//! The first [`RelatedRuns::lookup`] for a run id answers [`Lookup::Pending`]
//! and queues the id for a single worker thread. When the fetch completes the
//! slot is updated and a [`LoaderEvent`] is sent so the host can redraw that
//! row. Outcomes are kept until [`RelatedRunsLoader::forget`]; failed reads
//! are not retried on their own.

use std::collections::HashMap;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::JoinHandle;

use tracegrid_engine::{FetchError, Lookup, RelatedRuns, RelatedRunsSource};
use tracegrid_types::Run;

use crate::Result;

#[derive(Debug, Clone)]
pub enum LoaderEvent {
    Resolved { run_id: String, count: usize },
    Failed { run_id: String, error: FetchError },
}

impl LoaderEvent {
    pub fn run_id(&self) -> &str {
        match self {
            LoaderEvent::Resolved { run_id, .. } | LoaderEvent::Failed { run_id, .. } => run_id,
        }
    }
}

type Slots = Arc<Mutex<HashMap<String, Lookup>>>;

fn lock(slots: &Slots) -> MutexGuard<'_, HashMap<String, Lookup>> {
    slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub struct RelatedRunsLoader {
    slots: Slots,
    jobs: Sender<String>,
    _handle: JoinHandle<()>,
}

impl RelatedRunsLoader {
    /// Spawn the worker; events arrive on the returned receiver
    pub fn start<S>(source: S) -> Result<(Self, Receiver<LoaderEvent>)>
    where
        S: RelatedRunsSource + 'static,
    {
        let (tx_jobs, rx_jobs) = channel::<String>();
        let (tx_events, rx_events) = channel();
        let slots: Slots = Arc::new(Mutex::new(HashMap::new()));

        let worker_slots = slots.clone();
        let handle = std::thread::Builder::new()
            .name("related-runs".to_string())
            .spawn(move || {
                for run_id in rx_jobs {
                    let outcome = source.fetch_related(&run_id);
                    let event = settle(&worker_slots, &run_id, outcome);
                    if let Some(event) = event {
                        // Host may have stopped listening; keep filling slots
                        let _ = tx_events.send(event);
                    }
                }
            })?;

        Ok((
            Self {
                slots,
                jobs: tx_jobs,
                _handle: handle,
            },
            rx_events,
        ))
    }

    /// Drop a row's outcome so the next lookup fetches again
    pub fn forget(&self, run_id: &str) {
        lock(&self.slots).remove(run_id);
    }

    /// Number of rows with a pending read
    pub fn pending(&self) -> usize {
        lock(&self.slots)
            .values()
            .filter(|lookup| matches!(lookup, Lookup::Pending))
            .count()
    }
}

/// Store a finished fetch unless the row was forgotten meanwhile
fn settle(
    slots: &Slots,
    run_id: &str,
    outcome: std::result::Result<Vec<Run>, FetchError>,
) -> Option<LoaderEvent> {
    let mut slots = lock(slots);
    if !matches!(slots.get(run_id), Some(Lookup::Pending)) {
        tracing::debug!(run_id, "discarding related runs for forgotten row");
        return None;
    }

    let event = match outcome {
        Ok(runs) => {
            let count = runs.len();
            slots.insert(run_id.to_string(), Lookup::Resolved(Arc::new(runs)));
            LoaderEvent::Resolved {
                run_id: run_id.to_string(),
                count,
            }
        }
        Err(error) => {
            tracing::warn!(run_id, %error, "related runs fetch failed");
            slots.insert(run_id.to_string(), Lookup::Failed);
            LoaderEvent::Failed {
                run_id: run_id.to_string(),
                error,
            }
        }
    };
    Some(event)
}

impl RelatedRuns for RelatedRunsLoader {
    fn lookup(&self, run: &Run) -> Lookup {
        let mut slots = lock(&self.slots);
        if let Some(hit) = slots.get(&run.id) {
            return hit.clone();
        }

        if self.jobs.send(run.id.clone()).is_err() {
            tracing::warn!(run_id = %run.id, "related runs worker is gone");
            slots.insert(run.id.clone(), Lookup::Failed);
            return Lookup::Failed;
        }
        tracing::debug!(run_id = %run.id, "scheduled related runs fetch");
        slots.insert(run.id.clone(), Lookup::Pending);
        Lookup::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tracegrid_testing::{RunBuilder, StubSource, fixtures};

    const WAIT: Duration = Duration::from_secs(5);

    #[test]
    fn test_first_lookup_is_pending_then_resolves() -> Result<()> {
        let runs = fixtures::conversation();
        let source = Arc::new(StubSource::new().with_related("conv-root", runs[1..].to_vec()));
        let (loader, events) = RelatedRunsLoader::start(source.clone())?;

        assert!(matches!(loader.lookup(&runs[0]), Lookup::Pending));
        assert!(matches!(loader.lookup(&runs[0]), Lookup::Pending));

        match events.recv_timeout(WAIT).unwrap() {
            LoaderEvent::Resolved { run_id, count } => {
                assert_eq!(run_id, "conv-root");
                assert_eq!(count, 2);
            }
            other => panic!("unexpected {other:?}"),
        }

        match loader.lookup(&runs[0]) {
            Lookup::Resolved(related) => assert_eq!(related.len(), 2),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(source.calls(), 1);
        assert_eq!(loader.pending(), 0);
        Ok(())
    }

    #[test]
    fn test_failure_is_remembered() -> Result<()> {
        let source = Arc::new(
            StubSource::new().with_failure("r1", FetchError::Transport("refused".to_string())),
        );
        let (loader, events) = RelatedRunsLoader::start(source.clone())?;
        let run = RunBuilder::new("r1").build();

        loader.lookup(&run);
        let event = events.recv_timeout(WAIT).unwrap();
        assert!(matches!(event, LoaderEvent::Failed { .. }));
        assert_eq!(event.run_id(), "r1");

        assert!(matches!(loader.lookup(&run), Lookup::Failed));
        assert_eq!(source.calls(), 1);
        Ok(())
    }

    #[test]
    fn test_forget_schedules_a_new_fetch() -> Result<()> {
        let source = Arc::new(StubSource::new());
        let (loader, events) = RelatedRunsLoader::start(source.clone())?;
        let run = RunBuilder::new("r1").build();

        loader.lookup(&run);
        events.recv_timeout(WAIT).unwrap();

        loader.forget("r1");
        assert!(matches!(loader.lookup(&run), Lookup::Pending));
        events.recv_timeout(WAIT).unwrap();
        assert_eq!(source.calls(), 2);
        Ok(())
    }

    #[test]
    fn test_settle_skips_forgotten_rows() {
        let slots: Slots = Arc::new(Mutex::new(HashMap::new()));
        assert!(settle(&slots, "r1", Ok(Vec::new())).is_none());
        assert!(lock(&slots).is_empty());
    }
}
