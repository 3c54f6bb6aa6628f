//! Feature-usage signals emitted while rendering.
//!
//! Lifecycle of [`SessionAnalytics`]: created empty when a viewing session
//! starts, records each event key at most once, and forgets everything only
//! on [`SessionAnalytics::reset`] at the next session boundary.

use std::collections::HashSet;
use std::sync::Mutex;

/// Receives feature-usage events
pub trait AnalyticsSink: Send + Sync {
    /// Record `event` unless it was already recorded this session.
    /// Returns `true` only for the first call per event.
    fn track_once(&self, event: &str) -> bool;
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAnalytics;

impl AnalyticsSink for NoopAnalytics {
    fn track_once(&self, _event: &str) -> bool {
        false
    }
}

/// Idempotent per-session registry that logs each first occurrence
#[derive(Debug, Default)]
pub struct SessionAnalytics {
    seen: Mutex<HashSet<String>>,
}

impl SessionAnalytics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_seen(&self, event: &str) -> bool {
        self.seen
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains(event)
    }

    /// Events recorded so far, sorted
    pub fn events(&self) -> Vec<String> {
        let seen = self
            .seen
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut events: Vec<String> = seen.iter().cloned().collect();
        events.sort();
        events
    }

    /// Start a new session
    pub fn reset(&self) {
        self.seen
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}

impl AnalyticsSink for SessionAnalytics {
    fn track_once(&self, event: &str) -> bool {
        let first = self
            .seen
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(event.to_string());

        if first {
            tracing::info!(event, "feature observed");
        }
        first
    }
}
