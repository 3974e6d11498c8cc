//! Label transition history per instrument/timeframe

use crate::models::signal::SignalLabel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub label: SignalLabel,
    pub observed_at: DateTime<Utc>,
}

/// Persisted form: `{"<key>": [{"label": .., "observedAt": ..}, ..]}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryState {
    pub trails: BTreeMap<String, Vec<HistoryEntry>>,
}

pub struct HistoryStore {
    state: HistoryState,
    limit: usize,
}

impl HistoryStore {
    /// `limit` is the number of entries kept per key (at least one).
    pub fn new(state: HistoryState, limit: usize) -> Self {
        Self {
            state,
            limit: limit.max(1),
        }
    }

    /// Record `label` if it differs from the last label stored for `key`.
    ///
    /// Returns whether an entry was appended. The trail is trimmed to the
    /// most recent `limit` entries after every append.
    pub fn append(&mut self, key: &str, label: SignalLabel, observed_at: DateTime<Utc>) -> bool {
        let trail = self.state.trails.entry(key.to_string()).or_default();
        if trail.last().map(|e| e.label) == Some(label) {
            return false;
        }

        trail.push(HistoryEntry { label, observed_at });
        if trail.len() > self.limit {
            let excess = trail.len() - self.limit;
            trail.drain(..excess);
        }
        true
    }

    /// Most recent `count` entries for `key`, oldest first.
    pub fn recent(&self, key: &str, count: usize) -> &[HistoryEntry] {
        match self.state.trails.get(key) {
            Some(trail) => &trail[trail.len().saturating_sub(count)..],
            None => &[],
        }
    }

    pub fn last_label(&self, key: &str) -> Option<SignalLabel> {
        self.state
            .trails
            .get(key)
            .and_then(|trail| trail.last())
            .map(|e| e.label)
    }

    pub fn state(&self) -> &HistoryState {
        &self.state
    }

    pub fn into_state(self) -> HistoryState {
        self.state
    }
}
