//! Record of crossing events that have already been notified

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Persisted form: `{"sent": {"<dedup key>": true}}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SentState {
    #[serde(default)]
    pub sent: BTreeMap<String, bool>,
}

#[derive(Debug, Default)]
pub struct IdempotencyStore {
    state: SentState,
    /// Keys passed to `mark_if_absent` since load; exempt from pruning
    seen: BTreeSet<String>,
}

impl IdempotencyStore {
    pub fn new(state: SentState) -> Self {
        Self {
            state,
            seen: BTreeSet::new(),
        }
    }

    /// Mark `key` as sent. Returns `true` only when it was not marked before.
    pub fn mark_if_absent(&mut self, key: &str) -> bool {
        self.seen.insert(key.to_string());
        if self.contains(key) {
            return false;
        }
        self.state.sent.insert(key.to_string(), true);
        true
    }

    pub fn contains(&self, key: &str) -> bool {
        self.state.sent.get(key).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.state.sent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.sent.is_empty()
    }

    /// Drop keys whose candle time (last `|` segment) is before `cutoff`.
    ///
    /// Keys without a parseable candle time are kept, and so are keys seen
    /// by `mark_if_absent` on this store: a provider still serving that
    /// candle would otherwise re-notify it on the next run. Returns the
    /// number of keys removed.
    pub fn prune_before(&mut self, cutoff: DateTime<Utc>) -> usize {
        let before = self.state.sent.len();
        let seen = &self.seen;
        self.state.sent.retain(|key, _| {
            if seen.contains(key) {
                return true;
            }
            match candle_time(key) {
                Some(ts) => ts >= cutoff,
                None => true,
            }
        });
        before - self.state.sent.len()
    }

    pub fn state(&self) -> &SentState {
        &self.state
    }

    pub fn into_state(self) -> SentState {
        self.state
    }
}

fn candle_time(key: &str) -> Option<DateTime<Utc>> {
    let (_, ts) = key.rsplit_once('|')?;
    DateTime::parse_from_rfc3339(ts)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
