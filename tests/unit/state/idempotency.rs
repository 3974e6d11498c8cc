//! Unit tests for the idempotency store

use chrono::{TimeZone, Utc};
use rsiwatch::state::{IdempotencyStore, SentState};
use std::collections::BTreeMap;

#[test]
fn test_mark_if_absent_gates_once() {
    let mut store = IdempotencyStore::default();
    assert!(store.mark_if_absent("EURJPY=X|H1|20|up|2026-08-01T10:00:00Z"));
    assert!(!store.mark_if_absent("EURJPY=X|H1|20|up|2026-08-01T10:00:00Z"));
    assert!(store.mark_if_absent("EURJPY=X|H1|20|down|2026-08-01T10:00:00Z"));
    assert_eq!(store.len(), 2);
}

#[test]
fn test_unsent_entry_is_treated_as_absent() {
    let mut sent = BTreeMap::new();
    sent.insert("k".to_string(), false);
    let mut store = IdempotencyStore::new(SentState { sent });

    assert!(!store.contains("k"));
    assert!(store.mark_if_absent("k"));
    assert!(store.contains("k"));
}

#[test]
fn test_prune_before_drops_old_candles() {
    let mut store = IdempotencyStore::default();
    store.mark_if_absent("X|H1|20|up|2026-01-01T00:00:00Z");
    store.mark_if_absent("X|H1|20|up|2026-03-01T00:00:00Z");
    store.mark_if_absent("legacy key without time");

    let cutoff = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();
    assert_eq!(store.prune_before(cutoff), 1);
    assert!(!store.contains("X|H1|20|up|2026-01-01T00:00:00Z"));
    assert!(store.contains("X|H1|20|up|2026-03-01T00:00:00Z"));
    assert!(store.contains("legacy key without time"));
}

#[test]
fn test_prune_keeps_keys_hit_this_run() {
    let old_key = "X|H1|20|up|2026-01-01T00:00:00Z";
    let mut sent = BTreeMap::new();
    sent.insert(old_key.to_string(), true);
    sent.insert("X|H4|80|down|2026-01-01T00:00:00Z".to_string(), true);
    let mut store = IdempotencyStore::new(SentState { sent });

    // Same candle detected again: suppressed, and must outlive retention
    assert!(!store.mark_if_absent(old_key));

    let cutoff = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();
    assert_eq!(store.prune_before(cutoff), 1);
    assert!(store.contains(old_key));
    assert!(!store.contains("X|H4|80|down|2026-01-01T00:00:00Z"));
}
