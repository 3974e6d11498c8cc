//! Unit tests for the label history store

use chrono::{DateTime, Duration, TimeZone, Utc};
use rsiwatch::models::signal::SignalLabel;
use rsiwatch::state::{HistoryState, HistoryStore};

fn at(hour: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 7, 1, 0, 0, 0).unwrap() + Duration::hours(hour)
}

#[test]
fn test_history_collapses_repeats() {
    use SignalLabel::{Buy, Neutral};

    let mut store = HistoryStore::new(HistoryState::default(), 10);
    let sequence = [Neutral, Neutral, Neutral, Buy, Buy, Neutral];
    let appended: Vec<bool> = sequence
        .iter()
        .enumerate()
        .map(|(i, &label)| store.append("EURJPY=X/H1", label, at(i as i64)))
        .collect();

    assert_eq!(appended, vec![true, false, false, true, false, true]);

    let trail = store.recent("EURJPY=X/H1", 10);
    let labels: Vec<SignalLabel> = trail.iter().map(|e| e.label).collect();
    assert_eq!(labels, vec![Neutral, Buy, Neutral]);
    let times: Vec<DateTime<Utc>> = trail.iter().map(|e| e.observed_at).collect();
    assert_eq!(times, vec![at(0), at(3), at(5)]);
}

#[test]
fn test_history_is_trimmed_to_limit() {
    use SignalLabel::{Buy, Sell};

    let mut store = HistoryStore::new(HistoryState::default(), 3);
    for i in 0..6 {
        let label = if i % 2 == 0 { Buy } else { Sell };
        store.append("k", label, at(i));
    }

    let trail = store.recent("k", 10);
    assert_eq!(trail.len(), 3);
    assert_eq!(trail[0].observed_at, at(3));
    assert_eq!(trail[2].observed_at, at(5));
}

#[test]
fn test_recent_does_not_mutate() {
    use SignalLabel::{Buy, Neutral, Sell};

    let mut store = HistoryStore::new(HistoryState::default(), 10);
    store.append("k", Buy, at(0));
    store.append("k", Neutral, at(1));
    store.append("k", Sell, at(2));

    assert_eq!(store.recent("k", 2).len(), 2);
    assert_eq!(store.recent("k", 2)[1].label, Sell);
    assert_eq!(store.state().trails["k"].len(), 3);
    assert!(store.recent("missing", 5).is_empty());
}

#[test]
fn test_history_keys_are_independent() {
    let mut store = HistoryStore::new(HistoryState::default(), 10);
    assert!(store.append("a/H1", SignalLabel::Buy, at(0)));
    assert!(store.append("a/H4", SignalLabel::Buy, at(0)));
    assert_eq!(store.last_label("a/H1"), Some(SignalLabel::Buy));
    assert_eq!(store.last_label("b/H1"), None);
}
