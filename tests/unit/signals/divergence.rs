//! Unit tests for divergence annotation

use chrono::{Duration, TimeZone, Utc};
use rsiwatch::models::indicators::IndicatorSnapshot;
use rsiwatch::models::signal::Divergence;
use rsiwatch::signals::divergence::detect_divergence;

fn path(points: &[(f64, f64)]) -> Vec<IndicatorSnapshot> {
    let start = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
    points
        .iter()
        .enumerate()
        .map(|(i, &(close, rsi))| {
            IndicatorSnapshot::new(start + Duration::hours(i as i64), close).with_rsi(rsi)
        })
        .collect()
}

#[test]
fn test_bullish_divergence_in_low_zone() {
    let snapshots = path(&[
        (105.0, 30.0),
        (104.0, 31.0),
        (103.0, 32.0),
        (102.0, 33.0),
        (101.0, 34.0),
        (100.0, 35.0),
    ]);
    assert_eq!(detect_divergence(&snapshots, 5), Some(Divergence::BullishDivergence));
}

#[test]
fn test_bearish_divergence_in_high_zone() {
    let snapshots = path(&[
        (100.0, 75.0),
        (101.0, 74.0),
        (102.0, 73.0),
        (103.0, 72.0),
        (104.0, 71.0),
        (105.0, 70.0),
    ]);
    assert_eq!(detect_divergence(&snapshots, 5), Some(Divergence::BearishDivergence));
}

#[test]
fn test_divergence_outside_zone_is_ignored() {
    let snapshots = path(&[
        (105.0, 40.0),
        (104.0, 41.0),
        (103.0, 42.0),
        (102.0, 43.0),
        (101.0, 44.0),
        (100.0, 45.0),
    ]);
    assert_eq!(detect_divergence(&snapshots, 5), None);
}

#[test]
fn test_agreement_is_not_divergence() {
    let snapshots = path(&[
        (105.0, 35.0),
        (104.0, 34.0),
        (103.0, 33.0),
        (102.0, 32.0),
        (101.0, 31.0),
        (100.0, 30.0),
    ]);
    assert_eq!(detect_divergence(&snapshots, 5), None);
}

#[test]
fn test_divergence_needs_full_window() {
    let snapshots = path(&[
        (105.0, 30.0),
        (100.0, 35.0),
    ]);
    assert_eq!(detect_divergence(&snapshots, 5), None);
    assert_eq!(detect_divergence(&snapshots, 0), None);
}
