//! Unit tests for the signal classifier

use chrono::{TimeZone, Utc};
use rsiwatch::models::indicators::IndicatorSnapshot;
use rsiwatch::models::signal::{SignalLabel, Trend};
use rsiwatch::signals::classifier::{trend_between, SignalClassifier};

/// Snapshot with bands 98..102 (ma 100, std 1, k 2)
fn snapshot(rsi: f64, close: f64) -> IndicatorSnapshot {
    let ts = Utc.with_ymd_and_hms(2026, 4, 1, 12, 0, 0).unwrap();
    IndicatorSnapshot::new(ts, close)
        .with_rsi(rsi)
        .with_bands(100.0, 1.0, 2.0)
}

fn classify(rsi: f64, close: f64) -> SignalLabel {
    SignalClassifier::default()
        .classify(&snapshot(rsi, close), &snapshot(50.0, 100.0))
        .label
}

#[test]
fn test_extreme_rule_wins_over_soft_rule() {
    assert_eq!(classify(25.0, 97.5), SignalLabel::ExtremeBuy);
    assert_eq!(classify(75.0, 102.5), SignalLabel::ExtremeSell);
}

#[test]
fn test_extreme_requires_band_condition() {
    assert_eq!(classify(25.0, 99.0), SignalLabel::Buy);
    assert_eq!(classify(75.0, 101.0), SignalLabel::Sell);
}

#[test]
fn test_band_condition_alone_is_not_extreme() {
    assert_eq!(classify(50.0, 97.0), SignalLabel::Neutral);
    assert_eq!(classify(50.0, 103.0), SignalLabel::Neutral);
}

#[test]
fn test_threshold_boundaries_are_inclusive() {
    assert_eq!(classify(30.0, 98.0), SignalLabel::ExtremeBuy);
    assert_eq!(classify(70.0, 102.0), SignalLabel::ExtremeSell);
    assert_eq!(classify(35.0, 100.0), SignalLabel::Buy);
    assert_eq!(classify(65.0, 100.0), SignalLabel::Sell);
    assert_eq!(classify(35.1, 100.0), SignalLabel::Neutral);
    assert_eq!(classify(64.9, 100.0), SignalLabel::Neutral);
}

#[test]
fn test_missing_rsi_is_neutral() {
    let ts = Utc.with_ymd_and_hms(2026, 4, 1, 12, 0, 0).unwrap();
    let current = IndicatorSnapshot::new(ts, 100.0);
    let result = SignalClassifier::default().classify(&current, &current);
    assert_eq!(result.label, SignalLabel::Neutral);
    assert!(result.rationale.contains("not yet available"));
}

#[test]
fn test_missing_bands_fall_back_to_rsi_rules() {
    let ts = Utc.with_ymd_and_hms(2026, 4, 1, 12, 0, 0).unwrap();
    let current = IndicatorSnapshot::new(ts, 100.0).with_rsi(20.0);
    let result = SignalClassifier::default().classify(&current, &current);
    assert_eq!(result.label, SignalLabel::Buy);
}

#[test]
fn test_trend_qualifier() {
    assert_eq!(trend_between(&snapshot(40.0, 100.0), &snapshot(45.0, 100.0)), Trend::Up);
    assert_eq!(trend_between(&snapshot(45.0, 100.0), &snapshot(40.0, 100.0)), Trend::Down);
    assert_eq!(trend_between(&snapshot(45.0, 100.0), &snapshot(45.0, 100.0)), Trend::Down);
}

#[test]
fn test_rationale_cites_value_trend_and_band() {
    let result = SignalClassifier::default().classify(&snapshot(25.0, 97.5), &snapshot(20.0, 97.0));
    assert_eq!(result.trend, Trend::Up);
    assert!(result.rationale.contains("RSI 25.0"), "{}", result.rationale);
    assert!(result.rationale.contains("(up)"), "{}", result.rationale);
    assert!(result.rationale.contains("lower band"), "{}", result.rationale);

    let neutral =
        SignalClassifier::default().classify(&snapshot(50.0, 100.0), &snapshot(55.0, 100.0));
    assert!(neutral.rationale.contains("no band condition"), "{}", neutral.rationale);
}
