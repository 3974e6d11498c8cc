//! Unit tests for windowed statistics

use rsiwatch::common::math::{highest, lowest, sma, smooth, standard_deviation};

#[test]
fn test_sma_uses_trailing_window() {
    assert_eq!(sma(&[1.0, 2.0, 3.0, 4.0], 2), Some(3.5));
    assert_eq!(sma(&[1.0, 2.0, 3.0, 4.0], 4), Some(2.5));
}

#[test]
fn test_sma_insufficient_data() {
    assert!(sma(&[1.0, 2.0], 3).is_none());
    assert!(sma(&[1.0, 2.0], 0).is_none());
}

#[test]
fn test_population_standard_deviation() {
    let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
    let std = standard_deviation(&values, 8).unwrap();
    assert!((std - 2.0).abs() < 1e-12);
}

#[test]
fn test_smooth_moves_toward_value() {
    assert_eq!(smooth(10.0, 20.0, 0.5), 15.0);
    assert_eq!(smooth(10.0, 20.0, 0.0), 10.0);
}

#[test]
fn test_extrema() {
    let values = [3.0, 9.0, 1.0, 4.0, 5.0];
    assert_eq!(highest(&values, 3), Some(5.0));
    assert_eq!(lowest(&values, 3), Some(1.0));
    assert_eq!(highest(&values, 5), Some(9.0));
    assert!(lowest(&values, 6).is_none());
}
