//! Unit tests for Bollinger Bands

use rsiwatch::indicators::volatility::{
    calculate_bollinger_bands, calculate_bollinger_series, middle_band_slope,
};

#[test]
fn test_bollinger_known_values() {
    let closes = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
    let bands = calculate_bollinger_bands(&closes, 8, 2.0).unwrap();
    assert!((bands.middle - 5.0).abs() < 1e-12);
    assert!((bands.std_dev - 2.0).abs() < 1e-12);
    assert!((bands.upper - 9.0).abs() < 1e-12);
    assert!((bands.lower - 1.0).abs() < 1e-12);
}

#[test]
fn test_bollinger_flat_prices_collapse() {
    let closes = vec![100.0; 25];
    let bands = calculate_bollinger_bands(&closes, 20, 2.0).unwrap();
    assert_eq!(bands.std_dev, 0.0);
    assert_eq!(bands.upper, bands.middle);
    assert_eq!(bands.lower, bands.middle);
}

#[test]
fn test_bollinger_series_alignment() {
    let closes: Vec<f64> = (0..30).map(|i| 100.0 + (i as f64).sin()).collect();
    let series = calculate_bollinger_series(&closes, 20, 2.0);
    assert_eq!(series.len(), 30);
    assert!(series[..19].iter().all(Option::is_none));
    for bands in series[19..].iter().flatten() {
        assert!(bands.lower <= bands.middle && bands.middle <= bands.upper);
    }
}

#[test]
fn test_middle_band_slope() {
    let closes = [1.0, 2.0, 3.0, 4.0, 5.0];
    let series = calculate_bollinger_series(&closes, 2, 2.0);
    let slope = middle_band_slope(&series);
    assert_eq!(slope[0], None);
    assert_eq!(slope[1], None);
    assert_eq!(slope[2], Some(1.0));
    assert_eq!(slope[4], Some(1.0));
}
