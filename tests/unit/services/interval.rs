//! Unit tests for interval resolution and resampling

use chrono::{Duration, TimeZone, Utc};
use rsiwatch::models::indicators::PriceBar;
use rsiwatch::services::{resample, resolve_interval, FetchError};

#[test]
fn test_resolve_native_intervals() {
    let spec = resolve_interval("1h").unwrap();
    assert_eq!(spec.native, "60m");
    assert_eq!(spec.bucket_secs, None);

    assert_eq!(resolve_interval("1d").unwrap().native, "1d");
    assert_eq!(resolve_interval("15m").unwrap().native, "15m");
}

#[test]
fn test_resolve_resampled_intervals() {
    let four = resolve_interval("4h").unwrap();
    assert_eq!(four.native, "60m");
    assert_eq!(four.bucket_secs, Some(4 * 3600));
    assert_eq!(resolve_interval("2h").unwrap().bucket_secs, Some(7200));
}

#[test]
fn test_resolve_rejects_unknown_interval() {
    assert!(matches!(
        resolve_interval("3h"),
        Err(FetchError::UnsupportedInterval(ref s)) if s == "3h"
    ));
}

#[test]
fn test_resample_hourly_into_four_hour_buckets() {
    let base = Utc.with_ymd_and_hms(2026, 8, 3, 0, 0, 0).unwrap();
    // Hourly bars from 01:00 through 08:00
    let bars: Vec<PriceBar> = (1..=8)
        .map(|h| {
            let open = 100.0 + h as f64;
            PriceBar::new(open, open + 0.5, open - 0.5, open + 0.25, base + Duration::hours(h))
        })
        .collect();

    let out = resample(&bars, 4 * 3600);
    assert_eq!(out.len(), 3);

    assert_eq!(out[0].timestamp, base);
    assert_eq!(out[0].open, 101.0);
    assert_eq!(out[0].high, 103.5);
    assert_eq!(out[0].low, 100.5);
    assert_eq!(out[0].close, 103.25);

    assert_eq!(out[1].timestamp, base + Duration::hours(4));
    assert_eq!(out[1].open, 104.0);
    assert_eq!(out[1].close, 107.25);

    // Incomplete trailing bucket holds the 08:00 bar alone
    assert_eq!(out[2].timestamp, base + Duration::hours(8));
    assert_eq!(out[2].open, 108.0);
    assert_eq!(out[2].close, 108.25);
}
