//! Unit tests for the trailing price range

use chrono::{Duration, TimeZone, Utc};
use rsiwatch::indicators::structure::calculate_range_series;
use rsiwatch::models::indicators::PriceBar;

#[test]
fn test_range_series_tracks_trailing_extrema() {
    let start = Utc.with_ymd_and_hms(2026, 1, 5, 0, 0, 0).unwrap();
    let highs = [10.0, 12.0, 11.0, 9.0, 8.0];
    let lows = [5.0, 6.0, 4.0, 7.0, 6.5];
    let bars: Vec<PriceBar> = highs
        .iter()
        .zip(lows.iter())
        .enumerate()
        .map(|(i, (&h, &l))| PriceBar::new(l, h, l, h, start + Duration::hours(i as i64)))
        .collect();

    let ranges = calculate_range_series(&bars, 3);
    assert!(ranges[0].is_none());
    assert!(ranges[1].is_none());

    let r2 = ranges[2].unwrap();
    assert_eq!((r2.high, r2.low), (12.0, 4.0));
    let r4 = ranges[4].unwrap();
    assert_eq!((r4.high, r4.low), (11.0, 4.0));
}
