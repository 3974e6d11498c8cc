//! Interval resolution and bar resampling

use super::market_data::FetchError;
use crate::models::indicators::PriceBar;
use chrono::{DateTime, Utc};

/// How a requested interval is served by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalSpec {
    /// Interval requested from the provider
    pub native: &'static str,
    /// Bucket width in seconds when native bars are aggregated locally
    pub bucket_secs: Option<i64>,
}

pub fn resolve_interval(interval: &str) -> Result<IntervalSpec, FetchError> {
    let native = |native| IntervalSpec {
        native,
        bucket_secs: None,
    };
    let resampled = |hours: i64| IntervalSpec {
        native: "60m",
        bucket_secs: Some(hours * 3600),
    };

    let spec = match interval {
        "1m" => native("1m"),
        "2m" => native("2m"),
        "5m" => native("5m"),
        "15m" => native("15m"),
        "30m" => native("30m"),
        "1h" | "60m" => native("60m"),
        "90m" => native("90m"),
        "2h" => resampled(2),
        "4h" => resampled(4),
        "1d" => native("1d"),
        "1wk" => native("1wk"),
        other => return Err(FetchError::UnsupportedInterval(other.to_string())),
    };
    Ok(spec)
}

/// Aggregate chronological bars into UTC-aligned buckets of `bucket_secs`.
///
/// Each output bar is stamped with its bucket start; open is the first open,
/// close the last close, high/low the extremes. The final bucket may be
/// incomplete.
pub fn resample(bars: &[PriceBar], bucket_secs: i64) -> Vec<PriceBar> {
    let mut out: Vec<PriceBar> = Vec::new();
    if bucket_secs <= 0 {
        return bars.to_vec();
    }

    for bar in bars {
        let ts = bar.timestamp.timestamp();
        let start = ts - ts.rem_euclid(bucket_secs);
        let Some(bucket_time) = DateTime::<Utc>::from_timestamp(start, 0) else {
            continue;
        };

        match out.last_mut() {
            Some(current) if current.timestamp == bucket_time => {
                current.high = current.high.max(bar.high);
                current.low = current.low.min(bar.low);
                current.close = bar.close;
            }
            _ => out.push(PriceBar::new(bar.open, bar.high, bar.low, bar.close, bucket_time)),
        }
    }

    out
}
