//! Trailing high/low range

use crate::common::math;
use crate::models::indicators::PriceBar;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub high: f64,
    pub low: f64,
}

/// Rolling range for every bar, `None` until `lookback` bars are available
pub fn calculate_range_series(bars: &[PriceBar], lookback: usize) -> Vec<Option<PriceRange>> {
    let highs: Vec<f64> = bars.iter().map(|b| b.high).collect();
    let lows: Vec<f64> = bars.iter().map(|b| b.low).collect();
    (0..bars.len())
        .map(|i| {
            Some(PriceRange {
                high: math::highest(&highs[..=i], lookback)?,
                low: math::lowest(&lows[..=i], lookback)?,
            })
        })
        .collect()
}
