//! Bollinger Bands indicator

use crate::common::math;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
    pub std_dev: f64,
}

/// Calculate Bollinger Bands over the last `period` closes
///
/// Middle Band = SMA(period)
/// Upper Band = Middle + (multiplier * population standard deviation)
/// Lower Band = Middle - (multiplier * population standard deviation)
pub fn calculate_bollinger_bands(
    closes: &[f64],
    period: usize,
    multiplier: f64,
) -> Option<BollingerBands> {
    let middle = math::sma(closes, period)?;
    let std = math::standard_deviation(closes, period)?;

    Some(BollingerBands {
        upper: middle + (multiplier * std),
        middle,
        lower: middle - (multiplier * std),
        std_dev: std,
    })
}

/// Bands for every close, `None` until `period` closes are available
pub fn calculate_bollinger_series(
    closes: &[f64],
    period: usize,
    multiplier: f64,
) -> Vec<Option<BollingerBands>> {
    (0..closes.len())
        .map(|i| calculate_bollinger_bands(&closes[..=i], period, multiplier))
        .collect()
}

/// Bar-over-bar change of the middle band
pub fn middle_band_slope(bands: &[Option<BollingerBands>]) -> Vec<Option<f64>> {
    (0..bands.len())
        .map(|i| {
            if i == 0 {
                return None;
            }
            match (bands[i - 1], bands[i]) {
                (Some(prev), Some(curr)) => Some(curr.middle - prev.middle),
                _ => None,
            }
        })
        .collect()
}
