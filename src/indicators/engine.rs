//! Per-bar indicator pass over a price series

use super::error::IndicatorError;
use super::momentum::calculate_rsi_series;
use super::structure::calculate_range_series;
use super::validation::{validate_chronological, validate_params};
use super::volatility::{calculate_bollinger_series, middle_band_slope};
use crate::models::indicators::{IndicatorParams, IndicatorSnapshot, PriceSeries};

/// Compute one snapshot per bar, same length and order as the input.
pub fn compute(
    series: &PriceSeries,
    params: &IndicatorParams,
) -> Result<Vec<IndicatorSnapshot>, IndicatorError> {
    validate_params(params)?;
    validate_chronological(&series.bars)?;

    let closes = series.closes();
    let rsi = calculate_rsi_series(&closes, params.rsi_period);
    let bands = calculate_bollinger_series(&closes, params.band_window, params.band_multiplier);
    let slope = middle_band_slope(&bands);
    let ranges = calculate_range_series(&series.bars, params.extrema_window);

    let snapshots = series
        .bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            let mut snapshot = IndicatorSnapshot::new(bar.timestamp, bar.close);
            if let Some(value) = rsi[i] {
                snapshot = snapshot.with_rsi(value);
            }
            if let Some(b) = bands[i] {
                snapshot = snapshot.with_bands(b.middle, b.std_dev, params.band_multiplier);
            }
            snapshot.ma_slope = slope[i];
            if let Some(range) = ranges[i] {
                snapshot.range_high = Some(range.high);
                snapshot.range_low = Some(range.low);
            }
            snapshot
        })
        .collect();

    Ok(snapshots)
}

/// Last two snapshots as `(previous, current)`.
pub fn last_pair(
    snapshots: &[IndicatorSnapshot],
) -> Option<(&IndicatorSnapshot, &IndicatorSnapshot)> {
    match snapshots {
        [.., previous, current] => Some((previous, current)),
        _ => None,
    }
}
