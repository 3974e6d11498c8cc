//! Input checks run before any indicator pass

use super::error::IndicatorError;
use crate::models::indicators::{IndicatorParams, PriceBar};

pub fn validate_params(params: &IndicatorParams) -> Result<(), IndicatorError> {
    if params.rsi_period == 0 {
        return Err(IndicatorError::ZeroWindow { name: "rsi period" });
    }
    if params.band_window == 0 {
        return Err(IndicatorError::ZeroWindow { name: "band window" });
    }
    if params.extrema_window == 0 {
        return Err(IndicatorError::ZeroWindow {
            name: "extrema window",
        });
    }
    if !params.band_multiplier.is_finite() || params.band_multiplier < 0.0 {
        return Err(IndicatorError::InvalidMultiplier(params.band_multiplier));
    }
    Ok(())
}

/// Bars must be strictly increasing in time (unique timestamps).
pub fn validate_chronological(bars: &[PriceBar]) -> Result<(), IndicatorError> {
    for (index, pair) in bars.windows(2).enumerate() {
        if pair[1].timestamp <= pair[0].timestamp {
            return Err(IndicatorError::UnorderedSeries {
                index: index + 1,
                timestamp: pair[1].timestamp,
            });
        }
    }
    Ok(())
}
