//! RSI (Relative Strength Index) indicator

use crate::common::math;

/// RSI when average gain and loss are both zero
pub const RSI_FLAT: f64 = 50.0;

/// Convert smoothed gain/loss into an RSI value
///
/// RS = avg_gain / avg_loss, RSI = 100 - 100 / (1 + RS).
/// Zero loss with positive gain is 100; no movement at all is 50.
pub fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return if avg_gain > 0.0 { 100.0 } else { RSI_FLAT };
    }
    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}

/// Calculate RSI for every close, aligned to the input
///
/// Gains and losses are smoothed with `alpha = 1 / period`, seeded with the
/// first bar-over-bar delta. The first `period` entries are `None`: the
/// smoother has seen fewer than `period` deltas there.
pub fn calculate_rsi_series(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; closes.len()];
    if period == 0 || closes.len() < 2 {
        return out;
    }

    let alpha = 1.0 / period as f64;
    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;

    for i in 1..closes.len() {
        let delta = closes[i] - closes[i - 1];
        let gain = delta.max(0.0);
        let loss = (-delta).max(0.0);

        if i == 1 {
            avg_gain = gain;
            avg_loss = loss;
        } else {
            avg_gain = math::smooth(avg_gain, gain, alpha);
            avg_loss = math::smooth(avg_loss, loss, alpha);
        }

        if i >= period {
            out[i] = Some(rsi_from_averages(avg_gain, avg_loss));
        }
    }

    out
}

/// Latest RSI value, if the series is long enough
pub fn calculate_rsi(closes: &[f64], period: usize) -> Option<f64> {
    calculate_rsi_series(closes, period).last().copied().flatten()
}
