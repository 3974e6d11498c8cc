//! Price/RSI divergence annotation

use crate::models::indicators::IndicatorSnapshot;
use crate::models::signal::Divergence;

/// RSI at or below this counts as the low zone for bullish divergence
pub const BULLISH_ZONE: f64 = 40.0;
/// RSI at or above this counts as the high zone for bearish divergence
pub const BEARISH_ZONE: f64 = 60.0;

/// Compare price and RSI change over the trailing `window` bars.
///
/// Falling price with rising RSI while RSI <= 40 is bullish; rising price
/// with falling RSI while RSI >= 60 is bearish. Anything else, including
/// missing RSI at either end, yields `None`.
pub fn detect_divergence(snapshots: &[IndicatorSnapshot], window: usize) -> Option<Divergence> {
    if window == 0 || snapshots.len() <= window {
        return None;
    }
    let current = snapshots.last()?;
    let past = &snapshots[snapshots.len() - 1 - window];

    let rsi_now = current.rsi?;
    let rsi_change = rsi_now - past.rsi?;
    let price_change = current.close - past.close;

    if price_change < 0.0 && rsi_change > 0.0 && rsi_now <= BULLISH_ZONE {
        Some(Divergence::BullishDivergence)
    } else if price_change > 0.0 && rsi_change < 0.0 && rsi_now >= BEARISH_ZONE {
        Some(Divergence::BearishDivergence)
    } else {
        None
    }
}
