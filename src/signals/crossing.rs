//! RSI level crossing detection

use crate::models::indicators::IndicatorSnapshot;
use crate::models::signal::{CrossingEvent, Direction};

/// Detect a crossing of `level` between two consecutive RSI values.
///
/// Strict on the departure side, inclusive on the landing side, so a value
/// that touches the level and stays there fires once.
pub fn detect_crossing(prev_rsi: f64, curr_rsi: f64, level: f64) -> Option<Direction> {
    if prev_rsi < level && level <= curr_rsi {
        Some(Direction::Up)
    } else if prev_rsi > level && level >= curr_rsi {
        Some(Direction::Down)
    } else {
        None
    }
}

/// All crossings of `levels` at the candle of `current`.
pub fn detect_crossings(
    instrument: &str,
    timeframe: &str,
    previous: &IndicatorSnapshot,
    current: &IndicatorSnapshot,
    levels: &[f64],
) -> Vec<CrossingEvent> {
    let (Some(prev_rsi), Some(curr_rsi)) = (previous.rsi, current.rsi) else {
        return Vec::new();
    };

    levels
        .iter()
        .filter_map(|&level| {
            detect_crossing(prev_rsi, curr_rsi, level).map(|direction| CrossingEvent {
                instrument: instrument.to_string(),
                timeframe: timeframe.to_string(),
                level,
                direction,
                candle_timestamp: current.timestamp,
            })
        })
        .collect()
}
