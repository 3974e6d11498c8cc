use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete market state, ordered from most bullish to most bearish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SignalLabel {
    ExtremeBuy,
    Buy,
    Neutral,
    Sell,
    ExtremeSell,
}

impl SignalLabel {
    pub fn family(&self) -> Option<SignalFamily> {
        match self {
            SignalLabel::ExtremeBuy | SignalLabel::Buy => Some(SignalFamily::Bullish),
            SignalLabel::Sell | SignalLabel::ExtremeSell => Some(SignalFamily::Bearish),
            SignalLabel::Neutral => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SignalLabel::ExtremeBuy => "ExtremeBuy",
            SignalLabel::Buy => "Buy",
            SignalLabel::Neutral => "Neutral",
            SignalLabel::Sell => "Sell",
            SignalLabel::ExtremeSell => "ExtremeSell",
        }
    }
}

impl fmt::Display for SignalLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalFamily {
    Bullish,
    Bearish,
}

/// RSI direction between the previous and current bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Up,
    Down,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Up => f.write_str("up"),
            Trend::Down => f.write_str("down"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub label: SignalLabel,
    pub trend: Trend,
    pub rationale: String,
}

/// Price/RSI disagreement flagged alongside a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Divergence {
    BullishDivergence,
    BearishDivergence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One RSI crossing of a configured level at a specific candle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossingEvent {
    pub instrument: String,
    pub timeframe: String,
    pub level: f64,
    pub direction: Direction,
    pub candle_timestamp: DateTime<Utc>,
}

impl CrossingEvent {
    /// Key under which the event is recorded once notified.
    ///
    /// Layout: `instrument|timeframe|level|direction|candle` with the candle
    /// time in RFC 3339 UTC, always last.
    pub fn dedup_key(&self) -> String {
        format!(
            "{}|{}|{}|{}|{}",
            self.instrument,
            self.timeframe,
            self.level,
            self.direction,
            self.candle_timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
        )
    }
}
