//! Ordered rule classification of an indicator snapshot

use crate::models::indicators::IndicatorSnapshot;
use crate::models::signal::{Classification, SignalLabel, Trend};
use serde::{Deserialize, Serialize};

/// RSI thresholds for the rule set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifierThresholds {
    pub extreme_buy: f64,
    pub extreme_sell: f64,
    pub soft_buy: f64,
    pub soft_sell: f64,
}

impl Default for ClassifierThresholds {
    fn default() -> Self {
        Self {
            extreme_buy: 30.0,
            extreme_sell: 70.0,
            soft_buy: 35.0,
            soft_sell: 65.0,
        }
    }
}

/// Band condition cited in the rationale
fn describe_bands(snapshot: &IndicatorSnapshot, label: SignalLabel) -> String {
    let close = snapshot.close;
    match (snapshot.lower_band, snapshot.upper_band) {
        (Some(lower), _) if label == SignalLabel::ExtremeBuy => {
            format!("close {:.3} at/below lower band {:.3}", close, lower)
        }
        (_, Some(upper)) if label == SignalLabel::ExtremeSell => {
            format!("close {:.3} at/above upper band {:.3}", close, upper)
        }
        (Some(lower), Some(upper)) => format!(
            "no band condition (close {:.3}, bands {:.3}-{:.3})",
            close, lower, upper
        ),
        _ => "bands not yet available".to_string(),
    }
}

#[derive(Debug, Clone, Default)]
pub struct SignalClassifier {
    thresholds: ClassifierThresholds,
}

impl SignalClassifier {
    pub fn new(thresholds: ClassifierThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &ClassifierThresholds {
        &self.thresholds
    }

    /// Classify `current` given its predecessor. First matching rule wins:
    ///
    /// 1. RSI <= extreme buy and close <= lower band: ExtremeBuy
    /// 2. RSI >= extreme sell and close >= upper band: ExtremeSell
    /// 3. RSI <= soft buy: Buy
    /// 4. RSI >= soft sell: Sell
    /// 5. Neutral
    ///
    /// A snapshot without RSI is Neutral.
    pub fn classify(
        &self,
        current: &IndicatorSnapshot,
        previous: &IndicatorSnapshot,
    ) -> Classification {
        let trend = trend_between(previous, current);

        let Some(rsi) = current.rsi else {
            return Classification {
                label: SignalLabel::Neutral,
                trend,
                rationale: format!(
                    "RSI not yet available; {}",
                    describe_bands(current, SignalLabel::Neutral)
                ),
            };
        };

        let t = &self.thresholds;
        let at_lower = current.lower_band.is_some_and(|lower| current.close <= lower);
        let at_upper = current.upper_band.is_some_and(|upper| current.close >= upper);

        let label = if rsi <= t.extreme_buy && at_lower {
            SignalLabel::ExtremeBuy
        } else if rsi >= t.extreme_sell && at_upper {
            SignalLabel::ExtremeSell
        } else if rsi <= t.soft_buy {
            SignalLabel::Buy
        } else if rsi >= t.soft_sell {
            SignalLabel::Sell
        } else {
            SignalLabel::Neutral
        };

        Classification {
            label,
            trend,
            rationale: format!(
                "RSI {:.1} ({}); {}",
                rsi,
                trend,
                describe_bands(current, label)
            ),
        }
    }
}

/// `Up` when RSI rose from `previous` to `current`, otherwise `Down`
pub fn trend_between(previous: &IndicatorSnapshot, current: &IndicatorSnapshot) -> Trend {
    match (previous.rsi, current.rsi) {
        (Some(prev), Some(curr)) if curr > prev => Trend::Up,
        _ => Trend::Down,
    }
}
