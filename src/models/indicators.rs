use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One OHLC aggregate over a fixed interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl PriceBar {
    pub fn new(open: f64, high: f64, low: f64, close: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
        }
    }
}

/// Chronological bars for one (instrument, interval) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSeries {
    pub instrument: String,
    pub interval: String,
    pub bars: Vec<PriceBar>,
}

impl PriceSeries {
    pub fn new(
        instrument: impl Into<String>,
        interval: impl Into<String>,
        bars: Vec<PriceBar>,
    ) -> Self {
        Self {
            instrument: instrument.into(),
            interval: interval.into(),
            bars,
        }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn last(&self) -> Option<&PriceBar> {
        self.bars.last()
    }
}

/// Window lengths and multipliers for one indicator pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorParams {
    pub rsi_period: usize,
    pub band_window: usize,
    pub band_multiplier: f64,
    pub extrema_window: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            band_window: 20,
            band_multiplier: 2.0,
            extrema_window: 20,
        }
    }
}

/// Indicator values aligned to one bar of the input series.
///
/// Windowed fields are `None` until their window has filled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub timestamp: DateTime<Utc>,
    pub close: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moving_average: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub std_dev: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper_band: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower_band: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ma_slope: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range_high: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range_low: Option<f64>,
}

impl IndicatorSnapshot {
    pub fn new(timestamp: DateTime<Utc>, close: f64) -> Self {
        Self {
            timestamp,
            close,
            rsi: None,
            moving_average: None,
            std_dev: None,
            upper_band: None,
            lower_band: None,
            ma_slope: None,
            range_high: None,
            range_low: None,
        }
    }

    pub fn with_rsi(mut self, rsi: f64) -> Self {
        self.rsi = Some(rsi);
        self
    }

    pub fn with_bands(mut self, moving_average: f64, std_dev: f64, multiplier: f64) -> Self {
        self.moving_average = Some(moving_average);
        self.std_dev = Some(std_dev);
        self.upper_band = Some(moving_average + multiplier * std_dev);
        self.lower_band = Some(moving_average - multiplier * std_dev);
        self
    }
}
