//! Wire types of the `/v8/finance/chart` endpoint

use crate::models::indicators::PriceBar;
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: Chart,
}

#[derive(Debug, Deserialize)]
pub struct Chart {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    #[serde(default)]
    pub error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
pub struct ChartError {
    pub code: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
pub struct ChartIndicators {
    #[serde(default)]
    pub quote: Vec<Quote>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Quote {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
}

impl ChartResult {
    /// Bars with all four prices present, sorted and unique by timestamp.
    pub fn into_bars(self) -> Vec<PriceBar> {
        let quote = self.indicators.quote.into_iter().next().unwrap_or_default();
        let field = |values: &[Option<f64>], i: usize| values.get(i).copied().flatten();

        let mut bars: Vec<PriceBar> = self
            .timestamp
            .iter()
            .enumerate()
            .filter_map(|(i, &ts)| {
                let timestamp = DateTime::<Utc>::from_timestamp(ts, 0)?;
                Some(PriceBar::new(
                    field(&quote.open, i)?,
                    field(&quote.high, i)?,
                    field(&quote.low, i)?,
                    field(&quote.close, i)?,
                    timestamp,
                ))
            })
            .collect();

        bars.sort_by_key(|b| b.timestamp);
        bars.dedup_by_key(|b| b.timestamp);
        bars
    }
}
