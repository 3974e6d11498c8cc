//! Yahoo Finance market data provider implementation

use super::messages::ChartResponse;
use crate::models::indicators::{PriceBar, PriceSeries};
use crate::services::interval::{resample, resolve_interval, IntervalSpec};
use crate::services::market_data::{FetchError, MarketDataProvider};
use async_trait::async_trait;
use backon::{ConstantBuilder, Retryable};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) rsiwatch/0.1";

/// Fixed attempt count with a fixed pause between attempts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub attempts: usize,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            delay: Duration::from_millis(1500),
        }
    }
}

pub struct YahooProvider {
    client: reqwest::Client,
    base_url: String,
    retry: RetryPolicy,
}

impl YahooProvider {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        retry: RetryPolicy,
    ) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self::with_client(base_url, client, retry))
    }

    pub fn with_client(
        base_url: impl Into<String>,
        client: reqwest::Client,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            retry,
        }
    }

    fn chart_url(
        &self,
        instrument: &str,
        spec: &IntervalSpec,
        lookback: &str,
    ) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| FetchError::Url(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| FetchError::Url(format!("{} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(["v8", "finance", "chart", instrument]);
        url.query_pairs_mut()
            .append_pair("interval", spec.native)
            .append_pair("range", lookback)
            .append_pair("includePrePost", "false");
        Ok(url)
    }

    async fn fetch_once(
        &self,
        instrument: &str,
        spec: &IntervalSpec,
        lookback: &str,
    ) -> Result<Vec<PriceBar>, FetchError> {
        let url = self.chart_url(instrument, spec, lookback)?;
        debug!(%url, "Requesting chart");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                message: message.chars().take(200).collect(),
            });
        }

        let body = response.text().await?;
        let chart: ChartResponse =
            serde_json::from_str(&body).map_err(|e| FetchError::Payload(e.to_string()))?;

        if let Some(err) = chart.chart.error {
            return Err(FetchError::Payload(format!("{}: {}", err.code, err.description)));
        }

        let result = chart
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| FetchError::Payload("chart result missing".to_string()))?;

        let mut bars = result.into_bars();
        if let Some(bucket_secs) = spec.bucket_secs {
            bars = resample(&bars, bucket_secs);
        }

        if bars.is_empty() {
            return Err(FetchError::Empty {
                instrument: instrument.to_string(),
                interval: spec.native.to_string(),
            });
        }
        Ok(bars)
    }
}

#[async_trait]
impl MarketDataProvider for YahooProvider {
    async fn fetch(
        &self,
        instrument: &str,
        interval: &str,
        lookback: &str,
    ) -> Result<PriceSeries, FetchError> {
        let spec = resolve_interval(interval)?;

        let backoff = ConstantBuilder::default()
            .with_delay(self.retry.delay)
            .with_max_times(self.retry.attempts.saturating_sub(1));

        let bars = (|| self.fetch_once(instrument, &spec, lookback))
            .retry(backoff)
            .sleep(tokio::time::sleep)
            .when(FetchError::is_retryable)
            .notify(|err: &FetchError, dur: Duration| {
                warn!(
                    instrument = %instrument,
                    interval = %interval,
                    error = %err,
                    retry_in_ms = dur.as_millis() as u64,
                    "Fetch attempt failed, retrying"
                );
            })
            .await?;

        debug!(
            instrument = %instrument,
            interval = %interval,
            bars = bars.len(),
            "Fetched price series"
        );
        Ok(PriceSeries::new(instrument, interval, bars))
    }
}
