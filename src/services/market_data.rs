//! Market data provider interface.

use crate::models::indicators::PriceSeries;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed provider payload: {0}")]
    Payload(String),

    #[error("invalid provider URL: {0}")]
    Url(String),

    #[error("unsupported interval {0:?}")]
    UnsupportedInterval(String),

    #[error("empty series for {instrument} {interval}")]
    Empty { instrument: String, interval: String },
}

impl FetchError {
    /// Whether another attempt could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Http(_) | FetchError::Payload(_) | FetchError::Empty { .. } => true,
            FetchError::Status { status, .. } => *status == 429 || *status >= 500,
            FetchError::Url(_) | FetchError::UnsupportedInterval(_) => false,
        }
    }
}

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Chronological OHLC bars for `instrument` at `interval`, covering
    /// `lookback` (provider range syntax such as `60d`).
    ///
    /// Retries are handled inside the provider; an error here means the
    /// provider gave up.
    async fn fetch(
        &self,
        instrument: &str,
        interval: &str,
        lookback: &str,
    ) -> Result<PriceSeries, FetchError>;
}
