//! Indicator input validation errors

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IndicatorError {
    #[error("{name} must be at least 1")]
    ZeroWindow { name: &'static str },

    #[error("band multiplier must be finite and non-negative, got {0}")]
    InvalidMultiplier(f64),

    #[error("bar at index {index} ({timestamp}) is not after its predecessor")]
    UnorderedSeries {
        index: usize,
        timestamp: DateTime<Utc>,
    },
}
