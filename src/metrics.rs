//! Run counters exported in Prometheus text format

use crate::state::store::{write_atomic, StoreError};
use prometheus::{Encoder, GaugeVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};
use std::path::Path;

pub struct Metrics {
    registry: Registry,
    pub timeframes_processed: IntCounter,
    pub timeframes_skipped: IntCounterVec,
    pub crossings_detected: IntCounter,
    pub notifications_sent: IntCounter,
    pub notifications_suppressed: IntCounter,
    pub notification_failures: IntCounter,
    pub last_rsi: GaugeVec,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new_custom(Some("rsiwatch".to_string()), None)?;

        let timeframes_processed = IntCounter::new(
            "timeframes_processed_total",
            "Timeframes classified during this run",
        )?;
        let timeframes_skipped = IntCounterVec::new(
            Opts::new("timeframes_skipped_total", "Timeframes abandoned during this run"),
            &["reason"],
        )?;
        let crossings_detected = IntCounter::new(
            "crossings_detected_total",
            "RSI level crossings seen on the latest candle",
        )?;
        let notifications_sent = IntCounter::new(
            "notifications_sent_total",
            "Crossing notifications handed to the sink",
        )?;
        let notifications_suppressed = IntCounter::new(
            "notifications_suppressed_total",
            "Crossings already notified by an earlier run",
        )?;
        let notification_failures = IntCounter::new(
            "notification_failures_total",
            "Notifications the sink failed to deliver",
        )?;
        let last_rsi = GaugeVec::new(
            Opts::new("last_rsi", "RSI of the latest candle"),
            &["instrument", "timeframe"],
        )?;

        registry.register(Box::new(timeframes_processed.clone()))?;
        registry.register(Box::new(timeframes_skipped.clone()))?;
        registry.register(Box::new(crossings_detected.clone()))?;
        registry.register(Box::new(notifications_sent.clone()))?;
        registry.register(Box::new(notifications_suppressed.clone()))?;
        registry.register(Box::new(notification_failures.clone()))?;
        registry.register(Box::new(last_rsi.clone()))?;

        Ok(Self {
            registry,
            timeframes_processed,
            timeframes_skipped,
            crossings_detected,
            notifications_sent,
            notifications_suppressed,
            notification_failures,
            last_rsi,
        })
    }

    /// Text exposition of every registered metric
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }

    /// Replace `path` with the current exposition (textfile collector layout).
    pub fn write_textfile(&self, path: &Path) -> Result<(), StoreError> {
        let text = self
            .export()
            .map_err(|e| StoreError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::other(e.to_string()),
            })?;
        write_atomic(path, text.as_bytes())
    }
}
