//! Per-timeframe report hand-off and the cross-timeframe resonance view

use crate::models::indicators::IndicatorSnapshot;
use crate::models::signal::{Classification, Divergence, SignalFamily, SignalLabel};
use crate::state::history::HistoryEntry;
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Serialize)]
pub struct TimeframeReport {
    pub instrument: String,
    pub timeframe: String,
    pub latest_close: f64,
    pub snapshot: IndicatorSnapshot,
    pub classification: Classification,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub divergence: Option<Divergence>,
    pub history: Vec<HistoryEntry>,
}

/// Consumer of processed timeframes (page renderer, log, ...).
pub trait ReportSink: Send + Sync {
    fn publish(&self, report: &TimeframeReport);

    /// Called once per instrument after all of its timeframes ran.
    fn finish_instrument(&self, instrument: &str, resonance: Option<SignalFamily>);
}

/// Every label in the same family; `None` for an empty or mixed set.
pub fn resonance(labels: &[SignalLabel]) -> Option<SignalFamily> {
    let first = labels.first()?.family()?;
    labels
        .iter()
        .all(|label| label.family() == Some(first))
        .then_some(first)
}

/// Writes reports to the log.
pub struct LogReportSink;

impl ReportSink for LogReportSink {
    fn publish(&self, report: &TimeframeReport) {
        let trail: Vec<&str> = report.history.iter().map(|e| e.label.as_str()).collect();
        info!(
            instrument = %report.instrument,
            timeframe = %report.timeframe,
            close = report.latest_close,
            rsi = report.snapshot.rsi,
            label = %report.classification.label,
            divergence = ?report.divergence,
            trail = ?trail,
            "{}",
            report.classification.rationale
        );
    }

    fn finish_instrument(&self, instrument: &str, resonance: Option<SignalFamily>) {
        if let Some(family) = resonance {
            info!(instrument = %instrument, family = ?family, "All timeframes agree");
        }
    }
}
