//! One monitoring pass over every configured instrument and timeframe

use crate::config::{AppConfig, StateConfig, TimeframeConfig};
use crate::indicators::{compute, last_pair};
use crate::metrics::Metrics;
use crate::models::indicators::IndicatorSnapshot;
use crate::models::signal::{Classification, CrossingEvent, SignalLabel};
use crate::services::market_data::MarketDataProvider;
use crate::services::notification::{Notification, NotificationSink};
use crate::services::report::{resonance, ReportSink, TimeframeReport};
use crate::signals::{detect_crossings, detect_divergence, SignalClassifier};
use crate::state::{
    HistoryState, HistoryStore, IdempotencyStore, JsonFileStore, RunLock, SentState, StateStore,
    StoreError,
};
use chrono::{DateTime, FixedOffset, Utc};
use tracing::{debug, info, warn};

/// Fewest bars a timeframe needs to be classified
pub const MIN_BARS: usize = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub timeframes_processed: usize,
    pub timeframes_skipped: usize,
    pub crossings_detected: usize,
    pub notifications_sent: usize,
    pub notifications_suppressed: usize,
    pub notification_failures: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SkipReason {
    Fetch,
    TooFewBars,
    InvalidSeries,
}

impl SkipReason {
    fn as_str(&self) -> &'static str {
        match self {
            SkipReason::Fetch => "fetch",
            SkipReason::TooFewBars => "too_few_bars",
            SkipReason::InvalidSeries => "invalid_series",
        }
    }
}

/// History trail key for one instrument/timeframe pair
pub fn history_key(instrument: &str, timeframe: &str) -> String {
    format!("{}/{}", instrument, timeframe)
}

pub struct Monitor<'a> {
    config: &'a AppConfig,
    provider: &'a dyn MarketDataProvider,
    notifier: &'a dyn NotificationSink,
    reports: &'a dyn ReportSink,
    metrics: &'a Metrics,
    run_lock: Option<&'a RunLock>,
    classifier: SignalClassifier,
}

impl<'a> Monitor<'a> {
    pub fn new(
        config: &'a AppConfig,
        provider: &'a dyn MarketDataProvider,
        notifier: &'a dyn NotificationSink,
        reports: &'a dyn ReportSink,
        metrics: &'a Metrics,
    ) -> Self {
        Self {
            config,
            provider,
            notifier,
            reports,
            metrics,
            run_lock: None,
            classifier: SignalClassifier::new(config.thresholds),
        }
    }

    /// Keep `lock` fresh while the run progresses.
    pub fn with_run_lock(mut self, lock: &'a RunLock) -> Self {
        self.run_lock = Some(lock);
        self
    }

    /// Process every instrument/timeframe against in-memory state.
    ///
    /// A failing timeframe is logged and skipped; the others still run.
    pub async fn run_once(
        &self,
        history: &mut HistoryStore,
        sent: &mut IdempotencyStore,
        now: DateTime<Utc>,
    ) -> RunSummary {
        let mut summary = RunSummary::default();

        for instrument in &self.config.instruments {
            let mut labels = Vec::with_capacity(self.config.timeframes.len());

            for timeframe in &self.config.timeframes {
                match self
                    .process_timeframe(instrument, timeframe, history, sent, now, &mut summary)
                    .await
                {
                    Ok(label) => {
                        summary.timeframes_processed += 1;
                        self.metrics.timeframes_processed.inc();
                        labels.push(label);
                    }
                    Err(reason) => {
                        summary.timeframes_skipped += 1;
                        self.metrics
                            .timeframes_skipped
                            .with_label_values(&[reason.as_str()])
                            .inc();
                    }
                }

                if let Some(lock) = self.run_lock {
                    if let Err(e) = lock.refresh() {
                        warn!(error = %e, "Failed to refresh run lock");
                    }
                }
            }

            if labels.len() == self.config.timeframes.len() {
                self.reports.finish_instrument(instrument, resonance(&labels));
            }
        }

        summary
    }

    async fn process_timeframe(
        &self,
        instrument: &str,
        timeframe: &TimeframeConfig,
        history: &mut HistoryStore,
        sent: &mut IdempotencyStore,
        now: DateTime<Utc>,
        summary: &mut RunSummary,
    ) -> Result<SignalLabel, SkipReason> {
        let tf = timeframe.name.as_str();

        let series = match self
            .provider
            .fetch(instrument, &timeframe.interval, &timeframe.lookback)
            .await
        {
            Ok(series) => series,
            Err(e) => {
                warn!(
                    instrument = %instrument,
                    timeframe = %tf,
                    error = %e,
                    "Fetch failed, skipping timeframe"
                );
                return Err(SkipReason::Fetch);
            }
        };

        if series.len() < MIN_BARS {
            warn!(
                instrument = %instrument,
                timeframe = %tf,
                bars = series.len(),
                min = MIN_BARS,
                "Not enough bars, skipping timeframe"
            );
            return Err(SkipReason::TooFewBars);
        }

        let snapshots = match compute(&series, &timeframe.indicator_params()) {
            Ok(snapshots) => snapshots,
            Err(e) => {
                warn!(
                    instrument = %instrument,
                    timeframe = %tf,
                    error = %e,
                    "Indicator pass failed, skipping timeframe"
                );
                return Err(SkipReason::InvalidSeries);
            }
        };
        let Some((previous, current)) = last_pair(&snapshots) else {
            return Err(SkipReason::TooFewBars);
        };

        let classification = self.classifier.classify(current, previous);
        let divergence = detect_divergence(&snapshots, self.config.divergence_window);
        let crossings =
            detect_crossings(instrument, tf, previous, current, &timeframe.alert_levels);

        if let Some(rsi) = current.rsi {
            self.metrics
                .last_rsi
                .with_label_values(&[instrument, tf])
                .set(rsi);
        }
        debug!(
            instrument = %instrument,
            timeframe = %tf,
            rsi_prev = previous.rsi,
            rsi_now = current.rsi,
            label = %classification.label,
            crossings = crossings.len(),
            "Timeframe evaluated"
        );

        if self.config.notify.test_mode {
            let message = self.status_notification(
                instrument,
                timeframe,
                previous,
                current,
                &classification,
                now,
            );
            if let Err(e) = self.notifier.send(&message).await {
                warn!(
                    instrument = %instrument,
                    timeframe = %tf,
                    error = %e,
                    "Test notification failed"
                );
            }
        }

        for event in &crossings {
            summary.crossings_detected += 1;
            self.metrics.crossings_detected.inc();

            let key = event.dedup_key();
            if !sent.mark_if_absent(&key) {
                summary.notifications_suppressed += 1;
                self.metrics.notifications_suppressed.inc();
                debug!(key = %key, "Crossing already notified");
                continue;
            }

            let message = self.crossing_notification(
                event,
                previous,
                current,
                &classification,
                timeframe,
                now,
            );
            match self.notifier.send(&message).await {
                Ok(()) => {
                    summary.notifications_sent += 1;
                    self.metrics.notifications_sent.inc();
                    info!(
                        instrument = %instrument,
                        timeframe = %tf,
                        level = event.level,
                        direction = %event.direction,
                        "Crossing notified"
                    );
                }
                Err(e) => {
                    summary.notification_failures += 1;
                    self.metrics.notification_failures.inc();
                    warn!(key = %key, error = %e, "Crossing notification failed, not retrying");
                }
            }
        }

        let key = history_key(instrument, tf);
        if history.append(&key, classification.label, now) {
            info!(
                instrument = %instrument,
                timeframe = %tf,
                label = %classification.label,
                "Signal changed"
            );
        }

        let label = classification.label;
        self.reports.publish(&TimeframeReport {
            instrument: instrument.to_string(),
            timeframe: tf.to_string(),
            latest_close: current.close,
            snapshot: *current,
            classification,
            divergence,
            history: history.recent(&key, self.config.state.history_display).to_vec(),
        });

        Ok(label)
    }

    fn crossing_notification(
        &self,
        event: &CrossingEvent,
        previous: &IndicatorSnapshot,
        current: &IndicatorSnapshot,
        classification: &Classification,
        timeframe: &TimeframeConfig,
        now: DateTime<Utc>,
    ) -> Notification {
        let offset = self.config.display_offset;
        let title = format!(
            "{} RSI {} {} {}",
            event.instrument, event.timeframe, event.level, event.direction
        );
        let body = format!(
            "Price: {:.3}\nRSI({}): {} → {}\nCross: {} {}\nSignal: {} ({})\nCandle: {}\nSent: {}",
            current.close,
            timeframe.rsi_period,
            fmt_rsi(previous.rsi),
            fmt_rsi(current.rsi),
            event.level,
            event.direction,
            classification.label,
            classification.rationale,
            fmt_candle(event.candle_timestamp, offset),
            fmt_sent(now, offset),
        );
        Notification::new(title, body)
            .with_priority(4)
            .with_tags(["info", "chart"])
    }

    fn status_notification(
        &self,
        instrument: &str,
        timeframe: &TimeframeConfig,
        previous: &IndicatorSnapshot,
        current: &IndicatorSnapshot,
        classification: &Classification,
        now: DateTime<Utc>,
    ) -> Notification {
        let offset = self.config.display_offset;
        let title = format!("{} RSI {} test", instrument, timeframe.name);
        let body = format!(
            "Price: {:.3}\nRSI({}): {} → {}\nSignal: {} ({})\nCandle: {}\nSent: {}",
            current.close,
            timeframe.rsi_period,
            fmt_rsi(previous.rsi),
            fmt_rsi(current.rsi),
            classification.label,
            classification.rationale,
            fmt_candle(current.timestamp, offset),
            fmt_sent(now, offset),
        );
        Notification::new(title, body)
            .with_priority(2)
            .with_tags(["info", "test"])
    }
}

fn fmt_rsi(rsi: Option<f64>) -> String {
    rsi.map(|v| format!("{:.1}", v))
        .unwrap_or_else(|| "n/a".to_string())
}

fn fmt_candle(ts: DateTime<Utc>, offset: FixedOffset) -> String {
    ts.with_timezone(&offset).format("%Y-%m-%d %H:%M %:z").to_string()
}

fn fmt_sent(ts: DateTime<Utc>, offset: FixedOffset) -> String {
    ts.with_timezone(&offset)
        .format("%Y-%m-%d %H:%M:%S %:z")
        .to_string()
}

/// Load both stores, run one pass, prune and persist.
///
/// Both documents are saved even if one save fails; the first error is
/// returned.
pub async fn run_with_state(
    monitor: &Monitor<'_>,
    state: &StateConfig,
    now: DateTime<Utc>,
) -> Result<RunSummary, StoreError> {
    let history_file: JsonFileStore<HistoryState> = JsonFileStore::new(&state.history_path);
    let sent_file: JsonFileStore<SentState> = JsonFileStore::new(&state.dedup_path);

    let mut history = HistoryStore::new(history_file.load(), state.history_limit);
    let mut sent = IdempotencyStore::new(sent_file.load());

    let summary = monitor.run_once(&mut history, &mut sent, now).await;

    match now.checked_sub_signed(state.dedup_retention) {
        Some(cutoff) => {
            let pruned = sent.prune_before(cutoff);
            if pruned > 0 {
                debug!(pruned, "Pruned expired dedup keys");
            }
        }
        None => warn!(
            retention = ?state.dedup_retention,
            "Retention out of range, skipping prune"
        ),
    }

    let history_result = history_file.save(history.state());
    let sent_result = sent_file.save(sent.state());
    history_result.and(sent_result)?;

    Ok(summary)
}
