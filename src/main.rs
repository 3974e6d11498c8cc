//! rsiwatch
//!
//! One monitoring pass per invocation; schedule it externally (cron,
//! systemd timer) at the candle cadence.

use chrono::Utc;
use dotenvy::dotenv;
use rsiwatch::config::{get_environment, AppConfig};
use rsiwatch::core::monitor::{run_with_state, Monitor};
use rsiwatch::logging;
use rsiwatch::metrics::Metrics;
use rsiwatch::services::notification::NtfySink;
use rsiwatch::services::report::LogReportSink;
use rsiwatch::services::yahoo::YahooProvider;
use rsiwatch::state::{LockError, RunLock};
use tracing::{error, info, warn};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    let environment = get_environment();
    logging::init_logging(&environment);

    let config = AppConfig::from_env().map_err(|e| {
        error!(error = %e, "Invalid configuration");
        e
    })?;

    info!(
        environment = %environment,
        instruments = ?config.instruments,
        timeframes = ?config.timeframes.iter().map(|t| t.name.as_str()).collect::<Vec<_>>(),
        "Starting rsiwatch run"
    );

    let lock = match RunLock::acquire(config.state.lock_path(), config.state.run_lock_stale) {
        Ok(lock) => lock,
        Err(LockError::Held { path, age }) => {
            warn!(
                path = %path.display(),
                age_secs = age.as_secs(),
                "Another run holds the lock, exiting"
            );
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let metrics = Metrics::new()?;
    let provider = YahooProvider::new(
        config.provider.base_url.clone(),
        config.provider.timeout,
        config.provider.retry,
    )?;
    let notifier = NtfySink::new(
        config.notify.base_url.clone(),
        config.notify.topic.clone(),
        config.provider.timeout,
    )?;
    let reports = LogReportSink;

    let monitor =
        Monitor::new(&config, &provider, &notifier, &reports, &metrics).with_run_lock(&lock);

    match run_with_state(&monitor, &config.state, Utc::now()).await {
        Ok(summary) => info!(
            processed = summary.timeframes_processed,
            skipped = summary.timeframes_skipped,
            crossings = summary.crossings_detected,
            sent = summary.notifications_sent,
            suppressed = summary.notifications_suppressed,
            failed = summary.notification_failures,
            "Run complete"
        ),
        Err(e) => error!(error = %e, "Failed to persist run state"),
    }

    if let Some(path) = &config.metrics_textfile {
        if let Err(e) = metrics.write_textfile(path) {
            warn!(path = %path.display(), error = %e, "Failed to write metrics textfile");
        }
    }

    Ok(())
}
