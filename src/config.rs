//! Startup configuration resolved once from the environment

use crate::models::indicators::IndicatorParams;
use crate::services::interval::resolve_interval;
use crate::services::yahoo::{RetryPolicy, DEFAULT_BASE_URL};
use crate::signals::classifier::ClassifierThresholds;
use chrono::FixedOffset;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_TIMEFRAMES: &str = "H1:1h:60d,H4:4h:180d";

/// Upper bound for `DEDUP_RETENTION_DAYS` (ten years)
pub const MAX_RETENTION_DAYS: i64 = 3650;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("{0} must not be empty")]
    Empty(&'static str),
}

/// Current deployment environment (`APP_ENV`, defaults to `development`)
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "development".to_string())
}

/// Immutable per-timeframe settings.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeframeConfig {
    pub name: String,
    /// Sampling interval, e.g. `1h`
    pub interval: String,
    /// Provider range covering the history to load, e.g. `60d`
    pub lookback: String,
    pub rsi_period: usize,
    pub band_window: usize,
    pub band_multiplier: f64,
    pub extrema_window: usize,
    pub alert_levels: Vec<f64>,
}

impl TimeframeConfig {
    pub fn indicator_params(&self) -> IndicatorParams {
        IndicatorParams {
            rsi_period: self.rsi_period,
            band_window: self.band_window,
            band_multiplier: self.band_multiplier,
            extrema_window: self.extrema_window,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StateConfig {
    pub dedup_path: PathBuf,
    pub history_path: PathBuf,
    /// Entries kept per history trail
    pub history_limit: usize,
    /// Entries shown in reports
    pub history_display: usize,
    pub dedup_retention: chrono::Duration,
    pub run_lock_stale: Duration,
}

impl StateConfig {
    pub fn lock_path(&self) -> PathBuf {
        let mut name = self.dedup_path.clone().into_os_string();
        name.push(".lock");
        PathBuf::from(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProviderConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotifyConfig {
    pub base_url: String,
    pub topic: String,
    /// Send a status message per timeframe on every run
    pub test_mode: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub instruments: Vec<String>,
    pub timeframes: Vec<TimeframeConfig>,
    pub thresholds: ClassifierThresholds,
    pub divergence_window: usize,
    pub state: StateConfig,
    pub provider: ProviderConfig,
    pub notify: NotifyConfig,
    /// Offset used when rendering times in notifications
    pub display_offset: FixedOffset,
    pub metrics_textfile: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let instruments = parse_list(
            &get("INSTRUMENTS")
                .or_else(|| get("PAIR"))
                .unwrap_or_else(|| "EURJPY=X".to_string()),
        );
        if instruments.is_empty() {
            return Err(ConfigError::Empty("INSTRUMENTS"));
        }

        let rsi_period: usize = parse_or(&get, "RSI_PERIOD", 14)?;
        let band_window: usize = parse_or(&get, "BAND_WINDOW", 20)?;
        let band_multiplier: f64 = parse_or(&get, "BAND_MULTIPLIER", 2.0)?;
        let extrema_window: usize = parse_or(&get, "EXTREMA_WINDOW", 20)?;
        positive("RSI_PERIOD", rsi_period)?;
        positive("BAND_WINDOW", band_window)?;
        positive("EXTREMA_WINDOW", extrema_window)?;
        if !band_multiplier.is_finite() || band_multiplier < 0.0 {
            return Err(invalid("BAND_MULTIPLIER", band_multiplier, "must be non-negative"));
        }

        let levels_raw = get("ALERT_LEVELS").unwrap_or_else(|| "20,80".to_string());
        let alert_levels = parse_list(&levels_raw)
            .iter()
            .map(|v| match v.parse::<f64>() {
                Ok(level) if (0.0..=100.0).contains(&level) => Ok(level),
                _ => Err(invalid("ALERT_LEVELS", &levels_raw, "levels must be numbers in 0..=100")),
            })
            .collect::<Result<Vec<f64>, _>>()?;

        let timeframes_raw = get("TIMEFRAMES").unwrap_or_else(|| DEFAULT_TIMEFRAMES.to_string());
        let timeframes = parse_list(&timeframes_raw)
            .iter()
            .map(|entry| {
                let parts: Vec<&str> = entry.split(':').map(str::trim).collect();
                let &[name, interval, lookback] = parts.as_slice() else {
                    return Err(invalid("TIMEFRAMES", entry, "expected name:interval:lookback"));
                };
                if name.is_empty() || lookback.is_empty() {
                    return Err(invalid("TIMEFRAMES", entry, "expected name:interval:lookback"));
                }
                resolve_interval(interval)
                    .map_err(|e| invalid("TIMEFRAMES", entry, &e.to_string()))?;
                Ok(TimeframeConfig {
                    name: name.to_string(),
                    interval: interval.to_string(),
                    lookback: lookback.to_string(),
                    rsi_period,
                    band_window,
                    band_multiplier,
                    extrema_window,
                    alert_levels: alert_levels.clone(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if timeframes.is_empty() {
            return Err(ConfigError::Empty("TIMEFRAMES"));
        }

        let state_dir = get("HOME")
            .map(|home| PathBuf::from(home).join(".cache").join("rsiwatch"))
            .unwrap_or_else(|| PathBuf::from(".rsiwatch"));

        let history_limit: usize = parse_or(&get, "HISTORY_LIMIT", 10)?;
        positive("HISTORY_LIMIT", history_limit)?;
        let retention_days: i64 = parse_or(&get, "DEDUP_RETENTION_DAYS", 30)?;
        if !(1..=MAX_RETENTION_DAYS).contains(&retention_days) {
            return Err(invalid(
                "DEDUP_RETENTION_DAYS",
                retention_days,
                &format!("must be between 1 and {}", MAX_RETENTION_DAYS),
            ));
        }

        let state = StateConfig {
            dedup_path: get("RSI_LOCK_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| state_dir.join("sent.json")),
            history_path: get("HISTORY_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| state_dir.join("history.json")),
            history_limit,
            history_display: parse_or(&get, "HISTORY_DISPLAY", 5)?,
            dedup_retention: chrono::Duration::days(retention_days),
            run_lock_stale: Duration::from_secs(parse_or(&get, "RUN_LOCK_STALE_SECS", 600)?),
        };

        let attempts: usize = parse_or(&get, "MAX_RETRY", 3)?;
        positive("MAX_RETRY", attempts)?;
        let retry_sleep: f64 = parse_or(&get, "RETRY_SLEEP", 1.5)?;
        let delay = Duration::try_from_secs_f64(retry_sleep).map_err(|_| {
            invalid("RETRY_SLEEP", retry_sleep, "must be a non-negative number of seconds")
        })?;
        let timeout_secs: u64 = parse_or(&get, "FETCH_TIMEOUT_SECS", 20)?;
        positive("FETCH_TIMEOUT_SECS", timeout_secs as usize)?;

        let provider = ProviderConfig {
            base_url: get("PROVIDER_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout: Duration::from_secs(timeout_secs),
            retry: RetryPolicy { attempts, delay },
        };

        let notify = NotifyConfig {
            base_url: get("NTFY_URL").unwrap_or_else(|| "https://ntfy.sh".to_string()),
            topic: get("NTFY_TOPIC").unwrap_or_else(|| "rsiwatch".to_string()),
            test_mode: get("NTFY_TEST").is_some_and(|v| v.trim() == "1"),
        };

        let offset_hours: i32 = parse_or(&get, "DISPLAY_UTC_OFFSET_HOURS", 0)?;
        let display_offset = FixedOffset::east_opt(offset_hours * 3600)
            .ok_or_else(|| invalid("DISPLAY_UTC_OFFSET_HOURS", offset_hours, "out of range"))?;

        Ok(Self {
            instruments,
            timeframes,
            thresholds: ClassifierThresholds::default(),
            divergence_window: parse_or(&get, "DIVERGENCE_WINDOW", 5)?,
            state,
            provider,
            notify,
            display_offset,
            metrics_textfile: get("METRICS_TEXTFILE").map(PathBuf::from),
        })
    }
}

fn invalid(key: &'static str, value: impl ToString, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_or<T, G>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| invalid(key, &raw, &e.to_string())),
        None => Ok(default),
    }
}

fn positive(key: &'static str, value: usize) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(invalid(key, value, "must be at least 1"));
    }
    Ok(())
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
