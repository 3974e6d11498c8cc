//! RSI / Bollinger band monitor with once-per-event notifications.

pub mod common;
pub mod config;
pub mod core;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;
pub mod state;
