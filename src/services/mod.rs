//! External collaborators: price provider, notification and report sinks.

pub mod interval;
pub mod market_data;
pub mod notification;
pub mod report;
pub mod yahoo;

pub use interval::{resample, resolve_interval, IntervalSpec};
pub use market_data::{FetchError, MarketDataProvider};
pub use notification::{Notification, NotificationSink, NotifyError, NtfySink};
pub use report::{resonance, LogReportSink, ReportSink, TimeframeReport};
pub use yahoo::{RetryPolicy, YahooProvider};
