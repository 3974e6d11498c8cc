//! Shared data models spanning the engine layers.

pub mod indicators;
pub mod signal;

pub use indicators::{IndicatorParams, IndicatorSnapshot, PriceBar, PriceSeries};
pub use signal::{
    Classification, CrossingEvent, Direction, Divergence, SignalFamily, SignalLabel, Trend,
};
