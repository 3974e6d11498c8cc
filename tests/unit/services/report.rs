//! Unit tests for cross-timeframe resonance

use rsiwatch::models::signal::{SignalFamily, SignalLabel};
use rsiwatch::services::resonance;

#[test]
fn test_resonance_requires_agreement() {
    use SignalLabel::*;

    assert_eq!(resonance(&[Buy, ExtremeBuy]), Some(SignalFamily::Bullish));
    assert_eq!(resonance(&[Sell, ExtremeSell, Sell]), Some(SignalFamily::Bearish));
    assert_eq!(resonance(&[Buy, Sell]), None);
    assert_eq!(resonance(&[Buy, Neutral]), None);
    assert_eq!(resonance(&[Neutral, Neutral]), None);
    assert_eq!(resonance(&[]), None);
}
