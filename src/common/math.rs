//! Windowed statistics over `f64` slices

/// Simple moving average of the last `period` values
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let window = &values[values.len() - period..];
    Some(window.iter().sum::<f64>() / period as f64)
}

/// Population standard deviation of the last `period` values
pub fn standard_deviation(values: &[f64], period: usize) -> Option<f64> {
    let mean = sma(values, period)?;
    let window = &values[values.len() - period..];
    let variance = window.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / period as f64;
    Some(variance.sqrt())
}

/// One step of exponential smoothing with factor `alpha`
pub fn smooth(previous: f64, value: f64, alpha: f64) -> f64 {
    previous + alpha * (value - previous)
}

/// Highest value of the last `period` values
pub fn highest(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    values[values.len() - period..]
        .iter()
        .copied()
        .reduce(f64::max)
}

/// Lowest value of the last `period` values
pub fn lowest(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    values[values.len() - period..]
        .iter()
        .copied()
        .reduce(f64::min)
}
