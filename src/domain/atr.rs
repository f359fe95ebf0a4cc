//! Average True Range over a trailing window.

use crate::domain::candle::Candle;

/// Mean of the last `period` true ranges, ending at the last candle.
///
/// This is the value that scales every stop-loss and target distance, so
/// the window is trailing, never centered. Returns 0.0 when fewer than
/// `period + 1` candles exist (one extra candle is needed for the first
/// previous close).
pub fn average_true_range(candles: &[Candle], period: usize) -> f64 {
    if period == 0 || candles.len() < period + 1 {
        return 0.0;
    }

    let mut tr_values: Vec<f64> = Vec::with_capacity(candles.len() - 1);
    for i in 1..candles.len() {
        tr_values.push(candles[i].true_range(candles[i - 1].close));
    }

    let window = &tr_values[tr_values.len() - period..];
    window.iter().sum::<f64>() / period as f64
}
