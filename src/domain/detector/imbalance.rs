//! Buying/selling pressure imbalance over recent candles.

use crate::domain::candle::Candle;

/// Candles inspected for pressure.
const PRESSURE_WINDOW: usize = 5;
/// One side must carry more than this share of total pressure.
const IMBALANCE_RATIO: f64 = 0.7;

/// True when one side dominates the last five candles.
///
/// Bullish candles contribute their body to buying pressure and their
/// upper wick to selling pressure (where buyers were absorbed); bearish
/// candles the mirror image.
pub fn detect_imbalance(candles: &[Candle]) -> bool {
    if candles.len() < 10 {
        return false;
    }

    let mut buying = 0.0;
    let mut selling = 0.0;

    for c in &candles[candles.len() - PRESSURE_WINDOW..] {
        if c.is_bullish() {
            buying += c.body();
            selling += c.upper_wick();
        } else {
            selling += c.body();
            buying += c.lower_wick();
        }
    }

    let total = buying + selling;
    if total == 0.0 {
        return false;
    }

    buying / total > IMBALANCE_RATIO || selling / total > IMBALANCE_RATIO
}
