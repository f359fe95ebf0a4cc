//! Key-level mitigation: price returning to an older swing level and
//! rejecting off it.

use crate::domain::candle::Candle;
use crate::domain::swing::find_swing_points;

/// Candles treated as "recent" interaction history.
const RECENT_WINDOW: usize = 10;
/// Oldest candle considered when deriving key levels.
const LEVEL_LOOKBACK: usize = 30;
/// Current close must sit within this fraction of a level.
const CLOSE_PROXIMITY: f64 = 0.005;
/// A recent wick within this fraction of the level counts as a touch.
const TOUCH_PROXIMITY: f64 = 0.003;

/// True when the current close sits near a swing level derived from the
/// older window (candles 30..10 back) and a recent candle touched that
/// level and closed rejecting through it.
pub fn detect_mitigation(candles: &[Candle]) -> bool {
    if candles.len() < 20 {
        return false;
    }

    let len = candles.len();
    let recent = &candles[len - RECENT_WINDOW..];
    let close = candles[len - 1].close;

    let older = &candles[len.saturating_sub(LEVEL_LOOKBACK)..len - RECENT_WINDOW];
    if older.len() < 5 {
        return false;
    }

    let swings = find_swing_points(older, 3, 3);

    for swing in &swings.highs {
        if (close - swing.price).abs() / swing.price >= CLOSE_PROXIMITY {
            continue;
        }
        let rejected = recent.iter().any(|c| {
            (c.high - swing.price).abs() / swing.price < TOUCH_PROXIMITY && c.close < swing.price
        });
        if rejected {
            return true;
        }
    }

    for swing in &swings.lows {
        if (close - swing.price).abs() / swing.price >= CLOSE_PROXIMITY {
            continue;
        }
        let rejected = recent.iter().any(|c| {
            (c.low - swing.price).abs() / swing.price < TOUCH_PROXIMITY && c.close > swing.price
        });
        if rejected {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn candle(i: usize, open: f64, high: f64, low: f64, close: f64) -> Candle {
        Candle {
            time: Utc.timestamp_opt(i as i64 * 60, 0).unwrap(),
            open,
            high,
            low,
            close,
            volume: 0.0,
        }
    }

    fn flat(i: usize, mid: f64) -> Candle {
        candle(i, mid - 0.1, mid + 0.2, mid - 0.2, mid + 0.1)
    }

    /// Older window carries a clear swing high at 105.0; recent candles
    /// revisit it and reject below.
    fn series_with_rejected_high() -> Vec<Candle> {
        let mut candles = Vec::new();
        // Indices 0..20: quiet at 100 with a spike to 105 at i=10.
        for i in 0..20 {
            if i == 10 {
                candles.push(candle(i, 102.0, 105.0, 101.5, 102.5));
            } else if (8..13).contains(&i) {
                candles.push(flat(i, 102.0));
            } else {
                candles.push(flat(i, 100.0));
            }
        }
        // Recent 10: rally back to the level, touch it, close below.
        for i in 20..29 {
            candles.push(flat(i, 104.0));
        }
        candles.push(candle(29, 104.5, 105.1, 104.0, 104.6));
        candles
    }

    #[test]
    fn rejection_off_old_swing_high_is_mitigation() {
        assert!(detect_mitigation(&series_with_rejected_high()));
    }

    #[test]
    fn far_close_is_not_mitigation() {
        let mut candles = series_with_rejected_high();
        // Close well away from the 105 level.
        let n = candles.len();
        candles[n - 1] = flat(29, 100.0);
        assert!(!detect_mitigation(&candles));
    }

    #[test]
    fn no_touch_is_not_mitigation() {
        let mut candles = series_with_rejected_high();
        // Nearby close but no candle wicked into the level.
        let n = candles.len();
        candles[n - 1] = candle(29, 104.5, 104.6, 104.4, 104.6);
        assert!(!detect_mitigation(&candles));
    }

    #[test]
    fn short_series_is_neutral() {
        let candles: Vec<Candle> = (0..19).map(|i| flat(i, 100.0)).collect();
        assert!(!detect_mitigation(&candles));
    }

    #[test]
    fn quiet_series_is_neutral() {
        let candles: Vec<Candle> = (0..40).map(|i| flat(i, 100.0)).collect();
        assert!(!detect_mitigation(&candles));
    }
}
