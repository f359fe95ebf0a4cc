//! Order block detection: the last candle before an impulsive move.

use crate::domain::candle::Candle;
use crate::domain::zone::{Bias, Zone, ZoneConfidence, ZoneKind};

/// Candles reserved at the end of the series for impulse confirmation.
const CONFIRMATION_BARS: usize = 3;
/// How many candles after a block may carry the impulse.
const IMPULSE_WINDOW: usize = 3;
/// Lookback for the average-range baseline.
const RANGE_LOOKBACK: usize = 10;
/// Impulse must exceed this multiple of the average range.
const IMPULSE_MULT: f64 = 1.5;
/// Relative moves above this multiple are tagged high-confidence.
const HIGH_CONFIDENCE_MULT: f64 = 2.0;
/// Entry retracement into the block from the breakout side.
const ENTRY_RETRACE: f64 = 0.382;

/// Scan backward for the candle whose direction was followed, within the
/// next one to three candles, by a move exceeding 1.5x the ten-candle
/// average range. The block is that candle's body; entry sits at the
/// 38.2% retracement from the breakout side. The block with the largest
/// relative move wins; above 2.0x it is tagged high-confidence.
pub fn detect_order_block(candles: &[Candle]) -> Option<Zone> {
    if candles.len() < RANGE_LOOKBACK + CONFIRMATION_BARS + 1 {
        return None;
    }

    let mut best: Option<(f64, Zone)> = None;

    for i in (RANGE_LOOKBACK..candles.len() - CONFIRMATION_BARS).rev() {
        let avg_range = candles[i - RANGE_LOOKBACK..i]
            .iter()
            .map(Candle::range)
            .sum::<f64>()
            / RANGE_LOOKBACK as f64;
        if avg_range == 0.0 {
            continue;
        }

        let current = &candles[i];
        let after = &candles[i + 1..(i + 1 + IMPULSE_WINDOW).min(candles.len())];

        let (bias, move_size) = if current.is_bullish() {
            let peak = after.iter().map(|c| c.high).fold(f64::MIN, f64::max);
            (Bias::Bullish, peak - current.high)
        } else {
            let trough = after.iter().map(|c| c.low).fold(f64::MAX, f64::min);
            (Bias::Bearish, current.low - trough)
        };

        let relative = move_size / avg_range;
        if relative <= IMPULSE_MULT {
            continue;
        }
        if best.as_ref().is_some_and(|(r, _)| *r >= relative) {
            continue;
        }

        let top = current.body_top();
        let bottom = current.body_bottom();
        let entry = match bias {
            Bias::Bullish => top - (top - bottom) * ENTRY_RETRACE,
            Bias::Bearish => bottom + (top - bottom) * ENTRY_RETRACE,
        };

        best = Some((
            relative,
            Zone {
                kind: ZoneKind::OrderBlock,
                bias,
                top,
                bottom,
                entry,
                stop_hint: None,
                index: i,
                time: current.time,
                confidence: if relative > HIGH_CONFIDENCE_MULT {
                    ZoneConfidence::High
                } else {
                    ZoneConfidence::Medium
                },
            },
        ));
    }

    best.map(|(_, zone)| zone)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
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

    // Bearish filler: it never catches an upward impulse in its window.
    fn quiet(i: usize) -> Candle {
        candle(i, 100.2, 100.5, 99.5, 100.0)
    }

    /// Quiet base, one bullish candle at `block_at`, then an impulse of
    /// `impulse` points in the following candle.
    fn with_impulse(len: usize, block_at: usize, impulse: f64) -> Vec<Candle> {
        let mut candles: Vec<Candle> = (0..len).map(quiet).collect();
        candles[block_at] = candle(block_at, 100.0, 101.0, 99.8, 100.8);
        candles[block_at + 1] = candle(
            block_at + 1,
            100.8,
            101.0 + impulse,
            100.6,
            100.9 + impulse,
        );
        candles
    }

    #[test]
    fn detects_bullish_block_before_impulse() {
        // Average range 1.0; a 2.0-point move clears the 1.5x bar.
        let candles = with_impulse(20, 14, 2.0);
        let zone = detect_order_block(&candles).unwrap();
        assert_eq!(zone.bias, Bias::Bullish);
        assert_eq!(zone.index, 14);
        // Body of the block candle: open 100.0, close 100.8.
        assert_relative_eq!(zone.top, 100.8);
        assert_relative_eq!(zone.bottom, 100.0);
        assert_relative_eq!(zone.entry, 100.8 - 0.8 * 0.382, epsilon = 1e-9);
        assert_eq!(zone.confidence, ZoneConfidence::Medium);
    }

    #[test]
    fn strong_impulse_is_high_confidence() {
        let candles = with_impulse(20, 14, 2.5);
        let zone = detect_order_block(&candles).unwrap();
        assert_eq!(zone.confidence, ZoneConfidence::High);
    }

    #[test]
    fn weak_move_is_ignored() {
        let candles = with_impulse(20, 14, 1.2);
        assert!(detect_order_block(&candles).is_none());
    }

    #[test]
    fn largest_relative_move_wins() {
        let mut candles = with_impulse(30, 12, 2.0);
        // A second, stronger impulse later in the series.
        candles[20] = candle(20, 100.0, 101.0, 99.8, 100.8);
        candles[21] = candle(21, 100.8, 104.5, 100.6, 104.4);
        let zone = detect_order_block(&candles).unwrap();
        assert_eq!(zone.index, 20);
        assert_eq!(zone.confidence, ZoneConfidence::High);
    }

    #[test]
    fn bearish_block_mirrors_entry() {
        let mut candles: Vec<Candle> = (0..20).map(quiet).collect();
        // Bearish block candle with a tighter low than the filler, then a drop.
        candles[14] = candle(14, 100.8, 101.0, 99.8, 100.0);
        candles[15] = candle(15, 100.0, 100.2, 97.5, 97.6);
        let zone = detect_order_block(&candles).unwrap();
        assert_eq!(zone.bias, Bias::Bearish);
        assert_relative_eq!(zone.entry, 100.0 + 0.8 * 0.382, epsilon = 1e-9);
    }

    #[test]
    fn block_in_confirmation_tail_is_excluded() {
        // Impulse in the final three candles cannot be confirmed yet.
        let candles = with_impulse(20, 18, 3.0);
        assert!(detect_order_block(&candles).is_none());
    }

    #[test]
    fn neutral_on_short_series() {
        let candles: Vec<Candle> = (0..13).map(quiet).collect();
        assert!(detect_order_block(&candles).is_none());
    }

    #[test]
    fn flat_series_finds_nothing() {
        let candles: Vec<Candle> = (0..30).map(quiet).collect();
        assert!(detect_order_block(&candles).is_none());
    }
}
