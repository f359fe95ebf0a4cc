//! Breaker block detection: a swept swing level reclaimed by price.

use crate::domain::candle::Candle;
use crate::domain::swing::find_swing_points;
use crate::domain::zone::{Bias, Zone, ZoneConfidence, ZoneKind};

/// Margin beyond the swing level that counts as a sweep.
const SWEEP_MARGIN: f64 = 0.001;
/// Entry retracement into the breaker range.
const ENTRY_RETRACE: f64 = 0.382;
/// Stop-hint extension beyond the zone edge.
const STOP_EXTENSION: f64 = 0.5;
/// Candles inspected for the sweep and the straddling candle.
const LOOKBACK: usize = 10;

/// Detect a breaker block: price wicks through the second-most-recent
/// swing level within the last ten candles, then closes back on the other
/// side of it. The zone is the candle that straddles the level; entry is
/// the 38.2% retrace into that range. Needs at least 20 candles and two
/// swings per side.
pub fn detect_breaker_block(candles: &[Candle]) -> Option<Zone> {
    if candles.len() < 20 {
        return None;
    }

    let swings = find_swing_points(candles, 3, 3);
    if swings.highs.len() < 2 || swings.lows.len() < 2 {
        return None;
    }

    let close = candles[candles.len() - 1].close;
    let prev_low = swings.lows[swings.lows.len() - 2].price;
    let prev_high = swings.highs[swings.highs.len() - 2].price;
    let recent = &candles[candles.len() - LOOKBACK..];

    // Bullish breaker: sell stops under the prior low were taken, then
    // price reclaimed the level.
    let swept_low = recent.iter().any(|c| c.low < prev_low * (1.0 - SWEEP_MARGIN));
    if swept_low && close > prev_low {
        if let Some(zone) = straddling_zone(candles, prev_low, Bias::Bullish) {
            return Some(zone);
        }
    }

    let swept_high = recent.iter().any(|c| c.high > prev_high * (1.0 + SWEEP_MARGIN));
    if swept_high && close < prev_high {
        if let Some(zone) = straddling_zone(candles, prev_high, Bias::Bearish) {
            return Some(zone);
        }
    }

    None
}

fn straddling_zone(candles: &[Candle], level: f64, bias: Bias) -> Option<Zone> {
    let start = candles.len() - LOOKBACK;
    let end = candles.len() - 3;
    for i in start..end {
        let c = &candles[i];
        if c.low <= level && level <= c.high {
            let range = c.high - c.low;
            let (entry, stop_hint) = match bias {
                Bias::Bullish => (
                    level + range * ENTRY_RETRACE,
                    Some(c.low - range * STOP_EXTENSION),
                ),
                Bias::Bearish => (
                    level - range * ENTRY_RETRACE,
                    Some(c.high + range * STOP_EXTENSION),
                ),
            };
            return Some(Zone {
                kind: ZoneKind::Breaker { level },
                bias,
                top: c.high,
                bottom: c.low,
                entry,
                stop_hint,
                index: i,
                time: c.time,
                confidence: ZoneConfidence::High,
            });
        }
    }
    None
}
