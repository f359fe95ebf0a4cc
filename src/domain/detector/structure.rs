//! Market structure classification and structure-shift detection.

use serde::Serialize;
use std::fmt;

use crate::domain::candle::Candle;
use crate::domain::swing::{find_swing_points, SwingPoint};

/// Swing window used for structure and MSS classification.
const STRUCTURE_BARS: usize = 3;
/// Proximity to a swing level (fraction of price) that reads as
/// accumulation/distribution rather than plain ranging.
const CONSOLIDATION_PROXIMITY: f64 = 0.02;
/// Break beyond a prior swing level (fraction of price) that counts as a
/// market structure shift.
const MSS_BREAK: f64 = 0.001;

/// Trend/regime label for one timeframe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Structure {
    Bullish,
    Bearish,
    Ranging,
    /// Sideways price pinned near the most recent swing low.
    Accumulation,
    /// Sideways price pinned near the most recent swing high.
    Distribution,
}

impl Structure {
    pub fn is_directional(&self) -> bool {
        matches!(self, Structure::Bullish | Structure::Bearish)
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Structure::Bullish => "bullish",
            Structure::Bearish => "bearish",
            Structure::Ranging => "ranging",
            Structure::Accumulation => "accumulation",
            Structure::Distribution => "distribution",
        };
        f.write_str(label)
    }
}

/// Classify the current market structure from the last two swing highs
/// and lows (3/3 window). Fewer than two of either reads as ranging.
pub fn detect_structure(candles: &[Candle]) -> Structure {
    if candles.len() < 10 {
        return Structure::Ranging;
    }

    let swings = find_swing_points(candles, STRUCTURE_BARS, STRUCTURE_BARS);
    if swings.highs.len() < 2 || swings.lows.len() < 2 {
        return Structure::Ranging;
    }

    let [prev_high, last_high] = last_two(&swings.highs);
    let [prev_low, last_low] = last_two(&swings.lows);
    let close = candles[candles.len() - 1].close;

    // Higher highs + higher lows.
    if last_high > prev_high && last_low > prev_low {
        return Structure::Bullish;
    }
    // Lower highs + lower lows.
    if last_high < prev_high && last_low < prev_low {
        return Structure::Bearish;
    }
    if (close - last_low).abs() / last_low < CONSOLIDATION_PROXIMITY {
        return Structure::Accumulation;
    }
    if (close - last_high).abs() / last_high < CONSOLIDATION_PROXIMITY {
        return Structure::Distribution;
    }
    Structure::Ranging
}

/// Market Structure Shift: the last close breaks the second-most-recent
/// swing high or low by more than 0.1%.
pub fn detect_mss(candles: &[Candle]) -> bool {
    if candles.len() < 10 {
        return false;
    }

    let swings = find_swing_points(candles, STRUCTURE_BARS, STRUCTURE_BARS);
    if swings.highs.len() < 2 || swings.lows.len() < 2 {
        return false;
    }

    let close = candles[candles.len() - 1].close;
    let prev_high = swings.highs[swings.highs.len() - 2].price;
    let prev_low = swings.lows[swings.lows.len() - 2].price;

    close > prev_high * (1.0 + MSS_BREAK) || close < prev_low * (1.0 - MSS_BREAK)
}

fn last_two(points: &[SwingPoint]) -> [f64; 2] {
    [
        points[points.len() - 2].price,
        points[points.len() - 1].price,
    ]
}
