//! Swing-point (local extremum) detection.

use chrono::{DateTime, Utc};

use crate::domain::candle::Candle;

/// A confirmed local price extremum.
#[derive(Debug, Clone, PartialEq)]
pub struct SwingPoint {
    pub index: usize,
    pub price: f64,
    pub time: DateTime<Utc>,
}

/// Swing highs and lows for one series, oldest first.
#[derive(Debug, Clone, Default)]
pub struct SwingPoints {
    pub highs: Vec<SwingPoint>,
    pub lows: Vec<SwingPoint>,
}

/// Find swing highs and lows using a symmetric strict-inequality window.
///
/// A candle is a swing high when its high is strictly greater than every
/// high within `left_bars` candles before and `right_bars` after it; the
/// mirrored strict-minimum rule applies to lows. Equal-height neighbors
/// disqualify a candidate; ties never count. Candles without a full
/// window on both sides are not considered.
pub fn find_swing_points(candles: &[Candle], left_bars: usize, right_bars: usize) -> SwingPoints {
    let mut swings = SwingPoints::default();
    if left_bars == 0 || right_bars == 0 || candles.len() < left_bars + right_bars + 1 {
        return swings;
    }

    for i in left_bars..candles.len() - right_bars {
        let window = &candles[i - left_bars..=i + right_bars];

        let is_high = window
            .iter()
            .enumerate()
            .all(|(j, c)| j == left_bars || c.high < candles[i].high);
        if is_high {
            swings.highs.push(SwingPoint {
                index: i,
                price: candles[i].high,
                time: candles[i].time,
            });
        }

        let is_low = window
            .iter()
            .enumerate()
            .all(|(j, c)| j == left_bars || c.low > candles[i].low);
        if is_low {
            swings.lows.push(SwingPoint {
                index: i,
                price: candles[i].low,
                time: candles[i].time,
            });
        }
    }

    swings
}
