//! Fair Value Gap detection: a 3-candle imbalance left unfilled by the
//! middle candle.

use crate::domain::candle::Candle;
use crate::domain::zone::{Bias, Zone, ZoneConfidence, ZoneKind};

/// The middle candle's range must stay within this fraction of the
/// average outer range (indecision filter).
const MIDDLE_RANGE_LIMIT: f64 = 0.5;
/// Entry retracement into the gap.
const ENTRY_RETRACE: f64 = 0.382;

/// Scan every consecutive triple for a gap between the first candle and
/// the third that the middle candle's range did not fill. The most recent
/// qualifying gap is returned, with entry at the 38.2% retrace into it.
pub fn detect_fvg(candles: &[Candle]) -> Option<Zone> {
    if candles.len() < 3 {
        return None;
    }

    let mut latest: Option<Zone> = None;

    for i in 0..candles.len() - 2 {
        let c1 = &candles[i];
        let c2 = &candles[i + 1];
        let c3 = &candles[i + 2];

        let avg_outer = (c1.range() + c3.range()) / 2.0;
        if c2.range() > avg_outer * MIDDLE_RANGE_LIMIT {
            continue;
        }

        let zone = if c3.low > c1.high {
            let gap = c3.low - c1.high;
            Zone {
                kind: ZoneKind::FairValueGap,
                bias: Bias::Bullish,
                top: c3.low,
                bottom: c1.high,
                entry: c1.high + gap * ENTRY_RETRACE,
                stop_hint: None,
                index: i + 1,
                time: c2.time,
                confidence: ZoneConfidence::Medium,
            }
        } else if c3.high < c1.low {
            let gap = c1.low - c3.high;
            Zone {
                kind: ZoneKind::FairValueGap,
                bias: Bias::Bearish,
                top: c1.low,
                bottom: c3.high,
                entry: c1.low - gap * ENTRY_RETRACE,
                stop_hint: None,
                index: i + 1,
                time: c2.time,
                confidence: ZoneConfidence::Medium,
            }
        } else {
            continue;
        };

        latest = Some(zone);
    }

    latest
}
