//! Shared zone value object for Order Blocks, Breaker Blocks and Fair
//! Value Gaps.
//!
//! The three pattern kinds share one shape and one validity/mitigation
//! implementation; only the invalidation boundary differs per kind. Zones
//! are produced fresh on every analysis call; mitigation is a
//! point-in-time re-scan of recent candles, never a persisted flag.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::candle::Candle;

/// Directional bias of a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Bias {
    Bullish,
    Bearish,
}

/// Confidence tag attached to a detected zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneConfidence {
    High,
    Medium,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZoneKind {
    OrderBlock,
    /// A failed, flipped order block. `level` is the swept swing price the
    /// zone straddles; validity is judged against it rather than the edges.
    Breaker { level: f64 },
    FairValueGap,
}

/// A price zone with a derived entry, produced by one of the detectors.
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    pub kind: ZoneKind,
    pub bias: Bias,
    pub top: f64,
    pub bottom: f64,
    pub entry: f64,
    pub stop_hint: Option<f64>,
    pub index: usize,
    pub time: DateTime<Utc>,
    pub confidence: ZoneConfidence,
}

/// How many recent candles a mitigation re-scan inspects.
const MITIGATION_LOOKBACK: usize = 10;

impl Zone {
    /// Whether current price has stayed on the favorable side of the zone.
    ///
    /// A bullish order block or gap dies once price is back below its
    /// bottom, a bearish one once price is back above its top. Breakers
    /// are judged against the swept level they reclaimed.
    pub fn is_valid(&self, current_price: f64) -> bool {
        let boundary = match self.kind {
            ZoneKind::Breaker { level } => level,
            ZoneKind::OrderBlock | ZoneKind::FairValueGap => match self.bias {
                Bias::Bullish => self.bottom,
                Bias::Bearish => self.top,
            },
        };
        match self.bias {
            Bias::Bullish => current_price > boundary,
            Bias::Bearish => current_price < boundary,
        }
    }

    /// Whether any of the last ten candles overlapped the zone.
    pub fn is_mitigated(&self, candles: &[Candle]) -> bool {
        let start = candles.len().saturating_sub(MITIGATION_LOOKBACK);
        candles[start..]
            .iter()
            .any(|c| c.low <= self.top && c.high >= self.bottom)
    }
}
