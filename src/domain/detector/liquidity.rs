//! Liquidity analysis: stop hunts, resting-order levels and zones.
//!
//! All functions return a neutral value when history is insufficient.
//! Level extraction needs 30 candles for stable swings, volume-confirmed
//! sweeps 20, the plain sweep and grab variants 10.

use crate::domain::candle::Candle;
use crate::domain::swing::find_swing_points;
use crate::domain::zone::Bias;

/// Envelope lookback for the plain sweep/grab check.
const SWEEP_LOOKBACK: usize = 9;
/// Envelope + volume lookback for the confirmed sweep.
const CONFIRMED_LOOKBACK: usize = 19;
/// Offset applied to swing levels when placing stop clusters.
const STOP_OFFSET: f64 = 0.001;
/// Proximity (fraction of price) that counts as a touch of a level.
const TOUCH_PROXIMITY: f64 = 0.002;
/// Relative difference under which two successive swings form a double.
const DOUBLE_TOLERANCE: f64 = 0.005;
/// Volume above this multiple of the trailing average confirms a sweep.
const VOLUME_SPIKE: f64 = 1.3;

/// Result of a sweep check. `direction` is `None` when nothing was swept.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sweep {
    pub direction: Option<Bias>,
    /// Wick-dominance score 0–100; only the volume-confirmed variant
    /// populates it.
    pub strength: f64,
    pub volume_ratio: Option<f64>,
}

impl Sweep {
    pub fn detected(&self) -> bool {
        self.direction.is_some()
    }
}

/// A single resting-liquidity level derived from a swing point.
#[derive(Debug, Clone, PartialEq)]
pub struct LiquidityLevel {
    pub price: f64,
    pub touches: usize,
    pub strong: bool,
}

/// Buy-side and sell-side stop clusters.
#[derive(Debug, Clone, Default)]
pub struct LiquidityLevels {
    /// Just above swing highs, where shorts' stops rest.
    pub buy_stops: Vec<LiquidityLevel>,
    /// Just below swing lows, where longs' stops rest.
    pub sell_stops: Vec<LiquidityLevel>,
}

/// Levels plus equal-high/equal-low flags.
#[derive(Debug, Clone, Default)]
pub struct LiquidityZones {
    pub levels: LiquidityLevels,
    /// Mean price of two successive swing highs within 0.5% of each other.
    pub double_top: Option<f64>,
    /// Mean price of two successive swing lows within 0.5% of each other.
    pub double_bottom: Option<f64>,
}

/// A directional stop hunt: which level was taken and whether the close
/// rejected back through it.
#[derive(Debug, Clone, PartialEq)]
pub struct LiquidityGrab {
    pub direction: Bias,
    pub level: f64,
    pub rejected: bool,
}

fn envelope(candles: &[Candle]) -> (f64, f64) {
    let high = candles.iter().map(|c| c.high).fold(f64::MIN, f64::max);
    let low = candles.iter().map(|c| c.low).fold(f64::MAX, f64::min);
    (high, low)
}

/// Wick beyond the 9-candle envelope with a close back inside it.
pub fn detect_liquidity_sweep(candles: &[Candle]) -> Sweep {
    if candles.len() < SWEEP_LOOKBACK + 1 {
        return Sweep::default();
    }

    let last = &candles[candles.len() - 1];
    let prev = &candles[candles.len() - 1 - SWEEP_LOOKBACK..candles.len() - 1];
    let (env_high, env_low) = envelope(prev);

    // Bullish sweep took the sell stops under the envelope low.
    if last.low < env_low && last.close > env_low {
        return Sweep {
            direction: Some(Bias::Bullish),
            ..Sweep::default()
        };
    }
    if last.high > env_high && last.close < env_high {
        return Sweep {
            direction: Some(Bias::Bearish),
            ..Sweep::default()
        };
    }
    Sweep::default()
}

/// Sweep with a wick-dominance strength score and an optional volume
/// spike bonus.
///
/// Strength starts at `(1 - body/total_range) * 100`; when the series
/// carries volume and the triggering candle traded more than 1.3x the
/// trailing average, 15 is added, capped at 100.
pub fn volume_confirmed_sweep(candles: &[Candle]) -> Sweep {
    if candles.len() < CONFIRMED_LOOKBACK + 1 {
        return Sweep::default();
    }

    let last = &candles[candles.len() - 1];
    let prev = &candles[candles.len() - 1 - CONFIRMED_LOOKBACK..candles.len() - 1];
    let (env_high, env_low) = envelope(prev);

    let total_range = last.range();
    if total_range == 0.0 {
        return Sweep::default();
    }

    let direction = if last.low < env_low && last.close > env_low {
        Bias::Bullish
    } else if last.high > env_high && last.close < env_high {
        Bias::Bearish
    } else {
        return Sweep::default();
    };

    let mut strength = (1.0 - last.body() / total_range) * 100.0;

    let avg_volume = prev.iter().map(|c| c.volume).sum::<f64>() / prev.len() as f64;
    let volume_ratio = if avg_volume > 0.0 {
        Some(last.volume / avg_volume)
    } else {
        None
    };
    if volume_ratio.is_some_and(|r| r > VOLUME_SPIKE) {
        strength += 15.0;
    }

    Sweep {
        direction: Some(direction),
        strength: strength.min(100.0),
        volume_ratio,
    }
}

/// Stop clusters sitting just beyond 5/5 swing highs and lows, ranked by
/// how often price has touched the underlying swing.
pub fn detect_liquidity_levels(candles: &[Candle]) -> LiquidityLevels {
    let mut levels = LiquidityLevels::default();
    if candles.len() < 30 {
        return levels;
    }

    let swings = find_swing_points(candles, 5, 5);

    for swing in &swings.highs {
        let touches = candles
            .iter()
            .filter(|c| (c.high - swing.price).abs() / swing.price < TOUCH_PROXIMITY)
            .count();
        levels.buy_stops.push(LiquidityLevel {
            price: swing.price * (1.0 + STOP_OFFSET),
            touches,
            strong: touches >= 3,
        });
    }
    for swing in &swings.lows {
        let touches = candles
            .iter()
            .filter(|c| (c.low - swing.price).abs() / swing.price < TOUCH_PROXIMITY)
            .count();
        levels.sell_stops.push(LiquidityLevel {
            price: swing.price * (1.0 - STOP_OFFSET),
            touches,
            strong: touches >= 3,
        });
    }

    levels
}

/// Levels plus double-top/double-bottom detection over the last two
/// same-side swings.
pub fn get_liquidity_zones(candles: &[Candle]) -> LiquidityZones {
    let mut zones = LiquidityZones {
        levels: detect_liquidity_levels(candles),
        ..LiquidityZones::default()
    };
    if candles.len() < 30 {
        return zones;
    }

    let swings = find_swing_points(candles, 5, 5);

    if let [.., a, b] = swings.highs.as_slice() {
        let mean = (a.price + b.price) / 2.0;
        if (a.price - b.price).abs() / mean < DOUBLE_TOLERANCE {
            zones.double_top = Some(mean);
        }
    }
    if let [.., a, b] = swings.lows.as_slice() {
        let mean = (a.price + b.price) / 2.0;
        if (a.price - b.price).abs() / mean < DOUBLE_TOLERANCE {
            zones.double_bottom = Some(mean);
        }
    }

    zones
}

/// Directional sweep variant reporting the exact level taken and whether
/// the close rejected back through it.
pub fn detect_liquidity_grab(candles: &[Candle]) -> Option<LiquidityGrab> {
    if candles.len() < SWEEP_LOOKBACK + 1 {
        return None;
    }

    let last = &candles[candles.len() - 1];
    let prev = &candles[candles.len() - 1 - SWEEP_LOOKBACK..candles.len() - 1];
    let (env_high, env_low) = envelope(prev);

    if last.low < env_low {
        return Some(LiquidityGrab {
            direction: Bias::Bullish,
            level: env_low,
            rejected: last.close > env_low,
        });
    }
    if last.high > env_high {
        return Some(LiquidityGrab {
            direction: Bias::Bearish,
            level: env_high,
            rejected: last.close < env_high,
        });
    }
    None
}
