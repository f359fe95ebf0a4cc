//! Signal result model emitted by the engine.

use serde::Serialize;
use std::fmt;

/// Trade direction after multi-timeframe alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Long,
    Short,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Long => f.write_str("LONG"),
            Direction::Short => f.write_str("SHORT"),
        }
    }
}

/// Final signal label derived from direction and confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Signal {
    #[default]
    NoTrade,
    WeakLong,
    Long,
    StrongLong,
    WeakShort,
    Short,
    StrongShort,
}

impl Signal {
    /// NO_TRADE below 60 confidence or without direction; STRONG at >=85,
    /// plain at >=70, WEAK otherwise.
    pub fn from_confidence(direction: Option<Direction>, confidence: u8) -> Self {
        let Some(direction) = direction else {
            return Signal::NoTrade;
        };
        if confidence < 60 {
            return Signal::NoTrade;
        }
        match direction {
            Direction::Long if confidence >= 85 => Signal::StrongLong,
            Direction::Long if confidence >= 70 => Signal::Long,
            Direction::Long => Signal::WeakLong,
            Direction::Short if confidence >= 85 => Signal::StrongShort,
            Direction::Short if confidence >= 70 => Signal::Short,
            Direction::Short => Signal::WeakShort,
        }
    }
}

/// Complete, always-well-formed output of one `analyze` call.
///
/// A default instance (NO_TRADE, zeros) means "no actionable opinion",
/// never an internal failure.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SignalResult {
    pub signal: Signal,
    pub direction: Option<Direction>,
    pub confidence: u8,
    pub entry_price: f64,
    pub stop_loss: f64,
    pub take_profit_1: f64,
    pub take_profit_2: f64,
    pub take_profit_3: f64,
    pub risk_reward_ratio: f64,
    pub position_size: f64,
    /// Human-readable per-timeframe structure summary.
    pub structure: String,
    pub liquidity_swept: bool,
    /// One line per confidence factor or bonus that fired.
    pub explanation: Vec<String>,
}
