//! Multi-timeframe signal engine.
//!
//! Fuses detector outputs from three timeframes into one
//! [`SignalResult`]. The engine is a stateless function of its input
//! series and risk config; grouping it as a struct only saves passing the
//! same slices through every stage. It never errors: empty or short
//! series degrade to the default NO_TRADE result.

use crate::domain::atr::average_true_range;
use crate::domain::candle::Candle;
use crate::domain::detector::breaker::detect_breaker_block;
use crate::domain::detector::fvg::detect_fvg;
use crate::domain::detector::imbalance::detect_imbalance;
use crate::domain::detector::liquidity::{volume_confirmed_sweep, Sweep};
use crate::domain::detector::mitigation::detect_mitigation;
use crate::domain::detector::order_block::detect_order_block;
use crate::domain::detector::structure::{detect_mss, detect_structure, Structure};
use crate::domain::risk::{trade_levels, RiskConfig, TradeLevels};
use crate::domain::signal::{Direction, Signal, SignalResult};

/// ATR period used for stop/target scaling.
const ATR_PERIOD: usize = 14;
/// Minimum lower-timeframe history for any opinion at all.
const MIN_LTF_CANDLES: usize = 30;
/// Confirmation-count bonuses: +10 at five active factors, +15 at seven.
const CONFIRMATION_BONUSES: [(usize, i32); 2] = [(5, 10), (7, 15)];

/// Weighted confidence factors. Weights sum to 100 across the set.
const FACTOR_WEIGHTS: [(&str, i32); 9] = [
    ("htf_structure", 20),
    ("htf_ob", 15),
    ("htf_mss", 15),
    ("mtf_fvg", 10),
    ("mtf_breaker", 10),
    ("mtf_ob", 10),
    ("mtf_imbalance", 8),
    ("ltf_fvg", 6),
    ("ltf_mitigation", 6),
];

/// Multi-timeframe SMC signal engine over higher/medium/lower series.
pub struct SmcEngine {
    htf: Vec<Candle>,
    mtf: Vec<Candle>,
    ltf: Vec<Candle>,
    risk: RiskConfig,
    atr: f64,
}

impl SmcEngine {
    pub fn new(htf: Vec<Candle>, mtf: Vec<Candle>, ltf: Vec<Candle>, risk: RiskConfig) -> Self {
        let atr = average_true_range(&ltf, ATR_PERIOD);
        SmcEngine {
            htf,
            mtf,
            ltf,
            risk,
            atr,
        }
    }

    /// Run the full pipeline: detectors per timeframe, direction
    /// alignment, weighted confidence, trade levels, position size,
    /// label. Always returns a complete result.
    pub fn analyze(&self) -> SignalResult {
        if self.ltf.len() < MIN_LTF_CANDLES {
            return SignalResult::default();
        }

        let current_price = self.ltf[self.ltf.len() - 1].close;

        let htf_structure = detect_structure(&self.htf);
        let htf_mss = detect_mss(&self.htf);
        let htf_ob = detect_order_block(&self.htf);

        let mtf_structure = detect_structure(&self.mtf);
        let mtf_sweep = volume_confirmed_sweep(&self.mtf);
        let mtf_fvg = detect_fvg(&self.mtf);
        let mtf_breaker = detect_breaker_block(&self.mtf);
        let mtf_ob = detect_order_block(&self.mtf);
        let mtf_imbalance = detect_imbalance(&self.mtf);

        let ltf_structure = detect_structure(&self.ltf);
        let ltf_sweep = volume_confirmed_sweep(&self.ltf);
        let ltf_fvg = detect_fvg(&self.ltf);
        let ltf_mitigation = detect_mitigation(&self.ltf);

        let direction = determine_direction(htf_structure, mtf_structure, ltf_structure);

        // Same order as FACTOR_WEIGHTS.
        let active_factors: [bool; 9] = [
            htf_structure.is_directional(),
            htf_ob.is_some(),
            htf_mss,
            mtf_fvg.is_some(),
            mtf_breaker.is_some(),
            mtf_ob.is_some(),
            mtf_imbalance,
            ltf_fvg.is_some(),
            ltf_mitigation,
        ];

        let (confidence, explanation) = confidence_score(&active_factors, &mtf_sweep, &ltf_sweep);

        let levels = match direction {
            Some(direction) => {
                let entry = entry_price(
                    current_price,
                    [
                        ltf_fvg.as_ref().map(|z| z.entry),
                        htf_ob.as_ref().map(|z| z.entry),
                        mtf_breaker.as_ref().map(|z| z.entry),
                    ],
                );
                trade_levels(direction, entry, self.atr, current_price)
            }
            None => TradeLevels::flat(current_price),
        };

        let position_size = match direction {
            Some(_) => self.risk.position_size(levels.entry, levels.stop_loss),
            None => 0.0,
        };

        SignalResult {
            signal: Signal::from_confidence(direction, confidence),
            direction,
            confidence,
            entry_price: levels.entry,
            stop_loss: levels.stop_loss,
            take_profit_1: levels.take_profit_1,
            take_profit_2: levels.take_profit_2,
            take_profit_3: levels.take_profit_3,
            risk_reward_ratio: levels.risk_reward,
            position_size,
            structure: format!("HTF:{htf_structure} | MTF:{mtf_structure} | LTF:{ltf_structure}"),
            liquidity_swept: mtf_sweep.detected() || ltf_sweep.detected(),
            explanation,
        }
    }
}

/// Direction requires higher- and medium-timeframe agreement. Full
/// three-way alignment wins outright; otherwise an
/// accumulation/distribution higher timeframe may stand in for trend as
/// long as the medium timeframe trends, with the lower timeframe free to
/// disagree.
fn determine_direction(htf: Structure, mtf: Structure, ltf: Structure) -> Option<Direction> {
    use Structure::*;
    match (htf, mtf, ltf) {
        (Bullish, Bullish, Bullish) => Some(Direction::Long),
        (Bearish, Bearish, Bearish) => Some(Direction::Short),
        (Bullish | Accumulation, Bullish, _) => Some(Direction::Long),
        (Bearish | Distribution, Bearish, _) => Some(Direction::Short),
        _ => None,
    }
}

/// Weighted sum over the active factors plus confirmation-count and
/// sweep-strength bonuses, clamped to [0, 100], with one explanation
/// line per contribution. Every weight and bonus is positive; the score
/// is monotone in the set of active factors.
pub fn confidence_score(
    active_factors: &[bool; 9],
    mtf_sweep: &Sweep,
    ltf_sweep: &Sweep,
) -> (u8, Vec<String>) {
    let mut explanation: Vec<String> = Vec::new();
    let mut score: i32 = 0;
    let mut confirmations = 0usize;
    for ((name, weight), active) in FACTOR_WEIGHTS.into_iter().zip(active_factors) {
        if *active {
            score += weight;
            confirmations += 1;
            explanation.push(format!("{name} (+{weight})"));
        }
    }
    for (threshold, bonus) in CONFIRMATION_BONUSES {
        if confirmations >= threshold {
            score += bonus;
            explanation.push(format!("{confirmations} confirmations (+{bonus})"));
        }
    }
    for (label, sweep) in [("mtf", mtf_sweep), ("ltf", ltf_sweep)] {
        let bonus = sweep_bonus(sweep);
        if bonus > 0 {
            score += bonus;
            explanation.push(format!(
                "{label} sweep strength {:.0} (+{bonus})",
                sweep.strength
            ));
        }
    }
    (score.clamp(0, 100) as u8, explanation)
}

/// +15 for sweep strength above 70, +8 above 50.
fn sweep_bonus(sweep: &Sweep) -> i32 {
    if !sweep.detected() {
        return 0;
    }
    if sweep.strength > 70.0 {
        15
    } else if sweep.strength > 50.0 {
        8
    } else {
        0
    }
}

/// Mean of the available zone entries; current price when none exist.
fn entry_price(current_price: f64, entries: [Option<f64>; 3]) -> f64 {
    let available: Vec<f64> = entries.into_iter().flatten().collect();
    if available.is_empty() {
        current_price
    } else {
        available.iter().sum::<f64>() / available.len() as f64
    }
}
