//! Risk model: position sizing, stop/target placement, risk/reward.
//!
//! All knobs arrive through [`RiskConfig`] injected at engine
//! construction; nothing here reads process-wide state.

use crate::domain::signal::Direction;

/// Stop distance as a multiple of ATR.
const STOP_ATR_MULT: f64 = 1.5;
/// Fallback stop distance as a fraction of price when ATR is zero.
const STOP_PRICE_FALLBACK: f64 = 0.005;
/// Take-profit multiples of the stop distance.
const TARGET_MULTS: [f64; 3] = [2.0, 3.0, 5.0];
/// No position may exceed this share of the account.
const MAX_POSITION_SHARE: f64 = 0.2;

/// Account-level risk knobs.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskConfig {
    pub account_balance: f64,
    /// Percent of the balance risked per trade (1.0 = 1%).
    pub risk_percent: f64,
    /// Commission rate as a fraction of trade value.
    pub commission: f64,
    /// Slippage rate as a fraction of trade value.
    pub slippage: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        RiskConfig {
            account_balance: 10_000.0,
            risk_percent: 1.0,
            commission: 0.001,
            slippage: 0.0005,
        }
    }
}

impl RiskConfig {
    /// Units to trade so that a stop-out loses `risk_percent` of the
    /// balance, reduced by commission and slippage, capped at 20% of the
    /// account at the entry price. Rounded to 4 decimals.
    pub fn position_size(&self, entry: f64, stop: f64) -> f64 {
        if entry <= 0.0 || stop <= 0.0 {
            return 0.0;
        }
        let stop_distance = (entry - stop).abs();
        if stop_distance == 0.0 {
            return 0.0;
        }

        let risk_amount = self.account_balance * self.risk_percent / 100.0;
        let size = risk_amount / stop_distance;
        let adjusted = size * (1.0 - self.commission - self.slippage);

        let max_units = self.account_balance * MAX_POSITION_SHARE / entry;
        (adjusted.min(max_units) * 10_000.0).round() / 10_000.0
    }
}

/// Entry, stop, three targets and the first-target risk/reward.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeLevels {
    pub entry: f64,
    pub stop_loss: f64,
    pub take_profit_1: f64,
    pub take_profit_2: f64,
    pub take_profit_3: f64,
    pub risk_reward: f64,
}

impl TradeLevels {
    /// Levels centered on nothing: every price equals `price`, RR zero.
    /// Used when no direction exists.
    pub fn flat(price: f64) -> Self {
        TradeLevels {
            entry: price,
            stop_loss: price,
            take_profit_1: price,
            take_profit_2: price,
            take_profit_3: price,
            risk_reward: 0.0,
        }
    }
}

/// Place the stop 1.5 ATR on the adverse side of `entry` and targets at
/// 2x/3x/5x the stop distance on the favorable side. Falls back to 0.5%
/// of `price` when the ATR is zero (constant or too-short series).
pub fn trade_levels(direction: Direction, entry: f64, atr: f64, price: f64) -> TradeLevels {
    let stop_distance = if atr > 0.0 {
        atr * STOP_ATR_MULT
    } else {
        price * STOP_PRICE_FALLBACK
    };

    let sign = match direction {
        Direction::Long => 1.0,
        Direction::Short => -1.0,
    };

    let stop_loss = entry - sign * stop_distance;
    let [tp1, tp2, tp3] = TARGET_MULTS.map(|m| entry + sign * stop_distance * m);

    TradeLevels {
        entry,
        stop_loss,
        take_profit_1: tp1,
        take_profit_2: tp2,
        take_profit_3: tp3,
        risk_reward: risk_reward(entry, stop_loss, tp1),
    }
}

/// |target - entry| / |entry - stop|, 0 when the stop distance is 0.
pub fn risk_reward(entry: f64, stop: f64, target: f64) -> f64 {
    let risk = (entry - stop).abs();
    if risk == 0.0 {
        return 0.0;
    }
    (target - entry).abs() / risk
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn position_size_cap_binds() {
        let risk = RiskConfig::default();
        // risk_amount 100, stop distance 1000 → raw 0.1, adjusted
        // 0.09985, cap 10000*0.2/50000 = 0.04.
        assert_relative_eq!(risk.position_size(50_000.0, 49_000.0), 0.04);
    }

    #[test]
    fn position_size_unconstrained() {
        let risk = RiskConfig {
            account_balance: 10_000.0,
            risk_percent: 1.0,
            commission: 0.0,
            slippage: 0.0,
        };
        // risk 100 over distance 50 → 2 units; cap 10000*0.2/100 = 20.
        assert_relative_eq!(risk.position_size(100.0, 50.0), 2.0);
    }

    #[test]
    fn commission_and_slippage_shave_size() {
        let risk = RiskConfig {
            account_balance: 10_000.0,
            risk_percent: 1.0,
            commission: 0.001,
            slippage: 0.0005,
        };
        assert_relative_eq!(risk.position_size(100.0, 50.0), 1.997);
    }

    #[test]
    fn degenerate_inputs_size_zero() {
        let risk = RiskConfig::default();
        assert_eq!(risk.position_size(0.0, 50.0), 0.0);
        assert_eq!(risk.position_size(100.0, 0.0), 0.0);
        assert_eq!(risk.position_size(100.0, 100.0), 0.0);
    }

    #[test]
    fn long_levels_below_and_above() {
        let levels = trade_levels(Direction::Long, 100.0, 2.0, 100.0);
        assert_relative_eq!(levels.stop_loss, 97.0);
        assert_relative_eq!(levels.take_profit_1, 106.0);
        assert_relative_eq!(levels.take_profit_2, 109.0);
        assert_relative_eq!(levels.take_profit_3, 115.0);
        assert_relative_eq!(levels.risk_reward, 2.0);
    }

    #[test]
    fn short_levels_mirror() {
        let levels = trade_levels(Direction::Short, 100.0, 2.0, 100.0);
        assert_relative_eq!(levels.stop_loss, 103.0);
        assert_relative_eq!(levels.take_profit_1, 94.0);
        assert_relative_eq!(levels.take_profit_3, 85.0);
        assert_relative_eq!(levels.risk_reward, 2.0);
    }

    #[test]
    fn zero_atr_falls_back_to_price_fraction() {
        let levels = trade_levels(Direction::Long, 200.0, 0.0, 200.0);
        // 0.5% of 200 = 1.0
        assert_relative_eq!(levels.stop_loss, 199.0);
        assert_relative_eq!(levels.take_profit_1, 202.0);
    }

    #[test]
    fn risk_reward_zero_distance() {
        assert_eq!(risk_reward(100.0, 100.0, 110.0), 0.0);
    }
}
