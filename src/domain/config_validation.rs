//! Configuration validation.
//!
//! Validates the risk and data sections before an analysis run.

use crate::domain::error::SmcError;
use crate::domain::risk::RiskConfig;
use crate::ports::config_port::ConfigPort;

/// Timeframe keys every config must name.
pub const TIMEFRAME_KEYS: [&str; 3] = ["higher", "medium", "lower"];

pub fn validate_analysis_config(config: &dyn ConfigPort) -> Result<(), SmcError> {
    validate_account(config)?;
    validate_rates(config)?;
    validate_data(config)?;
    Ok(())
}

/// Build a [`RiskConfig`] from the `[account]` section, after validation.
pub fn build_risk_config(config: &dyn ConfigPort) -> Result<RiskConfig, SmcError> {
    validate_account(config)?;
    validate_rates(config)?;
    let defaults = RiskConfig::default();
    Ok(RiskConfig {
        account_balance: config.get_double("account", "balance", defaults.account_balance),
        risk_percent: config.get_double("account", "risk_percent", defaults.risk_percent),
        commission: config.get_double("account", "commission", defaults.commission),
        slippage: config.get_double("account", "slippage", defaults.slippage),
    })
}

fn validate_account(config: &dyn ConfigPort) -> Result<(), SmcError> {
    let balance = config.get_double("account", "balance", RiskConfig::default().account_balance);
    if balance <= 0.0 {
        return Err(invalid("balance", "must be positive"));
    }
    let risk_percent =
        config.get_double("account", "risk_percent", RiskConfig::default().risk_percent);
    if risk_percent <= 0.0 || risk_percent > 100.0 {
        return Err(invalid("risk_percent", "must be in (0, 100]"));
    }
    Ok(())
}

fn validate_rates(config: &dyn ConfigPort) -> Result<(), SmcError> {
    for key in ["commission", "slippage"] {
        let value = config.get_double("account", key, 0.0);
        if !(0.0..1.0).contains(&value) {
            return Err(invalid(key, "must be a fraction in [0, 1)"));
        }
    }
    Ok(())
}

fn validate_data(config: &dyn ConfigPort) -> Result<(), SmcError> {
    if config.get_string("data", "dir").is_none() {
        return Err(SmcError::ConfigMissing {
            section: "data".to_string(),
            key: "dir".to_string(),
        });
    }
    for key in TIMEFRAME_KEYS {
        if config.get_string("timeframes", key).is_none() {
            return Err(SmcError::ConfigMissing {
                section: "timeframes".to_string(),
                key: key.to_string(),
            });
        }
    }
    Ok(())
}

fn invalid(key: &str, reason: &str) -> SmcError {
    SmcError::ConfigInvalid {
        section: "account".to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
