//! Pattern detectors over candle series.
//!
//! Every detector is a pure function of its input series and returns a
//! neutral value (`None`, `false`, empty) when history is insufficient or
//! no pattern qualifies; the two cases are deliberately indistinguishable.
//! Only the orchestrator in [`crate::domain::engine`] combines detector
//! outputs; no detector reads another's result.

pub mod breaker;
pub mod fvg;
pub mod imbalance;
pub mod liquidity;
pub mod mitigation;
pub mod order_block;
pub mod structure;
