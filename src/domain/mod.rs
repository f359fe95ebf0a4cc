//! Core domain types and analysis logic.

pub mod atr;
pub mod candle;
pub mod config_validation;
pub mod detector;
pub mod engine;
pub mod error;
pub mod risk;
pub mod signal;
pub mod swing;
pub mod zone;
