//! Port traits connecting the core to its collaborators.

pub mod candle_port;
pub mod config_port;
pub mod signal_port;
