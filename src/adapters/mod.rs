//! Adapter implementations of the outbound ports.

pub mod csv_candle_adapter;
pub mod file_config_adapter;
pub mod json_sink_adapter;
