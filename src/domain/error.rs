//! Domain error types.
//!
//! Detectors themselves never error: insufficient history and "no pattern
//! found" both collapse into a neutral return. Errors exist only at the
//! boundaries: malformed candle data, unreadable files, bad configuration.

/// Top-level error type for smc-signals.
#[derive(Debug, thiserror::Error)]
pub enum SmcError {
    #[error("invalid candle at index {index}: {reason}")]
    InvalidCandle { index: usize, reason: String },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("no candle data for {symbol} on {timeframe}")]
    NoData { symbol: String, timeframe: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&SmcError> for std::process::ExitCode {
    fn from(err: &SmcError) -> Self {
        let code: u8 = match err {
            SmcError::Io(_) => 1,
            SmcError::ConfigParse { .. }
            | SmcError::ConfigMissing { .. }
            | SmcError::ConfigInvalid { .. } => 2,
            SmcError::Data { .. } => 3,
            SmcError::InvalidCandle { .. } => 4,
            SmcError::NoData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
