//! Candle-history provider port.

use chrono::{DateTime, Utc};

use crate::domain::candle::Candle;
use crate::domain::error::SmcError;

/// Source of candle history for a symbol/timeframe pair.
///
/// Implementations must return series oldest-first with strictly
/// increasing timestamps, validated via
/// [`crate::domain::candle::validate_candles`].
pub trait CandleSource {
    fn fetch_candles(&self, symbol: &str, timeframe: &str) -> Result<Vec<Candle>, SmcError>;

    fn list_symbols(&self) -> Result<Vec<String>, SmcError>;

    /// First/last candle time and count, or `None` when no data exists.
    fn candle_range(
        &self,
        symbol: &str,
        timeframe: &str,
    ) -> Result<Option<(DateTime<Utc>, DateTime<Utc>, usize)>, SmcError>;
}
