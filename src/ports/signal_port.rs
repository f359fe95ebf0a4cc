//! Signal output port.

use crate::domain::error::SmcError;
use crate::domain::signal::SignalResult;

/// Sink for emitted signal results. The core never requires one; callers
/// that want persistence or transport implement it.
pub trait SignalSink {
    fn record(&mut self, symbol: &str, result: &SignalResult) -> Result<(), SmcError>;
}

/// Discards every result.
pub struct NullSink;

impl SignalSink for NullSink {
    fn record(&mut self, _symbol: &str, _result: &SignalResult) -> Result<(), SmcError> {
        Ok(())
    }
}
