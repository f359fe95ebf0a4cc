//! JSON-lines signal sink.

use std::io::Write;

use serde_json::json;

use crate::domain::error::SmcError;
use crate::domain::signal::SignalResult;
use crate::ports::signal_port::SignalSink;

/// Writes one JSON object per recorded result to the wrapped writer.
pub struct JsonLineSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLineSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> SignalSink for JsonLineSink<W> {
    fn record(&mut self, symbol: &str, result: &SignalResult) -> Result<(), SmcError> {
        let line = json!({
            "symbol": symbol,
            "result": result,
        });
        writeln!(self.writer, "{line}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_one_line_per_result() {
        let mut sink = JsonLineSink::new(Vec::new());
        sink.record("BTCUSDT", &SignalResult::default()).unwrap();
        sink.record("ETHUSDT", &SignalResult::default()).unwrap();

        let output = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["symbol"], "BTCUSDT");
        assert_eq!(first["result"]["signal"], "NO_TRADE");
    }
}
