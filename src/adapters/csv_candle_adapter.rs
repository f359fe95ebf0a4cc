//! CSV file candle adapter.
//!
//! Expects one file per symbol/timeframe pair at
//! `{base}/{SYMBOL}_{timeframe}.csv` with columns
//! `time,open,high,low,close[,volume]`. Time is RFC 3339 or epoch
//! seconds; a missing volume column defaults to 0.

use chrono::{DateTime, TimeZone, Utc};
use std::path::PathBuf;

use crate::domain::candle::{validate_candles, Candle};
use crate::domain::error::SmcError;
use crate::ports::candle_port::CandleSource;

pub struct CsvCandleAdapter {
    base_path: PathBuf,
}

impl CsvCandleAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str, timeframe: &str) -> PathBuf {
        self.base_path.join(format!("{symbol}_{timeframe}.csv"))
    }
}

fn parse_time(value: &str) -> Result<DateTime<Utc>, SmcError> {
    if let Ok(epoch) = value.parse::<i64>() {
        return Utc
            .timestamp_opt(epoch, 0)
            .single()
            .ok_or_else(|| data_error(format!("epoch timestamp out of range: {value}")));
    }
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| data_error(format!("invalid time {value:?}: {e}")))
}

fn parse_price(record: &csv::StringRecord, column: usize, name: &str) -> Result<f64, SmcError> {
    record
        .get(column)
        .ok_or_else(|| data_error(format!("missing {name} column")))?
        .parse()
        .map_err(|e| data_error(format!("invalid {name} value: {e}")))
}

fn data_error(reason: String) -> SmcError {
    SmcError::Data { reason }
}

impl CandleSource for CsvCandleAdapter {
    fn fetch_candles(&self, symbol: &str, timeframe: &str) -> Result<Vec<Candle>, SmcError> {
        let path = self.csv_path(symbol, timeframe);
        if !path.exists() {
            return Err(SmcError::NoData {
                symbol: symbol.to_string(),
                timeframe: timeframe.to_string(),
            });
        }

        let mut rdr = csv::Reader::from_path(&path)
            .map_err(|e| data_error(format!("failed to open {}: {e}", path.display())))?;

        let mut candles = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| data_error(format!("CSV parse error: {e}")))?;

            let time = parse_time(
                record
                    .get(0)
                    .ok_or_else(|| data_error("missing time column".into()))?,
            )?;
            let open = parse_price(&record, 1, "open")?;
            let high = parse_price(&record, 2, "high")?;
            let low = parse_price(&record, 3, "low")?;
            let close = parse_price(&record, 4, "close")?;
            let volume = match record.get(5) {
                Some(v) if !v.is_empty() => v
                    .parse()
                    .map_err(|e| data_error(format!("invalid volume value: {e}")))?,
                _ => 0.0,
            };

            candles.push(Candle {
                time,
                open,
                high,
                low,
                close,
                volume,
            });
        }

        candles.sort_by_key(|c| c.time);
        validate_candles(&candles)?;
        Ok(candles)
    }

    fn list_symbols(&self) -> Result<Vec<String>, SmcError> {
        let mut symbols = Vec::new();
        for entry in std::fs::read_dir(&self.base_path)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            let Some(stem) = name.strip_suffix(".csv") else {
                continue;
            };
            if let Some((symbol, _timeframe)) = stem.rsplit_once('_') {
                if !symbols.contains(&symbol.to_string()) {
                    symbols.push(symbol.to_string());
                }
            }
        }
        symbols.sort();
        Ok(symbols)
    }

    fn candle_range(
        &self,
        symbol: &str,
        timeframe: &str,
    ) -> Result<Option<(DateTime<Utc>, DateTime<Utc>, usize)>, SmcError> {
        let candles = match self.fetch_candles(symbol, timeframe) {
            Ok(candles) => candles,
            Err(SmcError::NoData { .. }) => return Ok(None),
            Err(e) => return Err(e),
        };
        match (candles.first(), candles.last()) {
            (Some(first), Some(last)) => Ok(Some((first.time, last.time, candles.len()))),
            _ => Ok(None),
        }
    }
}
