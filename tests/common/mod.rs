#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use smc_signals::domain::candle::Candle;
use smc_signals::domain::error::SmcError;
use smc_signals::ports::candle_port::CandleSource;
use std::collections::HashMap;

pub fn time(i: usize) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + i as i64 * 60, 0).unwrap()
}

pub fn candle(i: usize, open: f64, high: f64, low: f64, close: f64) -> Candle {
    Candle {
        time: time(i),
        open,
        high,
        low,
        close,
        volume: 1_000.0,
    }
}

/// Period-8 zigzag with a per-step drift: drift > 0 builds higher highs
/// and higher lows, drift < 0 the mirror image, drift 0 a flat range.
pub fn zigzag(len: usize, drift: f64) -> Vec<Candle> {
    (0..len)
        .map(|i| {
            let t = i % 8;
            let tri = if t < 4 { t as f64 } else { (8 - t) as f64 };
            let mid = 100.0 + tri + drift * i as f64;
            candle(i, mid - 0.25, mid + 0.5, mid - 0.5, mid + 0.25)
        })
        .collect()
}

/// Monotonic rise with no interior swing points at all.
pub fn monotonic_rise(len: usize) -> Vec<Candle> {
    (0..len)
        .map(|i| {
            let p = 100.0 + i as f64;
            candle(i, p - 0.25, p + 0.5, p - 0.5, p + 0.25)
        })
        .collect()
}

pub struct MockCandleSource {
    pub series: HashMap<(String, String), Vec<Candle>>,
    pub errors: HashMap<String, String>,
}

impl MockCandleSource {
    pub fn new() -> Self {
        Self {
            series: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_series(mut self, symbol: &str, timeframe: &str, candles: Vec<Candle>) -> Self {
        self.series
            .insert((symbol.to_string(), timeframe.to_string()), candles);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl CandleSource for MockCandleSource {
    fn fetch_candles(&self, symbol: &str, timeframe: &str) -> Result<Vec<Candle>, SmcError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(SmcError::Data {
                reason: reason.clone(),
            });
        }
        match self
            .series
            .get(&(symbol.to_string(), timeframe.to_string()))
        {
            Some(candles) => Ok(candles.clone()),
            None => Err(SmcError::NoData {
                symbol: symbol.to_string(),
                timeframe: timeframe.to_string(),
            }),
        }
    }

    fn list_symbols(&self) -> Result<Vec<String>, SmcError> {
        let mut symbols: Vec<String> = self.series.keys().map(|(s, _)| s.clone()).collect();
        symbols.sort();
        symbols.dedup();
        Ok(symbols)
    }

    fn candle_range(
        &self,
        symbol: &str,
        timeframe: &str,
    ) -> Result<Option<(DateTime<Utc>, DateTime<Utc>, usize)>, SmcError> {
        match self.fetch_candles(symbol, timeframe) {
            Ok(candles) => match (candles.first(), candles.last()) {
                (Some(first), Some(last)) => Ok(Some((first.time, last.time, candles.len()))),
                _ => Ok(None),
            },
            Err(SmcError::NoData { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Render candles as the CSV layout the file adapter reads.
pub fn candles_to_csv(candles: &[Candle]) -> String {
    let mut out = String::from("time,open,high,low,close,volume\n");
    for c in candles {
        out.push_str(&format!(
            "{},{},{},{},{},{}\n",
            c.time.to_rfc3339(),
            c.open,
            c.high,
            c.low,
            c.close,
            c.volume
        ));
    }
    out
}
