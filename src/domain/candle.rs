//! OHLCV candle representation and series-boundary validation.

use chrono::{DateTime, Utc};

use crate::domain::error::SmcError;

/// One OHLCV candle. A series is an oldest-first `Vec<Candle>` with strictly
/// increasing timestamps; gaps between candles are permitted.
#[derive(Debug, Clone, PartialEq)]
pub struct Candle {
    pub time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    /// Traded volume; 0.0 when the data source does not provide it.
    pub volume: f64,
}

impl Candle {
    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }

    /// Absolute body size |close - open|.
    pub fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }

    /// Full high-to-low range.
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Body top (the greater of open/close).
    pub fn body_top(&self) -> f64 {
        self.open.max(self.close)
    }

    /// Body bottom (the lesser of open/close).
    pub fn body_bottom(&self) -> f64 {
        self.open.min(self.close)
    }

    pub fn upper_wick(&self) -> f64 {
        self.high - self.body_top()
    }

    pub fn lower_wick(&self) -> f64 {
        self.body_bottom() - self.low
    }

    /// max(high - low, |high - prev_close|, |low - prev_close|)
    pub fn true_range(&self, prev_close: f64) -> f64 {
        let hl = self.high - self.low;
        let hc = (self.high - prev_close).abs();
        let lc = (self.low - prev_close).abs();
        hl.max(hc).max(lc)
    }
}

/// Validate a candle series at the construction boundary.
///
/// Detectors assume well-formed numeric OHLC input and do not re-check
/// fields in their hot loops, so every series must pass through here
/// (or an adapter that calls it) before analysis.
pub fn validate_candles(candles: &[Candle]) -> Result<(), SmcError> {
    for (index, c) in candles.iter().enumerate() {
        for (name, value) in [
            ("open", c.open),
            ("high", c.high),
            ("low", c.low),
            ("close", c.close),
            ("volume", c.volume),
        ] {
            if !value.is_finite() {
                return Err(SmcError::InvalidCandle {
                    index,
                    reason: format!("{name} is not a finite number"),
                });
            }
        }
        if c.high < c.low {
            return Err(SmcError::InvalidCandle {
                index,
                reason: format!("high {} below low {}", c.high, c.low),
            });
        }
        if c.volume < 0.0 {
            return Err(SmcError::InvalidCandle {
                index,
                reason: format!("negative volume {}", c.volume),
            });
        }
        if index > 0 && candles[index - 1].time >= c.time {
            return Err(SmcError::InvalidCandle {
                index,
                reason: "timestamp not strictly increasing".to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_candle(secs: i64, open: f64, high: f64, low: f64, close: f64) -> Candle {
        Candle {
            time: Utc.timestamp_opt(secs, 0).unwrap(),
            open,
            high,
            low,
            close,
            volume: 1000.0,
        }
    }

    #[test]
    fn body_and_wicks_bullish() {
        let c = make_candle(0, 100.0, 110.0, 95.0, 105.0);
        assert!(c.is_bullish());
        assert!((c.body() - 5.0).abs() < f64::EPSILON);
        assert!((c.upper_wick() - 5.0).abs() < f64::EPSILON);
        assert!((c.lower_wick() - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn body_and_wicks_bearish() {
        let c = make_candle(0, 105.0, 110.0, 95.0, 100.0);
        assert!(!c.is_bullish());
        assert!((c.body_top() - 105.0).abs() < f64::EPSILON);
        assert!((c.body_bottom() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn true_range_gap_up() {
        let c = make_candle(0, 100.0, 110.0, 90.0, 105.0);
        // high-low=20, |110-70|=40, |90-70|=20 → 40
        assert!((c.true_range(70.0) - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn validate_accepts_well_formed_series() {
        let candles = vec![
            make_candle(0, 100.0, 110.0, 90.0, 105.0),
            make_candle(60, 105.0, 115.0, 100.0, 110.0),
        ];
        assert!(validate_candles(&candles).is_ok());
    }

    #[test]
    fn validate_rejects_nan_price() {
        let mut candles = vec![make_candle(0, 100.0, 110.0, 90.0, 105.0)];
        candles[0].close = f64::NAN;
        let err = validate_candles(&candles).unwrap_err();
        assert!(matches!(err, SmcError::InvalidCandle { index: 0, .. }));
    }

    #[test]
    fn validate_rejects_inverted_high_low() {
        let candles = vec![make_candle(0, 100.0, 90.0, 110.0, 105.0)];
        assert!(validate_candles(&candles).is_err());
    }

    #[test]
    fn validate_rejects_duplicate_time() {
        let candles = vec![
            make_candle(60, 100.0, 110.0, 90.0, 105.0),
            make_candle(60, 105.0, 115.0, 100.0, 110.0),
        ];
        let err = validate_candles(&candles).unwrap_err();
        assert!(matches!(err, SmcError::InvalidCandle { index: 1, .. }));
    }

    #[test]
    fn validate_rejects_negative_volume() {
        let mut candles = vec![make_candle(0, 100.0, 110.0, 90.0, 105.0)];
        candles[0].volume = -1.0;
        assert!(validate_candles(&candles).is_err());
    }
}
