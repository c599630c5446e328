//! Bar — the fundamental market data unit.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Intraday OHLCV bar for a single symbol.
///
/// Timestamps are market-local and non-decreasing within a symbol's feed.
/// Ordering is a feed precondition; the engine does not re-sort.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bar {
    pub symbol: String,
    pub timestamp: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Validation failures for a single bar.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BarError {
    #[error("non-finite price field in bar for {symbol}")]
    NonFinitePrice { symbol: String },
    #[error("high {high} below low {low} in bar for {symbol}")]
    HighBelowLow { symbol: String, high: f64, low: f64 },
    #[error("open/close outside [low, high] range in bar for {symbol}")]
    RangeViolation { symbol: String },
    #[error("negative volume {volume} in bar for {symbol}")]
    NegativeVolume { symbol: String, volume: f64 },
}

impl Bar {
    /// Check the OHLCV sanity contract.
    ///
    /// Required: all prices finite, `low <= min(open, close)`,
    /// `high >= max(open, close)`, `volume >= 0`. A bar violating this is an
    /// external-data fault and must be rejected before it reaches the
    /// decision logic.
    pub fn validate(&self) -> Result<(), BarError> {
        if !(self.open.is_finite()
            && self.high.is_finite()
            && self.low.is_finite()
            && self.close.is_finite())
        {
            return Err(BarError::NonFinitePrice {
                symbol: self.symbol.clone(),
            });
        }
        if self.high < self.low {
            return Err(BarError::HighBelowLow {
                symbol: self.symbol.clone(),
                high: self.high,
                low: self.low,
            });
        }
        if self.low > self.open.min(self.close) || self.high < self.open.max(self.close) {
            return Err(BarError::RangeViolation {
                symbol: self.symbol.clone(),
            });
        }
        if !(self.volume >= 0.0) {
            return Err(BarError::NegativeVolume {
                symbol: self.symbol.clone(),
                volume: self.volume,
            });
        }
        Ok(())
    }
}
