//! Premarket level tracking — derives the breakout reference band per session.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};

use crate::domain::{Bar, PremarketLevels, Symbol};

/// Start of the premarket window (inclusive), market-local.
pub fn premarket_start() -> NaiveTime {
    NaiveTime::from_hms_opt(4, 0, 0).unwrap()
}

/// End of the premarket window (exclusive) and start of regular trading hours.
pub fn market_open() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 30, 0).unwrap()
}

/// Outcome of a level update for one instrument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LevelUpdate {
    /// Levels computed and stored, overwriting any prior band.
    Updated(PremarketLevels),
    /// No bars fell inside the premarket window; stored levels untouched.
    /// A degraded-service condition, not an error — the instrument simply
    /// stays non-tradable until levels exist.
    NoPremarketData,
}

/// Tracks the premarket high/low band per instrument.
///
/// Populated once per instrument per session, before the session's
/// regular-hours bars are processed. The engine reads it; only the
/// orchestrator writes it.
#[derive(Debug, Clone, Default)]
pub struct LevelTracker {
    levels: HashMap<Symbol, PremarketLevels>,
}

impl LevelTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the premarket band for `symbol` from `bars`.
    ///
    /// Filters internally to bars whose time-of-day falls in
    /// `[04:00, 09:30)`, so callers may pass a full session feed. The band is
    /// stamped with the explicit `session_date` — the tracker never reads the
    /// system clock. An empty premarket set leaves any previously stored band
    /// in place; callers that must not carry a stale band across sessions
    /// call [`LevelTracker::clear`] at the session boundary first.
    pub fn update_levels(
        &mut self,
        symbol: &str,
        session_date: NaiveDate,
        bars: &[Bar],
    ) -> LevelUpdate {
        let start = premarket_start();
        let end = market_open();

        let mut high = f64::NEG_INFINITY;
        let mut low = f64::INFINITY;
        let mut seen = false;
        for bar in bars {
            let time = bar.timestamp.time();
            if time >= start && time < end {
                high = high.max(bar.high);
                low = low.min(bar.low);
                seen = true;
            }
        }

        if !seen {
            return LevelUpdate::NoPremarketData;
        }

        let levels = PremarketLevels {
            high,
            low,
            session_date,
        };
        self.levels.insert(symbol.to_string(), levels);
        LevelUpdate::Updated(levels)
    }

    /// Drop the stored band for `symbol`, returning to the non-tradable state.
    pub fn clear(&mut self, symbol: &str) {
        self.levels.remove(symbol);
    }

    pub fn get(&self, symbol: &str) -> Option<&PremarketLevels> {
        self.levels.get(symbol)
    }
}
