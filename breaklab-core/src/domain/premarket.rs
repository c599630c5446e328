//! Premarket reference levels for one instrument and session.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The premarket high/low band used as the breakout reference for a session.
///
/// Invariant: `high >= low`. Stamped with the session date being processed,
/// never wall-clock time, so replays over historical dates stay correct.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PremarketLevels {
    pub high: f64,
    pub low: f64,
    pub session_date: NaiveDate,
}
