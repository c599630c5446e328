//! Session replay — levels first, then bars, one session at a time.
//!
//! The engine's ordering contract: premarket levels for a session must be in
//! place before any of that session's bars are processed. The replay also
//! clears the prior band at each session boundary so a session with no
//! premarket data stays non-tradable instead of trading a stale band.

use breaklab_core::domain::{Bar, Trade};
use breaklab_core::engine::{BarEngine, EngineError};
use breaklab_core::levels::LevelUpdate;

/// Everything one instrument's replay produced.
#[derive(Debug, Default)]
pub struct ReplayOutcome {
    pub trades: Vec<Trade>,
    pub warnings: Vec<String>,
    pub session_count: usize,
    pub bar_count: usize,
}

/// Replay `bars` (ordered, single instrument) through `engine`.
///
/// Bars are grouped into sessions by calendar date; the full session feed is
/// handed to the level pass, which filters to the premarket window itself.
pub fn replay_instrument(
    engine: &mut BarEngine,
    symbol: &str,
    bars: &[Bar],
) -> Result<ReplayOutcome, EngineError> {
    let mut outcome = ReplayOutcome::default();

    let mut idx = 0;
    while idx < bars.len() {
        let date = bars[idx].timestamp.date();
        let end = bars[idx..]
            .iter()
            .position(|b| b.timestamp.date() != date)
            .map(|p| idx + p)
            .unwrap_or(bars.len());
        let session = &bars[idx..end];

        engine.clear_levels(symbol);
        if engine.update_premarket_levels(symbol, date, session) == LevelUpdate::NoPremarketData {
            outcome
                .warnings
                .push(format!("{symbol}: no premarket data for session {date}"));
        }

        for bar in session {
            if let Some(trade) = engine.process_bar(bar)? {
                outcome.trades.push(trade);
            }
        }

        outcome.session_count += 1;
        outcome.bar_count += session.len();
        idx = end;
    }

    Ok(outcome)
}
