//! BarEngine — the per-instrument breakout state machine.
//!
//! Consumes ordered bars for each instrument and walks three logical states:
//! no-levels (entry logic disabled), flat, and in-position. At most one open
//! trade exists per instrument at any time; closed trades move into an
//! append-only completed log and are the only trades the engine ever returns.

use std::collections::HashMap;

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::{Bar, BarError, Direction, PremarketLevels, Symbol, Trade};
use crate::levels::{market_open, LevelTracker, LevelUpdate};
use crate::summary::PerformanceSummary;

use super::{EngineConfig, VolumeHistory};

/// Faults surfaced by the engine.
///
/// Absence of levels, absence of an open trade, or an unmet threshold are all
/// normal branches, not errors; the only fault is malformed input data.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid bar: {0}")]
    InvalidBar(#[from] BarError),
}

/// The breakout decision engine.
///
/// All per-instrument state (premarket band, volume history, open-trade slot)
/// is owned here and mutated only by the engine's own methods. Processing is
/// single-threaded per instrument: all bars for one symbol must arrive in
/// timestamp order through one logical thread of control.
#[derive(Debug)]
pub struct BarEngine {
    config: EngineConfig,
    levels: LevelTracker,
    volume: HashMap<Symbol, VolumeHistory>,
    open_trades: HashMap<Symbol, Trade>,
    completed_trades: Vec<Trade>,
}

impl BarEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            levels: LevelTracker::new(),
            volume: HashMap::new(),
            open_trades: HashMap::new(),
            completed_trades: Vec::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Populate the premarket band for `symbol` ahead of a session's
    /// regular-hours bars. Must be called once per instrument per session
    /// before `process_bar` — this ordering contract is part of the public
    /// interface.
    pub fn update_premarket_levels(
        &mut self,
        symbol: &str,
        session_date: NaiveDate,
        bars: &[Bar],
    ) -> LevelUpdate {
        self.levels.update_levels(symbol, session_date, bars)
    }

    /// Drop the stored band for `symbol`. Orchestrators call this at session
    /// start so a session without premarket data cannot trade on a stale band.
    pub fn clear_levels(&mut self, symbol: &str) {
        self.levels.clear(symbol);
    }

    pub fn premarket_levels(&self, symbol: &str) -> Option<&PremarketLevels> {
        self.levels.get(symbol)
    }

    /// Process one bar; returns a trade only when this bar closed it.
    ///
    /// Per-bar order: validate, record volume, look up the premarket band
    /// (absent band means non-tradable, nothing further happens), then exit
    /// check, then entry check. A bar that closes a trade never also opens
    /// one, and entries themselves return `None` — a trade is only exposed
    /// once it has closed.
    pub fn process_bar(&mut self, bar: &Bar) -> Result<Option<Trade>, EngineError> {
        bar.validate()?;

        // Volume history is updated regardless of state; the average
        // includes the current bar.
        let avg_volume = {
            let history = self
                .volume
                .entry(bar.symbol.clone())
                .or_insert_with(|| VolumeHistory::new(self.config.volume_lookback));
            history.push(bar.volume);
            history.average()
        };

        let Some(levels) = self.levels.get(&bar.symbol).copied() else {
            return Ok(None);
        };

        if let Some(mut trade) = self.open_trades.remove(&bar.symbol) {
            // Stop-first policy: when both bracket sides are touched within
            // the same bar, the stop is assumed to have been hit first.
            let exit_price = if bar.low <= trade.stop_loss {
                Some(trade.stop_loss)
            } else if bar.high >= trade.take_profit {
                Some(trade.take_profit)
            } else {
                None
            };

            return match exit_price {
                Some(price) => {
                    trade.close(price, bar.timestamp, self.config.position_size);
                    self.completed_trades.push(trade.clone());
                    Ok(Some(trade))
                }
                None => {
                    self.open_trades.insert(bar.symbol.clone(), trade);
                    Ok(None)
                }
            };
        }

        // Entries only during regular trading hours.
        if bar.timestamp.time() < market_open() {
            return Ok(None);
        }

        if bar.volume < avg_volume * self.config.strong_volume_multiplier {
            return Ok(None);
        }

        if bar.close > levels.high {
            let entry = bar.close;
            let stop_loss = levels.high * (1.0 - self.config.stop_loss_buffer);
            let take_profit = entry + (entry - stop_loss) * self.config.risk_reward;
            let trade = Trade::open(
                bar.symbol.clone(),
                Direction::Long,
                entry,
                stop_loss,
                take_profit,
                bar.timestamp,
            );
            self.open_trades.insert(bar.symbol.clone(), trade);
        } else if bar.close < levels.low {
            let entry = bar.close;
            let stop_loss = levels.low * (1.0 + self.config.stop_loss_buffer);
            let take_profit = entry - (stop_loss - entry) * self.config.risk_reward;
            let trade = Trade::open(
                bar.symbol.clone(),
                Direction::Short,
                entry,
                stop_loss,
                take_profit,
                bar.timestamp,
            );
            self.open_trades.insert(bar.symbol.clone(), trade);
        }

        Ok(None)
    }

    /// The open trade for `symbol`, if the instrument is in-position.
    pub fn open_trade(&self, symbol: &str) -> Option<&Trade> {
        self.open_trades.get(symbol)
    }

    pub fn open_trade_count(&self) -> usize {
        self.open_trades.len()
    }

    /// Append-only log of closed trades, in close order.
    pub fn completed_trades(&self) -> &[Trade] {
        &self.completed_trades
    }

    /// Summary over the completed log; `None` until a trade has closed.
    pub fn performance_summary(&self) -> Option<PerformanceSummary> {
        PerformanceSummary::from_trades(&self.completed_trades)
    }

    /// Average volume currently observed for `symbol` (0.0 with no history).
    pub fn average_volume(&self, symbol: &str) -> f64 {
        self.volume.get(symbol).map_or(0.0, VolumeHistory::average)
    }
}
