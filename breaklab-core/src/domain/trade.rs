//! Trade — a bracketed position from entry to close.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Trade direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Long,
    Short,
}

/// Lifecycle state of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeStatus {
    Open,
    Closed,
}

/// A single trade with its protective bracket.
///
/// Created on entry and held in the engine's per-instrument open slot; on
/// close it moves into the completed-trade log with `exit_price`,
/// `exit_time`, and `pnl` populated and `status == Closed`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub symbol: String,
    pub direction: Direction,
    pub entry_price: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    pub entry_time: NaiveDateTime,
    pub exit_price: Option<f64>,
    pub exit_time: Option<NaiveDateTime>,
    pub pnl: Option<f64>,
    pub status: TradeStatus,
}

impl Trade {
    /// Open a new trade with its bracket attached.
    pub fn open(
        symbol: impl Into<String>,
        direction: Direction,
        entry_price: f64,
        stop_loss: f64,
        take_profit: f64,
        entry_time: NaiveDateTime,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            direction,
            entry_price,
            stop_loss,
            take_profit,
            entry_time,
            exit_price: None,
            exit_time: None,
            pnl: None,
            status: TradeStatus::Open,
        }
    }

    /// Close at `exit_price`, realizing pnl for `position_size` contracts.
    pub fn close(&mut self, exit_price: f64, exit_time: NaiveDateTime, position_size: u32) {
        let per_contract = match self.direction {
            Direction::Long => exit_price - self.entry_price,
            Direction::Short => self.entry_price - exit_price,
        };
        self.exit_price = Some(exit_price);
        self.exit_time = Some(exit_time);
        self.pnl = Some(per_contract * f64::from(position_size));
        self.status = TradeStatus::Closed;
    }

    pub fn is_winner(&self) -> bool {
        self.pnl.map(|p| p > 0.0).unwrap_or(false)
    }
}
