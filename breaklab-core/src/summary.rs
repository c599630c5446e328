//! Performance summary over the completed-trade log.

use serde::{Deserialize, Serialize};

use crate::domain::Trade;

/// Aggregate outcome statistics for a set of closed trades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    pub total_trades: usize,
    pub winning_trades: usize,
    /// Percentage in `[0, 100]`.
    pub win_rate: f64,
    pub total_pnl: f64,
}

impl PerformanceSummary {
    /// Compute the summary; `None` for an empty log so callers never divide
    /// by zero on a fresh engine.
    pub fn from_trades(trades: &[Trade]) -> Option<Self> {
        if trades.is_empty() {
            return None;
        }
        let total_trades = trades.len();
        let winning_trades = trades.iter().filter(|t| t.is_winner()).count();
        let total_pnl = trades.iter().filter_map(|t| t.pnl).sum();
        Some(Self {
            total_trades,
            winning_trades,
            win_rate: winning_trades as f64 / total_trades as f64 * 100.0,
            total_pnl,
        })
    }
}
