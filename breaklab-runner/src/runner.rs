//! Backtest runner — wires together config, data generation, and replay.
//!
//! Instruments are independent, so the runner shards them across worker
//! threads: one engine per instrument, merged afterwards. Within an
//! instrument bars stay strictly ordered through a single engine.

use breaklab_core::domain::Trade;
use breaklab_core::engine::{BarEngine, EngineError};
use breaklab_core::summary::PerformanceSummary;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{BacktestConfig, ConfigError, RunId};
use crate::sample_data::generate_bars;
use crate::session::{replay_instrument, ReplayOutcome};

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
}

/// Current schema version for persisted artifacts.
pub const SCHEMA_VERSION: u32 = 1;

/// Complete result of a single backtest run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestResult {
    /// Schema version for forward-compatible deserialization.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub run_id: RunId,
    pub config: BacktestConfig,
    /// Closed trades across all instruments, ordered by entry time.
    pub trades: Vec<Trade>,
    /// `None` when the run closed no trades.
    pub summary: Option<PerformanceSummary>,
    pub initial_capital: f64,
    pub final_capital: f64,
    /// Trading sessions replayed (per instrument; instruments share a calendar).
    pub session_count: usize,
    /// Bars processed across all instruments.
    pub bar_count: usize,
    /// Degraded-service conditions observed, e.g. sessions without premarket data.
    pub warnings: Vec<String>,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// Run a full backtest over generated sample data.
pub fn run_backtest(config: &BacktestConfig) -> Result<BacktestResult, RunError> {
    config.validate()?;
    let engine_config = config.engine_config();

    let outcomes: Vec<ReplayOutcome> = config
        .tickers
        .par_iter()
        .map(|ticker| {
            let bars = generate_bars(
                ticker,
                config.start_date,
                config.days,
                config.timeframe_minutes,
                config.seed,
            );
            let mut engine = BarEngine::new(engine_config);
            replay_instrument(&mut engine, ticker, &bars)
        })
        .collect::<Result<_, _>>()?;

    let mut trades = Vec::new();
    let mut warnings = Vec::new();
    let mut bar_count = 0;
    let mut session_count = 0;
    for outcome in outcomes {
        trades.extend(outcome.trades);
        warnings.extend(outcome.warnings);
        bar_count += outcome.bar_count;
        session_count = session_count.max(outcome.session_count);
    }
    trades.sort_by(|a, b| {
        a.entry_time
            .cmp(&b.entry_time)
            .then_with(|| a.symbol.cmp(&b.symbol))
    });

    let summary = PerformanceSummary::from_trades(&trades);
    let total_pnl = summary.as_ref().map_or(0.0, |s| s.total_pnl);

    Ok(BacktestResult {
        schema_version: SCHEMA_VERSION,
        run_id: config.run_id(),
        config: config.clone(),
        trades,
        summary,
        initial_capital: config.initial_capital,
        final_capital: config.initial_capital + total_pnl,
        session_count,
        bar_count,
        warnings,
    })
}
