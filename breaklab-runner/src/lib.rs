//! BreakLab Runner — orchestration around the core engine.
//!
//! Responsibilities:
//! - TOML-backed run configuration with validation and a content-hash run id
//! - Deterministic synthetic sample data (premarket + regular-hours sessions)
//! - Session-by-session replay honoring the levels-before-bars contract
//! - Per-instrument sharding across worker threads
//! - Result artifacts (trade tape CSV, result JSON) and a text report

pub mod config;
pub mod report;
pub mod runner;
pub mod sample_data;
pub mod session;

pub use config::{BacktestConfig, ConfigError};
pub use report::{render_report, save_result_json, write_bars_csv, write_trades_csv};
pub use runner::{run_backtest, BacktestResult, RunError};
pub use sample_data::generate_bars;
