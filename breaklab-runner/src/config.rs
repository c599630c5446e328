//! Serializable backtest configuration.

use std::path::Path;

use breaklab_core::engine::EngineConfig;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unique identifier for a backtest run (content-addressable hash).
pub type RunId = String;

/// Errors from loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// All parameters needed to reproduce a backtest run.
///
/// Every field has a default, so a TOML file only needs to override what it
/// cares about. Strategy parameters mirror `EngineConfig`; the rest drive
/// data generation and capital accounting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BacktestConfig {
    /// Instruments to trade.
    pub tickers: Vec<String>,

    // ── Strategy parameters ──
    pub risk_reward: f64,
    pub position_size: u32,
    pub stop_loss_buffer: f64,
    pub volume_lookback: usize,
    pub strong_volume_multiplier: f64,

    // ── Data generation ──
    /// Calendar days of sample data (weekends are skipped).
    pub days: u32,
    /// Bar width in minutes.
    pub timeframe_minutes: u32,
    /// First calendar day of the replay. Explicit so runs are reproducible
    /// regardless of when they execute.
    pub start_date: NaiveDate,
    /// Master seed for the synthetic feed.
    pub seed: u64,

    // ── Accounting ──
    pub initial_capital: f64,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        let engine = EngineConfig::default();
        Self {
            tickers: vec!["MNQ".to_string()],
            risk_reward: engine.risk_reward,
            position_size: engine.position_size,
            stop_loss_buffer: engine.stop_loss_buffer,
            volume_lookback: engine.volume_lookback,
            strong_volume_multiplier: engine.strong_volume_multiplier,
            days: 30,
            timeframe_minutes: 5,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            seed: 42,
            initial_capital: 100_000.0,
        }
    }
}

impl BacktestConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = toml::from_str(&raw)?;
        Ok(config)
    }

    /// Check every parameter; all violations are reported at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.tickers.is_empty() {
            errors.push("at least one ticker is required".to_string());
        }
        if self.risk_reward < 1.0 {
            errors.push(format!(
                "risk_reward {} must be at least 1:1",
                self.risk_reward
            ));
        }
        if self.position_size == 0 {
            errors.push("position_size must be at least 1".to_string());
        }
        if !(0.0..1.0).contains(&self.stop_loss_buffer) {
            errors.push(format!(
                "stop_loss_buffer {} must be in [0, 1)",
                self.stop_loss_buffer
            ));
        }
        if self.volume_lookback == 0 {
            errors.push("volume_lookback must be at least 1".to_string());
        }
        if self.strong_volume_multiplier <= 0.0 {
            errors.push(format!(
                "strong_volume_multiplier {} must be positive",
                self.strong_volume_multiplier
            ));
        }
        if self.days == 0 {
            errors.push("days must be at least 1".to_string());
        }
        // 330-minute premarket and 390-minute regular session must both be
        // divisible into whole bars.
        if self.timeframe_minutes == 0
            || 330 % self.timeframe_minutes != 0
            || 390 % self.timeframe_minutes != 0
        {
            errors.push(format!(
                "timeframe_minutes {} must evenly divide both session windows",
                self.timeframe_minutes
            ));
        }
        if self.initial_capital <= 0.0 {
            errors.push(format!(
                "initial_capital {} must be positive",
                self.initial_capital
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(errors.join("; ")))
        }
    }

    /// Deterministic content hash of this configuration.
    ///
    /// Two runs with identical configs share a RunId.
    pub fn run_id(&self) -> RunId {
        let json = serde_json::to_string(self).expect("BacktestConfig serialization failed");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }

    /// Strategy parameters in the shape the engine consumes.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            risk_reward: self.risk_reward,
            position_size: self.position_size,
            stop_loss_buffer: self.stop_loss_buffer,
            volume_lookback: self.volume_lookback,
            strong_volume_multiplier: self.strong_volume_multiplier,
        }
    }
}
