//! The per-bar decision engine.

mod bar_engine;
mod volume;

pub use bar_engine::{BarEngine, EngineError};
pub use volume::VolumeHistory;

use serde::{Deserialize, Serialize};

/// Strategy parameters, supplied at engine construction.
///
/// These are external configuration values; the engine never hardcodes them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Multiplier applied to the entry-to-stop distance to place the target.
    pub risk_reward: f64,
    /// Contracts per trade; scales realized pnl.
    pub position_size: u32,
    /// Fraction beyond the broken level where the stop sits.
    pub stop_loss_buffer: f64,
    /// Trailing window for the average-volume calculation.
    pub volume_lookback: usize,
    /// Entry gate: bar volume must reach this multiple of the average.
    pub strong_volume_multiplier: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            risk_reward: 2.0,
            position_size: 1,
            stop_loss_buffer: 0.001,
            volume_lookback: 20,
            strong_volume_multiplier: 1.5,
        }
    }
}
