//! Domain types for BreakLab.

pub mod bar;
pub mod premarket;
pub mod trade;

pub use bar::{Bar, BarError};
pub use premarket::PremarketLevels;
pub use trade::{Direction, Trade, TradeStatus};

/// Symbol type alias
pub type Symbol = String;
