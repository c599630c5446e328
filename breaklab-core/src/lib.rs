//! BreakLab Core — premarket-breakout decision engine.
//!
//! This crate contains the heart of the backtester:
//! - Domain types (bars, trades, premarket levels)
//! - Premarket level tracking per instrument
//! - Bar-by-bar decision loop with a single open-position slot per instrument
//! - Rolling volume statistics and the strong-volume entry gate
//! - Performance summary over the completed-trade log
//!
//! Orchestration (session looping, data generation, reporting) lives in
//! `breaklab-runner`; this crate is synchronous, deterministic, and does no I/O.

pub mod domain;
pub mod engine;
pub mod levels;
pub mod summary;
