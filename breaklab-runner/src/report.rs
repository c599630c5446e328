//! Result rendering and artifacts (text report, trade tape CSV, result JSON).

use std::path::Path;

use anyhow::{Context, Result};
use breaklab_core::domain::{Bar, Direction, Trade};

use crate::runner::BacktestResult;

/// Render the end-of-run banner.
pub fn render_report(result: &BacktestResult) -> String {
    let mut report = String::new();
    report.push_str(&"=".repeat(70));
    report.push_str("\nBACKTEST RESULTS\n");
    report.push_str(&"=".repeat(70));
    report.push('\n');
    report.push_str(&format!("Run ID:          {}\n", result.run_id));
    report.push_str(&format!(
        "Sessions:        {} ({} bars)\n",
        result.session_count, result.bar_count
    ));
    report.push_str(&format!(
        "Initial Capital: ${:>12}\n",
        format!("{:.2}", result.initial_capital)
    ));
    report.push_str(&format!(
        "Final Capital:   ${:>12}\n",
        format!("{:.2}", result.final_capital)
    ));

    match &result.summary {
        Some(summary) => {
            report.push_str(&format!("Total Trades:    {}\n", summary.total_trades));
            report.push_str(&format!(
                "Winning Trades:  {} ({:.2}% win rate)\n",
                summary.winning_trades, summary.win_rate
            ));
            report.push_str(&format!("Total PnL:       ${:+.2}\n", summary.total_pnl));
        }
        None => report.push_str("Total Trades:    0 (no trades closed)\n"),
    }

    if !result.warnings.is_empty() {
        report.push_str(&format!("Warnings:        {}\n", result.warnings.len()));
        for warning in &result.warnings {
            report.push_str(&format!("  - {warning}\n"));
        }
    }

    report.push_str(&"=".repeat(70));
    report.push('\n');
    report
}

/// Write the trade tape as CSV, one row per closed trade.
pub fn write_trades_csv(path: &Path, trades: &[Trade]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create trades CSV {}", path.display()))?;
    for trade in trades {
        writer
            .serialize(trade)
            .with_context(|| format!("failed to write trade row for {}", trade.symbol))?;
    }
    writer.flush().context("failed to flush trades CSV")?;
    Ok(())
}

/// Write a raw bar feed as CSV (used by the `generate` command).
pub fn write_bars_csv(path: &Path, bars: &[Bar]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create bars CSV {}", path.display()))?;
    for bar in bars {
        writer
            .serialize(bar)
            .with_context(|| format!("failed to write bar row for {}", bar.symbol))?;
    }
    writer.flush().context("failed to flush bars CSV")?;
    Ok(())
}

/// Persist the full result as pretty-printed JSON.
pub fn save_result_json(path: &Path, result: &BacktestResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result).context("failed to serialize result")?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write result JSON {}", path.display()))?;
    Ok(())
}

/// Human-readable one-liner for a closed trade.
pub fn describe_trade(trade: &Trade) -> String {
    let direction = match trade.direction {
        Direction::Long => "LONG",
        Direction::Short => "SHORT",
    };
    format!(
        "{} {} entry={:.2} exit={} pnl={}",
        direction,
        trade.symbol,
        trade.entry_price,
        trade
            .exit_price
            .map_or_else(|| "-".to_string(), |p| format!("{p:.2}")),
        trade
            .pnl
            .map_or_else(|| "-".to_string(), |p| format!("{p:+.2}")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BacktestConfig;
    use crate::runner::SCHEMA_VERSION;
    use breaklab_core::domain::TradeStatus;
    use chrono::NaiveDate;

    fn sample_trade() -> Trade {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(9, 35, 0)
            .unwrap();
        let mut trade = Trade::open("MNQ", Direction::Long, 16020.0, 15993.99, 16072.02, ts);
        trade.close(15993.99, ts, 1);
        trade
    }

    fn empty_result() -> BacktestResult {
        let config = BacktestConfig::default();
        BacktestResult {
            schema_version: SCHEMA_VERSION,
            run_id: config.run_id(),
            config,
            trades: vec![],
            summary: None,
            initial_capital: 100_000.0,
            final_capital: 100_000.0,
            session_count: 0,
            bar_count: 0,
            warnings: vec!["MNQ: no premarket data for session 2024-01-02".into()],
        }
    }

    #[test]
    fn report_handles_an_empty_run() {
        let report = render_report(&empty_result());
        assert!(report.contains("BACKTEST RESULTS"));
        assert!(report.contains("no trades closed"));
        assert!(report.contains("no premarket data"));
    }

    #[test]
    fn report_shows_summary_lines() {
        let mut result = empty_result();
        result.trades = vec![sample_trade()];
        result.summary =
            breaklab_core::summary::PerformanceSummary::from_trades(&result.trades);
        let report = render_report(&result);
        assert!(report.contains("Total Trades:    1"));
        assert!(report.contains("win rate"));
    }

    #[test]
    fn describe_trade_includes_direction_and_pnl() {
        let line = describe_trade(&sample_trade());
        assert!(line.starts_with("LONG MNQ"));
        assert!(line.contains("entry=16020.00"));
        assert!(line.contains("pnl=-26.01"));
    }

    #[test]
    fn closed_trade_status_serializes_in_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trades.csv");
        write_trades_csv(&path, &[sample_trade()]).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.lines().next().unwrap().contains("entry_price"));
        assert!(raw.contains("Long"));
        assert!(raw.contains("16020"));
        assert_eq!(sample_trade().status, TradeStatus::Closed);
    }
}
