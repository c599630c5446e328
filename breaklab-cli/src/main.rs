//! BreakLab CLI — premarket-breakout backtests over synthetic sample data.
//!
//! Commands:
//! - `run` — execute a backtest from a TOML config file (or defaults) and
//!   write result artifacts
//! - `generate` — dump the synthetic bar feed for one ticker to CSV

use std::path::PathBuf;

use anyhow::{Context, Result};
use breaklab_runner::config::BacktestConfig;
use breaklab_runner::report::{
    describe_trade, render_report, save_result_json, write_bars_csv, write_trades_csv,
};
use breaklab_runner::runner::run_backtest;
use breaklab_runner::sample_data::generate_bars;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "breaklab",
    about = "BreakLab CLI — premarket breakout backtesting engine"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a backtest over generated sample data.
    Run {
        /// Path to a TOML config file. Defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Tickers to trade (overrides the config file).
        #[arg(long, num_args = 1..)]
        tickers: Vec<String>,

        /// Calendar days of sample data (overrides the config file).
        #[arg(long)]
        days: Option<u32>,

        /// Master seed for the synthetic feed (overrides the config file).
        #[arg(long)]
        seed: Option<u64>,

        /// Output directory for result JSON and the trade tape CSV.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,

        /// Print the report only; write no artifacts.
        #[arg(long, default_value_t = false)]
        no_artifacts: bool,
    },
    /// Dump the synthetic bar feed for one ticker to CSV.
    Generate {
        /// Ticker symbol (MNQ, MES, NQ, ES have calibrated base prices).
        #[arg(long, default_value = "MNQ")]
        ticker: String,

        /// Calendar days to generate.
        #[arg(long, default_value_t = 30)]
        days: u32,

        /// First calendar day (YYYY-MM-DD).
        #[arg(long)]
        start: Option<String>,

        /// Master seed.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Bar width in minutes.
        #[arg(long, default_value_t = 5)]
        timeframe: u32,

        /// Output CSV path.
        #[arg(long, default_value = "bars.csv")]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            config,
            tickers,
            days,
            seed,
            output_dir,
            no_artifacts,
        } => cmd_run(config, tickers, days, seed, output_dir, no_artifacts),
        Commands::Generate {
            ticker,
            days,
            start,
            seed,
            timeframe,
            out,
        } => cmd_generate(ticker, days, start, seed, timeframe, out),
    }
}

fn cmd_run(
    config_path: Option<PathBuf>,
    tickers: Vec<String>,
    days: Option<u32>,
    seed: Option<u64>,
    output_dir: PathBuf,
    no_artifacts: bool,
) -> Result<()> {
    let mut config = match &config_path {
        Some(path) => BacktestConfig::load(path)?,
        None => BacktestConfig::default(),
    };
    if !tickers.is_empty() {
        config.tickers = tickers;
    }
    if let Some(days) = days {
        config.days = days;
    }
    if let Some(seed) = seed {
        config.seed = seed;
    }
    config.validate()?;

    println!("{}", "=".repeat(70));
    println!("BREAKLAB");
    println!("Premarket Breakout Strategy");
    println!("{}", "=".repeat(70));
    println!("Monitoring: {}", config.tickers.join(", "));
    println!("Risk-Reward: {}:1", config.risk_reward);
    println!();

    let result = run_backtest(&config)?;

    if !result.trades.is_empty() {
        println!("Trade tape:");
        for trade in &result.trades {
            println!("  {}", describe_trade(trade));
        }
        println!();
    }
    print!("{}", render_report(&result));

    if !no_artifacts {
        std::fs::create_dir_all(&output_dir).with_context(|| {
            format!("failed to create output directory {}", output_dir.display())
        })?;
        let stem = &result.run_id[..12];
        let json_path = output_dir.join(format!("{stem}.json"));
        let csv_path = output_dir.join(format!("{stem}_trades.csv"));
        save_result_json(&json_path, &result)?;
        write_trades_csv(&csv_path, &result.trades)?;
        println!("Artifacts: {} and {}", json_path.display(), csv_path.display());
    }

    Ok(())
}

fn cmd_generate(
    ticker: String,
    days: u32,
    start: Option<String>,
    seed: u64,
    timeframe: u32,
    out: PathBuf,
) -> Result<()> {
    let start_date = match start {
        Some(raw) => raw
            .parse::<NaiveDate>()
            .with_context(|| format!("invalid start date '{raw}' (expected YYYY-MM-DD)"))?,
        None => BacktestConfig::default().start_date,
    };

    let bars = generate_bars(&ticker, start_date, days, timeframe, seed);
    write_bars_csv(&out, &bars)?;
    println!(
        "Generated {} bars for {} starting {} -> {}",
        bars.len(),
        ticker,
        start_date,
        out.display()
    );
    Ok(())
}
