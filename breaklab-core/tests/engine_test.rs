//! Integration tests for the breakout engine: entry/exit arithmetic,
//! tie-break policy, missing-premarket handling, and cross-session behavior.

use breaklab_core::domain::{Bar, Direction, TradeStatus};
use breaklab_core::engine::{BarEngine, EngineConfig};
use breaklab_core::levels::LevelUpdate;
use chrono::{NaiveDate, NaiveDateTime};

fn session() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
}

fn ts(date: NaiveDate, h: u32, m: u32) -> NaiveDateTime {
    date.and_hms_opt(h, m, 0).unwrap()
}

fn bar(h: u32, m: u32, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Bar {
    Bar {
        symbol: "MNQ".into(),
        timestamp: ts(session(), h, m),
        open,
        high,
        low,
        close,
        volume,
    }
}

/// Engine with the 16010/15990 premarket band and two low-volume premarket
/// bars already in the volume history.
fn breakout_engine() -> BarEngine {
    let mut engine = BarEngine::new(EngineConfig::default());
    let premarket = vec![
        bar(5, 0, 16000.0, 16010.0, 15995.0, 16005.0, 1000.0),
        bar(8, 0, 16005.0, 16008.0, 15990.0, 15995.0, 1000.0),
    ];
    let update = engine.update_premarket_levels("MNQ", session(), &premarket);
    assert!(matches!(update, LevelUpdate::Updated(_)));

    for pm in &premarket {
        assert!(engine.process_bar(pm).unwrap().is_none());
    }
    engine
}

#[test]
fn long_breakout_entry_prices_the_bracket() {
    let mut engine = breakout_engine();

    // avg volume (1000 + 1000 + 10000) / 3 = 4000; 10000 >= 1.5 * 4000
    let entry_bar = bar(9, 35, 16012.0, 16022.0, 16008.0, 16020.0, 10_000.0);
    let result = engine.process_bar(&entry_bar).unwrap();
    assert!(result.is_none(), "an entry is not a completed trade");

    let trade = engine.open_trade("MNQ").expect("long open");
    assert_eq!(trade.direction, Direction::Long);
    assert_eq!(trade.entry_price, 16020.0);
    assert_eq!(trade.entry_time, ts(session(), 9, 35));

    let expected_stop = 16010.0 * 0.999;
    let expected_target = 16020.0 + (16020.0 - expected_stop) * 2.0;
    assert!((trade.stop_loss - expected_stop).abs() < 1e-9);
    assert!((trade.take_profit - expected_target).abs() < 1e-9);
}

#[test]
fn stop_wins_when_both_bracket_sides_are_touched() {
    let mut engine = breakout_engine();
    let entry_bar = bar(9, 35, 16012.0, 16022.0, 16008.0, 16020.0, 10_000.0);
    engine.process_bar(&entry_bar).unwrap();
    let stop = engine.open_trade("MNQ").unwrap().stop_loss;
    let target = engine.open_trade("MNQ").unwrap().take_profit;

    // One bar that sweeps through both the stop and the target.
    let wide = bar(9, 40, 16020.0, 16080.0, 15990.0, 16050.0, 4000.0);
    assert!(wide.low <= stop && wide.high >= target);

    let closed = engine.process_bar(&wide).unwrap().expect("exit fires");
    assert_eq!(closed.status, TradeStatus::Closed);
    assert_eq!(closed.exit_price, Some(stop));
    assert_eq!(closed.exit_time, Some(ts(session(), 9, 40)));
    let expected_pnl = stop - 16020.0;
    assert!((closed.pnl.unwrap() - expected_pnl).abs() < 1e-9);
    assert!(expected_pnl < 0.0);

    assert!(engine.open_trade("MNQ").is_none());
    assert_eq!(engine.completed_trades().len(), 1);
}

#[test]
fn target_exit_when_stop_is_untouched() {
    let mut engine = breakout_engine();
    engine
        .process_bar(&bar(9, 35, 16012.0, 16022.0, 16008.0, 16020.0, 10_000.0))
        .unwrap();
    let target = engine.open_trade("MNQ").unwrap().take_profit;

    let runner = bar(9, 40, 16020.0, 16080.0, 16015.0, 16075.0, 4000.0);
    let closed = engine.process_bar(&runner).unwrap().expect("target hit");
    assert_eq!(closed.exit_price, Some(target));
    assert!(closed.pnl.unwrap() > 0.0);
    assert!(closed.is_winner());
}

#[test]
fn weak_volume_blocks_the_breakout() {
    let mut engine = breakout_engine();
    // avg (1000 + 1000 + 1200) / 3 ≈ 1066.7; gate needs 1600
    let weak = bar(9, 35, 16012.0, 16022.0, 16008.0, 16020.0, 1200.0);
    engine.process_bar(&weak).unwrap();
    assert!(engine.open_trade("MNQ").is_none());
}

#[test]
fn short_breakdown_entry_prices_the_bracket() {
    let mut engine = breakout_engine();
    let entry_bar = bar(9, 35, 15988.0, 15992.0, 15978.0, 15980.0, 10_000.0);
    engine.process_bar(&entry_bar).unwrap();

    let trade = engine.open_trade("MNQ").expect("short open");
    assert_eq!(trade.direction, Direction::Short);
    let expected_stop = 15990.0 * 1.001;
    let expected_target = 15980.0 - (expected_stop - 15980.0) * 2.0;
    assert!((trade.stop_loss - expected_stop).abs() < 1e-9);
    assert!((trade.take_profit - expected_target).abs() < 1e-9);
    assert!(trade.stop_loss > trade.entry_price);
    assert!(trade.take_profit < trade.entry_price);
}

#[test]
fn no_premarket_data_disables_the_whole_session() {
    let mut engine = BarEngine::new(EngineConfig::default());
    let update = engine.update_premarket_levels(
        "MNQ",
        session(),
        &[bar(10, 0, 16000.0, 16005.0, 15995.0, 16000.0, 1000.0)],
    );
    assert_eq!(update, LevelUpdate::NoPremarketData);

    // Textbook breakout conditions, but the instrument is non-tradable.
    for m in [30, 35, 40, 45] {
        let b = bar(9, m, 16012.0, 16060.0, 16008.0, 16050.0, 1_000_000.0);
        assert!(engine.process_bar(&b).unwrap().is_none());
    }
    assert!(engine.open_trade("MNQ").is_none());
    assert!(engine.completed_trades().is_empty());
    assert!(engine.performance_summary().is_none());
}

#[test]
fn fresh_engine_summary_is_none() {
    let engine = BarEngine::new(EngineConfig::default());
    assert!(engine.performance_summary().is_none());
}

#[test]
fn position_survives_the_session_boundary() {
    let mut engine = breakout_engine();
    engine
        .process_bar(&bar(9, 35, 16012.0, 16022.0, 16008.0, 16020.0, 10_000.0))
        .unwrap();
    let target = engine.open_trade("MNQ").unwrap().take_profit;

    // Next session: fresh levels, then a bar that reaches the target.
    let next = session().succ_opt().unwrap();
    let pm = Bar {
        symbol: "MNQ".into(),
        timestamp: ts(next, 5, 0),
        open: 16030.0,
        high: 16040.0,
        low: 16020.0,
        close: 16035.0,
        volume: 1000.0,
    };
    engine.update_premarket_levels("MNQ", next, &[pm]);

    let runner = Bar {
        symbol: "MNQ".into(),
        timestamp: ts(next, 9, 45),
        open: 16050.0,
        high: 16090.0,
        low: 16040.0,
        close: 16085.0,
        volume: 4000.0,
    };
    let closed = engine.process_bar(&runner).unwrap().expect("carried trade closes");
    assert_eq!(closed.exit_price, Some(target));
    assert_eq!(closed.exit_time, Some(ts(next, 9, 45)));
}

#[test]
fn custom_config_drives_the_bracket() {
    let config = EngineConfig {
        risk_reward: 3.0,
        position_size: 2,
        stop_loss_buffer: 0.002,
        volume_lookback: 10,
        strong_volume_multiplier: 1.2,
    };
    let mut engine = BarEngine::new(config);
    let pm = bar(5, 0, 16000.0, 16010.0, 15990.0, 16000.0, 1000.0);
    engine.update_premarket_levels("MNQ", session(), &[pm.clone()]);
    engine.process_bar(&pm).unwrap();

    engine
        .process_bar(&bar(9, 35, 16012.0, 16022.0, 16008.0, 16020.0, 10_000.0))
        .unwrap();
    let trade = engine.open_trade("MNQ").unwrap();
    let stop = 16010.0 * (1.0 - 0.002);
    assert!((trade.stop_loss - stop).abs() < 1e-9);
    assert!((trade.take_profit - (16020.0 + (16020.0 - stop) * 3.0)).abs() < 1e-9);

    // position_size = 2 doubles realized pnl
    let exit = bar(9, 40, 16000.0, 16001.0, 15970.0, 15980.0, 1000.0);
    let closed = engine.process_bar(&exit).unwrap().unwrap();
    assert!((closed.pnl.unwrap() - (stop - 16020.0) * 2.0).abs() < 1e-9);
}

#[test]
fn instruments_trade_independently() {
    let mut engine = BarEngine::new(EngineConfig::default());
    for (symbol, high, low) in [("MNQ", 16010.0, 15990.0), ("MES", 4805.0, 4795.0)] {
        let pm = Bar {
            symbol: symbol.into(),
            timestamp: ts(session(), 5, 0),
            open: (high + low) / 2.0,
            high,
            low,
            close: (high + low) / 2.0,
            volume: 0.0,
        };
        engine.update_premarket_levels(symbol, session(), &[pm.clone()]);
        engine.process_bar(&pm).unwrap();
    }

    let mnq = bar(9, 35, 16012.0, 16022.0, 16008.0, 16020.0, 10_000.0);
    engine.process_bar(&mnq).unwrap();
    assert!(engine.open_trade("MNQ").is_some());
    assert!(engine.open_trade("MES").is_none());
    assert_eq!(engine.open_trade_count(), 1);
}
