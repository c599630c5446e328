//! Criterion bench for the hot per-bar path.

use breaklab_core::domain::Bar;
use breaklab_core::engine::{BarEngine, EngineConfig};
use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// One synthetic session: 66 premarket bars and 78 regular-hours bars of
/// five minutes each, with enough price wander to trigger entries and exits.
fn session_bars(date: NaiveDate) -> Vec<Bar> {
    let mut bars = Vec::new();
    let mut price = 16000.0;
    let premarket = date.and_hms_opt(4, 0, 0).unwrap();
    for i in 0..66 {
        price += ((i % 7) as f64 - 3.0) * 2.0;
        bars.push(Bar {
            symbol: "MNQ".into(),
            timestamp: premarket + Duration::minutes(i * 5),
            open: price,
            high: price + 3.0,
            low: price - 3.0,
            close: price,
            volume: 1500.0 + (i % 5) as f64 * 500.0,
        });
    }
    let open = date.and_hms_opt(9, 30, 0).unwrap();
    for i in 0..78 {
        price += ((i % 11) as f64 - 5.0) * 4.0;
        bars.push(Bar {
            symbol: "MNQ".into(),
            timestamp: open + Duration::minutes(i * 5),
            open: price,
            high: price + 5.0,
            low: price - 5.0,
            close: price,
            volume: if i % 9 == 0 { 40_000.0 } else { 4000.0 },
        });
    }
    bars
}

fn bench_process_bar(c: &mut Criterion) {
    let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let bars = session_bars(date);

    c.bench_function("session_replay_144_bars", |b| {
        b.iter(|| {
            let mut engine = BarEngine::new(EngineConfig::default());
            engine.update_premarket_levels("MNQ", date, &bars);
            for bar in &bars {
                let _ = black_box(engine.process_bar(bar).unwrap());
            }
            engine.completed_trades().len()
        })
    });
}

criterion_group!(benches, bench_process_bar);
criterion_main!(benches);
