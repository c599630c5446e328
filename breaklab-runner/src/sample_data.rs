//! Deterministic synthetic market data.
//!
//! Each weekday session produces a premarket block (04:00–09:30, lighter
//! volume) and a regular-hours block (09:30–16:00, heavier volume and a wider
//! price range). Generation is seeded, and per-ticker sub-seeds are derived
//! by hashing so output is identical regardless of the order in which
//! tickers are generated across worker threads.

use breaklab_core::domain::Bar;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Anchor price for known tickers; everything else starts at 100.
pub fn base_price(ticker: &str) -> f64 {
    match ticker {
        "MNQ" | "NQ" => 16_000.0,
        "MES" | "ES" => 4_800.0,
        _ => 100.0,
    }
}

/// Hash-derived sub-seed for one ticker under a master seed.
fn ticker_seed(master_seed: u64, ticker: &str) -> u64 {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&master_seed.to_le_bytes());
    hasher.update(ticker.as_bytes());
    let hash = hasher.finalize();
    u64::from_le_bytes(hash.as_bytes()[..8].try_into().unwrap())
}

/// Generate `days` calendar days of bars for `ticker`, skipping weekends.
///
/// Bars come out in strict timestamp order and always satisfy
/// `Bar::validate`.
pub fn generate_bars(
    ticker: &str,
    start_date: NaiveDate,
    days: u32,
    timeframe_minutes: u32,
    master_seed: u64,
) -> Vec<Bar> {
    let mut rng = StdRng::seed_from_u64(ticker_seed(master_seed, ticker));
    let base = base_price(ticker);
    let mut bars = Vec::new();

    for day in 0..days {
        let date = start_date + Duration::days(i64::from(day));
        if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            continue;
        }

        // Premarket: 04:00 for 330 minutes, quiet tape.
        push_session_block(
            &mut bars,
            &mut rng,
            ticker,
            date,
            4 * 60,
            330,
            timeframe_minutes,
            base,
            10.0,
            2.0,
            (1000, 5000),
        );
        // Regular hours: 09:30 for 390 minutes, wider range, heavier volume.
        push_session_block(
            &mut bars,
            &mut rng,
            ticker,
            date,
            9 * 60 + 30,
            390,
            timeframe_minutes,
            base,
            15.0,
            3.0,
            (3000, 8000),
        );
    }

    bars
}

#[allow(clippy::too_many_arguments)]
fn push_session_block(
    bars: &mut Vec<Bar>,
    rng: &mut StdRng,
    ticker: &str,
    date: NaiveDate,
    start_minute: u32,
    span_minutes: u32,
    timeframe_minutes: u32,
    base: f64,
    wander: f64,
    range: f64,
    volume_bounds: (u64, u64),
) {
    let midnight = date.and_hms_opt(0, 0, 0).unwrap();
    let mut offset = 0;
    while offset < span_minutes {
        let timestamp = midnight + Duration::minutes(i64::from(start_minute + offset));

        let price = base + rng.gen_range(-wander..wander);
        let open = price + rng.gen_range(-1.0..1.0);
        let close = price;
        // Draw the wicks, then widen them so OHLC stays consistent.
        let high = (price + rng.gen_range(0.0..range)).max(open).max(close);
        let low = (price - rng.gen_range(0.0..range)).min(open).min(close);
        let volume = rng.gen_range(volume_bounds.0..volume_bounds.1) as f64;

        bars.push(Bar {
            symbol: ticker.to_string(),
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        });

        offset += timeframe_minutes;
    }
}
