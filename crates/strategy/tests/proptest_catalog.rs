use proptest::prelude::*;

use common::{Candle, Classification};
use strategy::indicators::ema::{ema_blend, ema_incremental, ema_sma_seeded};
use strategy::indicators::rsi::{rsi_leading, rsi_trailing, rsi_whole_series};
use strategy::{Aggregator, Catalog, Strategy as _};

fn candle(t: i64, close: f64, spread: f64) -> Candle {
    Candle::new(t * 60, close, close + spread, close - spread, close)
}

fn arb_candles(max_len: usize) -> impl Strategy<Value = Vec<Candle>> {
    prop::collection::vec((0.5f64..2.0, 0.0001f64..0.01), 0..max_len).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (close, spread))| candle(i as i64, close, spread))
            .collect()
    })
}

proptest! {
    /// With fewer than two candles no strategy may produce a firm verdict.
    #[test]
    fn degenerate_sequences_are_never_firm(close in 0.5f64..2.0, len in 0usize..2) {
        let candles: Vec<Candle> = (0..len).map(|i| candle(i as i64, close, 0.001)).collect();
        for member in Catalog::standard().strategies() {
            if let Ok(verdict) = member.classify(&candles) {
                prop_assert!(!verdict.is_firm(), "{} returned {}", member.name(), verdict);
            }
        }
    }

    /// Every EMA seeding convention stays at a constant price.
    #[test]
    fn ema_of_constant_series_is_the_constant(price in 0.0001f64..10_000.0, len in 30usize..80, period in 2usize..30) {
        let prices = vec![price; len];
        let tolerance = price * 1e-12;
        prop_assert!((ema_blend(&prices, period).unwrap() - price).abs() <= tolerance);
        let incremental = ema_incremental(&prices, period).unwrap();
        prop_assert!((incremental[incremental.len() - 1] - price).abs() <= tolerance);
        let seeded = ema_sma_seeded(&prices, period).unwrap();
        prop_assert!((seeded[seeded.len() - 1] - price).abs() <= tolerance);
    }

    /// Strictly rising closes read 100 and strictly falling closes read 0.
    #[test]
    fn rsi_saturates_on_monotonic_series(start in 1.0f64..100.0, step in 0.001f64..1.0, len in 15usize..60) {
        let rising: Vec<f64> = (0..len).map(|i| start + step * i as f64).collect();
        let falling: Vec<f64> = rising.iter().rev().copied().collect();
        for rsi in [rsi_whole_series, rsi_trailing, rsi_leading] {
            prop_assert_eq!(rsi(&rising, 14).unwrap(), 100.0);
            prop_assert_eq!(rsi(&falling, 14).unwrap(), 0.0);
        }
    }

    /// Re-running a sequence gives identical results, and the counts only
    /// ever cover canonical tokens.
    #[test]
    fn aggregation_is_deterministic(candles in arb_candles(70)) {
        let aggregator = Aggregator::default();
        let first = aggregator.analyze(&candles);
        let second = aggregator.analyze(&candles);
        prop_assert_eq!(&first, &second);

        let canonical = first.raw_results.iter().filter(|r| r.direction().is_some()).count();
        prop_assert_eq!(first.counts.up + first.counts.down + first.counts.flat, canonical);
        prop_assert_eq!(first.raw_results.len(), 21);
    }

    /// Failed strategies always read flat.
    #[test]
    fn failures_read_flat(candles in arb_candles(40)) {
        let aggregator = Aggregator::default();
        let analysis = aggregator.analyze(&candles);
        let names = aggregator.catalog().names();
        for failure in &analysis.failures {
            let idx = names.iter().position(|n| *n == failure.strategy).unwrap();
            prop_assert_eq!(&analysis.raw_results[idx], &Classification::flat());
        }
    }
}
