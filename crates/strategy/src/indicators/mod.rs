//! Indicator library.
//!
//! Stateless functions over a candle sequence (oldest first) or a derived
//! price list. Every function fails with `Error::InsufficientData` when the
//! input is shorter than the window it needs. Near-identical variants are
//! kept as separate functions because their strategies depend on the exact
//! arithmetic each one performs.

pub mod accelerator;
pub mod atr;
pub mod bollinger;
pub mod cci;
pub mod donchian;
pub mod ema;
pub mod fractal;
pub mod macd;
pub mod moving_average;
pub mod roc;
pub mod rsi;
pub mod sar;
pub mod stochastic;
pub mod vortex;
pub mod zigzag;

pub use bollinger::Bands;
pub use donchian::Donchian;
pub use fractal::Fractal;
pub use macd::{MacdHistogram, MacdPoint, MacdSeries};
pub use stochastic::Stochastic;
pub use vortex::Vortex;

use common::Candle;

/// Close prices of `candles`, oldest first.
pub fn closes(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.c).collect()
}

#[cfg(test)]
pub(crate) mod test_support {
    use common::Candle;

    /// Candles with the given closes, `h = c + 0.5`, `l = c - 0.5`, one minute apart.
    pub fn candles_from_closes(closes: &[f64]) -> Vec<Candle> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Candle::new(i as i64 * 60, c, c + 0.5, c - 0.5, c))
            .collect()
    }

    pub fn rising(n: usize) -> Vec<f64> {
        (0..n).map(|i| 100.0 + i as f64).collect()
    }

    pub fn falling(n: usize) -> Vec<f64> {
        (0..n).map(|i| 200.0 - i as f64).collect()
    }

    pub fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }
}
