//! The strategy catalog.
//!
//! Every member is a plain function over a time-ascending candle sequence.
//! Each owns its periods and thresholds as local constants.

mod bands;
mod momentum;
mod trend;

use tracing::info;

use common::{Candle, Classification, Error, Result};

use crate::Strategy;

pub use bands::{band_sar_vote, bollinger_breakout, ema_bollinger, ema_sar_trend, sar_roc};
pub use momentum::{
    cci_alligator, macd_cross, macd_histogram_sar, rsi_momentum, rsi_threshold,
    wma_macd_vortex, wma_stochastic_accelerator,
};
pub use trend::{
    alligator_rsi, close_drift, donchian_momentum, fractal_ma_cross, keltner_reversal,
    sma_macd_confirmation, trend_breakout, window_change,
};

type ClassifyFn = fn(&[Candle]) -> Result<Classification>;

/// A catalog member backed by a free function.
pub struct FnStrategy {
    name: &'static str,
    classify: ClassifyFn,
}

impl FnStrategy {
    pub const fn new(name: &'static str, classify: ClassifyFn) -> Self {
        Self { name, classify }
    }
}

impl Strategy for FnStrategy {
    fn name(&self) -> &'static str {
        self.name
    }

    fn classify(&self, candles: &[Candle]) -> Result<Classification> {
        (self.classify)(candles)
    }
}

/// The standard members in their fixed run order.
const STANDARD: [(&str, ClassifyFn); 21] = [
    ("trend_breakout", trend_breakout),
    ("close_drift", close_drift),
    ("close_drift_confirm", close_drift),
    ("fractal_ma_cross", fractal_ma_cross),
    ("keltner_reversal", keltner_reversal),
    ("rsi_momentum", rsi_momentum),
    ("ema_sar_trend", ema_sar_trend),
    ("ema_bollinger", ema_bollinger),
    ("wma_stochastic_accelerator", wma_stochastic_accelerator),
    ("wma_macd_vortex", wma_macd_vortex),
    ("band_sar_vote", band_sar_vote),
    ("window_change", window_change),
    ("macd_cross", macd_cross),
    ("rsi_threshold", rsi_threshold),
    ("bollinger_breakout", bollinger_breakout),
    ("sar_roc", sar_roc),
    ("cci_alligator", cci_alligator),
    ("macd_histogram_sar", macd_histogram_sar),
    ("alligator_rsi", alligator_rsi),
    ("donchian_momentum", donchian_momentum),
    ("sma_macd_confirmation", sma_macd_confirmation),
];

/// Ordered list of strategies run by the aggregator.
pub struct Catalog {
    strategies: Vec<Box<dyn Strategy>>,
}

impl Catalog {
    /// Every built-in strategy, in run order.
    pub fn standard() -> Self {
        let strategies = STANDARD
            .iter()
            .map(|&(name, classify)| Box::new(FnStrategy::new(name, classify)) as Box<dyn Strategy>)
            .collect();
        let catalog = Self::from_strategies(strategies);
        info!(strategies = catalog.len(), "Built standard strategy catalog");
        catalog
    }

    pub fn from_strategies(strategies: Vec<Box<dyn Strategy>>) -> Self {
        Self { strategies }
    }

    pub fn strategies(&self) -> &[Box<dyn Strategy>] {
        &self.strategies
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// The newest candle of the sequence.
fn latest(candles: &[Candle]) -> Result<&Candle> {
    candles.last().ok_or(Error::InsufficientData {
        required: 1,
        available: 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_order_is_fixed() {
        let catalog = Catalog::standard();
        let names = catalog.names();
        assert_eq!(names.len(), 21);
        assert_eq!(names[0], "trend_breakout");
        assert_eq!(names[2], "close_drift_confirm");
        assert_eq!(names[12], "macd_cross");
        assert_eq!(names[20], "sma_macd_confirmation");
    }

    #[test]
    fn strategy_names_are_unique() {
        let mut names = Catalog::standard().names();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 21);
    }

    #[test]
    fn latest_rejects_empty_sequence() {
        assert!(latest(&[]).unwrap_err().is_insufficient_data());
    }
}
