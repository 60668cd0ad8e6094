pub mod aggregator;
pub mod catalog;
pub mod indicators;

pub use aggregator::Aggregator;
pub use catalog::Catalog;

use common::{Candle, Classification, Result};

/// All catalog members satisfy this trait.
pub trait Strategy: Send + Sync {
    /// Stable identifier used in logs and failure reports.
    fn name(&self) -> &'static str;

    /// Classify the next move from a time-ascending candle sequence.
    ///
    /// Returns `Error::InsufficientData` when the sequence is shorter than
    /// any window the strategy needs.
    fn classify(&self, candles: &[Candle]) -> Result<Classification>;
}
