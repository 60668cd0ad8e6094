use async_trait::async_trait;

use crate::Result;

/// Abstraction over the upstream market-data provider.
///
/// `FinazonClient` in `crates/engine` implements this for live data.
/// Implementations return the raw response body so it can be cached
/// unchanged before parsing.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Fetch the latest candle page for `ticker` (e.g. "EUR/USD").
    async fn fetch_time_series(&self, ticker: &str) -> Result<String>;
}
