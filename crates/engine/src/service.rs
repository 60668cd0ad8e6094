use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use common::{
    format_report, AnalysisReport, Error, MarketDataSource, Notifier, Result, ScheduledJob,
    REPORT_SUBJECT,
};
use strategy::Aggregator;

use crate::cache::PayloadCache;

/// Fetch, analyze and notify for a fixed watchlist.
pub struct ForecastService {
    source: Arc<dyn MarketDataSource>,
    cache: PayloadCache,
    notifier: Arc<dyn Notifier>,
    aggregator: Arc<Aggregator>,
    tickers: Vec<String>,
}

impl ForecastService {
    pub fn new(
        source: Arc<dyn MarketDataSource>,
        cache: PayloadCache,
        notifier: Arc<dyn Notifier>,
        tickers: Vec<String>,
    ) -> Self {
        Self {
            source,
            cache,
            notifier,
            aggregator: Arc::new(Aggregator::default()),
            tickers,
        }
    }

    pub fn tickers(&self) -> &[String] {
        &self.tickers
    }

    /// Fetch every ticker and cache the raw payload. Stops at the first
    /// failure; tickers fetched before it keep their fresh payload.
    pub async fn fetch_all(&self) -> Result<()> {
        for ticker in &self.tickers {
            let body = self.source.fetch_time_series(ticker).await?;
            self.cache.store(ticker, &body).await?;
            info!(ticker = %ticker, "Live data fetched and cached");
        }
        Ok(())
    }

    /// Run the catalog over every cached ticker. Tickers with no cached
    /// payload, or one that cannot be read or parsed, are reported under
    /// `skipped`; the rest of the report is unaffected.
    pub async fn analyze_cached(&self, now: DateTime<Utc>) -> Result<AnalysisReport> {
        let mut batch = BTreeMap::new();
        let mut skipped = BTreeMap::new();

        for ticker in &self.tickers {
            match self.cache.load(ticker).await {
                Ok(Some(candles)) => {
                    batch.insert(ticker.clone(), candles);
                }
                Ok(None) => {
                    warn!(ticker = %ticker, "Data file not found, skipping");
                    skipped.insert(ticker.clone(), "no cached data".to_string());
                }
                Err(e) => {
                    warn!(ticker = %ticker, error = %e, "Unreadable cached payload, skipping");
                    skipped.insert(ticker.clone(), e.to_string());
                }
            }
        }

        let aggregator = self.aggregator.clone();
        let mut report = tokio::task::spawn_blocking(move || aggregator.analyze_batch(&batch, now))
            .await
            .map_err(|e| Error::Other(format!("analysis task failed: {e}")))?;
        report.skipped.extend(skipped);
        Ok(report)
    }

    /// Analyze the cache and deliver the summary. A delivery failure is
    /// logged and the report is still returned.
    pub async fn analyze_and_notify(&self, now: DateTime<Utc>) -> Result<AnalysisReport> {
        let report = self.analyze_cached(now).await?;
        if let Err(e) = self
            .notifier
            .notify(REPORT_SUBJECT, &format_report(&report))
            .await
        {
            error!(error = %e, "Failed to deliver analysis summary");
        }
        Ok(report)
    }

    /// One scheduled pass: fetch, then analyze and notify. Never fails;
    /// problems are logged and the pass ends early.
    pub async fn run_cycle(&self, now: DateTime<Utc>) -> Option<AnalysisReport> {
        info!("Running scheduled task");
        if let Err(e) = self.fetch_all().await {
            warn!(error = %e, "Failed to fetch live data");
            return None;
        }
        match self.analyze_and_notify(now).await {
            Ok(report) => Some(report),
            Err(e) => {
                error!(error = %e, "Analysis pass failed");
                None
            }
        }
    }
}

#[async_trait]
impl ScheduledJob for ForecastService {
    async fn trigger(&self, now: DateTime<Utc>) {
        self.run_cycle(now).await;
    }
}
