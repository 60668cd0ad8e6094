use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use common::{AnalysisReport, Candle, Classification, Counts, Result, StrategyFailure, SymbolAnalysis};

use crate::Catalog;

/// Runs every catalog member over a candle sequence and tallies the verdicts.
///
/// A strategy that cannot run on the sequence contributes a lowercase
/// `flat` in its slot and is listed in `failures`, so `raw_results` always
/// has one entry per catalog member.
pub struct Aggregator {
    catalog: Catalog,
}

impl Aggregator {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Analyze one sequence. The input is sorted by timestamp first; the
    /// caller's slice is left untouched.
    pub fn analyze(&self, candles: &[Candle]) -> SymbolAnalysis {
        let mut sorted = candles.to_vec();
        sorted.sort_by_key(|candle| candle.t);

        let mut raw_results = Vec::with_capacity(self.catalog.len());
        let mut failures = Vec::new();

        for strategy in self.catalog.strategies() {
            match strategy.classify(&sorted) {
                Ok(verdict) => raw_results.push(verdict),
                Err(e) => {
                    debug!(strategy = strategy.name(), error = %e, "Strategy skipped, counting as flat");
                    failures.push(StrategyFailure {
                        strategy: strategy.name().to_string(),
                        reason: e.to_string(),
                    });
                    raw_results.push(Classification::flat());
                }
            }
        }

        let counts = Counts::tally(&raw_results);
        SymbolAnalysis {
            raw_results,
            counts,
            failures,
        }
    }

    /// Validate then analyze one symbol's candles.
    pub fn analyze_symbol(&self, symbol: &str, candles: &[Candle]) -> Result<SymbolAnalysis> {
        if let Some(bad) = candles.iter().find_map(|candle| candle.validate().err()) {
            warn!(symbol, error = %bad, "Rejecting malformed candle sequence");
            return Err(bad);
        }
        let analysis = self.analyze(candles);
        debug!(
            symbol,
            up = analysis.counts.up,
            down = analysis.counts.down,
            flat = analysis.counts.flat,
            "Symbol analyzed"
        );
        Ok(analysis)
    }

    /// Analyze every symbol in parallel. Malformed symbols are moved to
    /// `skipped` instead of failing the batch.
    pub fn analyze_batch(
        &self,
        batch: &BTreeMap<String, Vec<Candle>>,
        now: DateTime<Utc>,
    ) -> AnalysisReport {
        let outcomes: Vec<(String, Result<SymbolAnalysis>)> = batch
            .par_iter()
            .map(|(symbol, candles)| (symbol.clone(), self.analyze_symbol(symbol, candles)))
            .collect();

        let mut report = AnalysisReport::new(now);
        for (symbol, outcome) in outcomes {
            match outcome {
                Ok(analysis) => {
                    report.symbols.insert(symbol, analysis);
                }
                Err(e) => {
                    report.skipped.insert(symbol, e.to_string());
                }
            }
        }

        info!(
            run_id = %report.run_id,
            analyzed = report.symbols.len(),
            skipped = report.skipped.len(),
            "Analysis pass complete"
        );
        report
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(Catalog::standard())
    }
}
