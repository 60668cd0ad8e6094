use async_trait::async_trait;

use crate::{AnalysisReport, Result};

/// Subject line used for every analysis summary.
pub const REPORT_SUBJECT: &str = "Forex Data Analysis Results";

/// Delivery channel for analysis summaries.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, subject: &str, body: &str) -> Result<()>;
}

/// Plain-text summary of a report: one block of up/down/flat counts per
/// symbol, followed by any skipped symbols.
pub fn format_report(report: &AnalysisReport) -> String {
    let mut out = String::from("Analysis Results:\n");
    for (symbol, analysis) in &report.symbols {
        out.push_str(&format!(
            "\n{symbol}\nUp Count: {}\nDown Count: {}\nFlat Count: {}\n",
            analysis.counts.up, analysis.counts.down, analysis.counts.flat
        ));
    }
    if !report.skipped.is_empty() {
        out.push_str("\nSkipped:\n");
        for (symbol, reason) in &report.skipped {
            out.push_str(&format!("{symbol}: {reason}\n"));
        }
    }
    out
}
