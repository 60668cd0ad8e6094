use common::{ensure_len, Result};

/// Rate of change in percent against the close `period` candles earlier.
pub fn roc(closes: &[f64], period: usize) -> Result<Vec<f64>> {
    ensure_len(closes.len(), period.max(1) + 1)?;
    Ok(closes
        .windows(period + 1)
        .map(|w| (w[period] - w[0]) / w[0] * 100.0)
        .collect())
}
