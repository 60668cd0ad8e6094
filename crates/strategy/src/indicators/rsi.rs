/// RSI (Relative Strength Index) variants.
///
/// All variants share `RSI = 100 − 100 / (1 + avgGain / avgLoss)` with both
/// averages divided by `period`, but differ in which deltas they sum and in
/// how a zero average loss is treated. The unguarded variants let the ratio
/// diverge: no losses gives `RS = ∞` and `RSI = 100`, while a flat series
/// gives `0 / 0` and an `NaN` RSI that fails every threshold comparison.
use common::{ensure_len, Result};

fn rsi_from(gains: f64, losses: f64, period: usize) -> f64 {
    let avg_gain = gains / period as f64;
    let avg_loss = losses / period as f64;
    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}

fn sum_moves(closes: &[f64]) -> (f64, f64) {
    closes.windows(2).fold((0.0, 0.0), |(gains, losses), w| {
        let change = w[1] - w[0];
        if change > 0.0 {
            (gains + change, losses)
        } else {
            (gains, losses - change)
        }
    })
}

/// Sums every close-to-close move in the sequence, then divides by `period`.
/// Unguarded.
pub fn rsi_whole_series(closes: &[f64], period: usize) -> Result<f64> {
    ensure_len(closes.len(), period.max(1) + 1)?;
    let (gains, losses) = sum_moves(closes);
    Ok(rsi_from(gains, losses, period))
}

/// Uses the last `period` moves. Returns 100 when there are no losses.
pub fn rsi_trailing(closes: &[f64], period: usize) -> Result<f64> {
    ensure_len(closes.len(), period.max(1) + 1)?;
    let (gains, losses) = sum_moves(&closes[closes.len() - period - 1..]);
    let avg_gain = gains / period as f64;
    let avg_loss = losses / period as f64;
    if avg_loss == 0.0 {
        return Ok(100.0);
    }
    let rs = avg_gain / avg_loss;
    Ok(100.0 - 100.0 / (1.0 + rs))
}

/// Uses the first `period` moves of the sequence. Unguarded.
pub fn rsi_leading(closes: &[f64], period: usize) -> Result<f64> {
    ensure_len(closes.len(), period.max(1) + 1)?;
    let (gains, losses) = sum_moves(&closes[..=period]);
    Ok(rsi_from(gains, losses, period))
}

/// Uses the first `period - 1` moves but still divides by `period`. Unguarded.
pub fn rsi_leading_short(closes: &[f64], period: usize) -> Result<f64> {
    ensure_len(closes.len(), period.max(2))?;
    let (gains, losses) = sum_moves(&closes[..period]);
    Ok(rsi_from(gains, losses, period))
}
