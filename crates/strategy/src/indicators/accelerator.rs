use common::{ensure_len, Result};

use super::moving_average::sma_series;

/// `SMA(minuend_period) − SMA(subtrahend_period)`, smoothed by
/// `SMA(smoothing_period)`.
///
/// The two SMA series are paired index by index from their start, not by
/// candle, so with different periods each difference mixes windows ending
/// at different candles.
pub fn accelerator(
    closes: &[f64],
    minuend_period: usize,
    subtrahend_period: usize,
    smoothing_period: usize,
) -> Result<Vec<f64>> {
    let widest = minuend_period.max(subtrahend_period).max(1);
    ensure_len(closes.len(), widest + smoothing_period.max(1) - 1)?;
    let minuend = sma_series(closes, minuend_period)?;
    let subtrahend = sma_series(closes, subtrahend_period)?;
    let raw: Vec<f64> = minuend.iter().zip(&subtrahend).map(|(a, b)| a - b).collect();
    sma_series(&raw, smoothing_period)
}
