use common::{ensure_len, Candle, Result};

/// True range of `candle` against the previous close.
pub fn true_range(candle: &Candle, prev_close: f64) -> f64 {
    (candle.h - candle.l)
        .max((candle.h - prev_close).abs())
        .max((candle.l - prev_close).abs())
}

/// Average true range over the first `period` candles. The `period - 1`
/// ranges are divided by `period`.
pub fn atr(candles: &[Candle], period: usize) -> Result<f64> {
    ensure_len(candles.len(), period.max(1))?;
    let sum = candles[..period]
        .windows(2)
        .fold(0.0, |acc, w| acc + true_range(&w[1], w[0].c));
    Ok(sum / period as f64)
}
