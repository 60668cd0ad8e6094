//! Exponential moving averages.
//!
//! Three recurrences are in use and they are not interchangeable: they round
//! differently and seed differently.

use common::{ensure_len, Result};

fn smoothing(period: usize) -> f64 {
    2.0 / (period as f64 + 1.0)
}

/// Final EMA value seeded with the first price, updated as
/// `price * k + ema * (1 - k)`.
pub fn ema_blend(values: &[f64], period: usize) -> Result<f64> {
    ensure_len(values.len(), period.max(1))?;
    let k = smoothing(period);
    let mut ema = values[0];
    for &price in &values[1..] {
        ema = price * k + ema * (1.0 - k);
    }
    Ok(ema)
}

/// Full EMA series seeded with the first price, updated as
/// `(price - ema) * k + ema`. One output per input.
pub fn ema_incremental(values: &[f64], period: usize) -> Result<Vec<f64>> {
    ensure_len(values.len(), period.max(1))?;
    let k = smoothing(period);
    let mut series = Vec::with_capacity(values.len());
    let mut ema = values[0];
    series.push(ema);
    for &price in &values[1..] {
        ema = (price - ema) * k + ema;
        series.push(ema);
    }
    Ok(series)
}

/// EMA series seeded with the SMA of the first `period` prices, then
/// `price * k + ema * (1 - k)`. Yields `len - period + 1` values.
pub fn ema_sma_seeded(values: &[f64], period: usize) -> Result<Vec<f64>> {
    ensure_len(values.len(), period.max(1))?;
    let k = smoothing(period);
    let seed = values[..period].iter().fold(0.0, |acc, v| acc + v) / period as f64;
    let mut series = Vec::with_capacity(values.len() - period + 1);
    series.push(seed);
    let mut ema = seed;
    for &price in &values[period..] {
        ema = price * k + ema * (1.0 - k);
        series.push(ema);
    }
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::test_support::assert_close;

    #[test]
    fn constant_series_stays_constant_for_every_seeding() {
        let prices = vec![1.2345; 30];
        assert_close(ema_blend(&prices, 10).unwrap(), 1.2345);
        assert_close(*ema_incremental(&prices, 10).unwrap().last().unwrap(), 1.2345);
        assert_close(*ema_sma_seeded(&prices, 10).unwrap().last().unwrap(), 1.2345);
    }

    #[test]
    fn incremental_series_has_one_value_per_price() {
        let series = ema_incremental(&[1.0, 2.0, 3.0], 3).unwrap();
        assert_eq!(series.len(), 3);
        assert_close(series[0], 1.0);
        assert_close(series[1], 1.5);
        assert_close(series[2], 2.25);
    }

    #[test]
    fn sma_seeded_starts_at_window_mean() {
        let series = ema_sma_seeded(&[1.0, 2.0, 3.0, 4.0], 3).unwrap();
        assert_eq!(series.len(), 2);
        assert_close(series[0], 2.0);
        assert_close(series[1], 3.0);
    }

    #[test]
    fn emas_fail_below_their_period() {
        assert!(ema_blend(&[1.0], 2).unwrap_err().is_insufficient_data());
        assert!(ema_incremental(&[], 1).unwrap_err().is_insufficient_data());
        assert!(ema_sma_seeded(&[1.0, 2.0], 3).unwrap_err().is_insufficient_data());
    }
}
