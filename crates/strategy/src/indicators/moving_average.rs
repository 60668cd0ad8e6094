use common::{ensure_len, Candle, Result};

/// Mean of the last `period` closes.
pub fn sma(candles: &[Candle], period: usize) -> Result<f64> {
    ensure_len(candles.len(), period.max(1))?;
    let sum = candles[candles.len() - period..]
        .iter()
        .fold(0.0, |acc, candle| acc + candle.c);
    Ok(sum / period as f64)
}

/// Rolling mean of every `period`-wide window of `values`.
pub fn sma_series(values: &[f64], period: usize) -> Result<Vec<f64>> {
    ensure_len(values.len(), period.max(1))?;
    Ok(values
        .windows(period)
        .map(|w| w.iter().fold(0.0, |acc, v| acc + v) / period as f64)
        .collect())
}

/// Weighted mean of the *first* `period` candles, weight `period - i` for
/// the i-th candle. The oldest sample carries the largest weight.
pub fn wma_leading(candles: &[Candle], period: usize) -> Result<f64> {
    ensure_len(candles.len(), period.max(1))?;
    let mut weight_sum = 0.0;
    let mut weighted = 0.0;
    for (i, candle) in candles[..period].iter().enumerate() {
        let weight = (period - i) as f64;
        weighted += candle.c * weight;
        weight_sum += weight;
    }
    Ok(weighted / weight_sum)
}

/// Rolling weighted mean with weights `1..=period`, so the newest sample in
/// each window carries the largest weight.
pub fn wma_series(candles: &[Candle], period: usize) -> Result<Vec<f64>> {
    ensure_len(candles.len(), period.max(1))?;
    let weight_sum: f64 = (1..=period).map(|w| w as f64).sum();
    Ok(candles
        .windows(period)
        .map(|window| {
            let product = window
                .iter()
                .enumerate()
                .fold(0.0, |acc, (j, candle)| acc + candle.c * (j + 1) as f64);
            product / weight_sum
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::test_support::{assert_close, candles_from_closes};

    #[test]
    fn sma_uses_the_most_recent_window() {
        let candles = candles_from_closes(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_close(sma(&candles, 2).unwrap(), 4.5);
        assert_close(sma(&candles, 5).unwrap(), 3.0);
    }

    #[test]
    fn sma_fails_on_short_input() {
        let candles = candles_from_closes(&[1.0, 2.0]);
        assert!(sma(&candles, 3).unwrap_err().is_insufficient_data());
    }

    #[test]
    fn sma_series_rolls_over_every_window() {
        let series = sma_series(&[1.0, 2.0, 3.0, 4.0], 2).unwrap();
        assert_eq!(series, vec![1.5, 2.5, 3.5]);
    }

    #[test]
    fn wma_weight_directions_are_opposite() {
        let candles = candles_from_closes(&[1.0, 2.0, 3.0]);
        // (1*3 + 2*2 + 3*1) / 6
        assert_close(wma_leading(&candles, 3).unwrap(), 10.0 / 6.0);
        // (1*1 + 2*2 + 3*3) / 6
        assert_close(*wma_series(&candles, 3).unwrap().last().unwrap(), 14.0 / 6.0);
    }

    #[test]
    fn wma_leading_ignores_later_candles() {
        let candles = candles_from_closes(&[1.0, 2.0, 3.0, 50.0, 60.0]);
        assert_close(wma_leading(&candles, 3).unwrap(), 10.0 / 6.0);
    }
}
