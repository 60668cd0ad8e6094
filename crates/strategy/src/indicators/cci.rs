use common::{ensure_len, Candle, Result};

pub fn typical_price(candle: &Candle) -> f64 {
    (candle.h + candle.l + candle.c) / 3.0
}

/// Commodity Channel Index for every full `period` window:
/// `(tp − SMA(tp)) / (0.015 · meanDeviation)`.
pub fn cci(candles: &[Candle], period: usize) -> Result<Vec<f64>> {
    ensure_len(candles.len(), period.max(1))?;
    let typical: Vec<f64> = candles.iter().map(typical_price).collect();
    Ok(typical
        .windows(period)
        .map(|window| {
            let sma = window.iter().fold(0.0, |acc, v| acc + v) / period as f64;
            let mean_deviation =
                window.iter().fold(0.0, |acc, v| acc + (v - sma).abs()) / period as f64;
            (window[window.len() - 1] - sma) / (0.015 * mean_deviation)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::test_support::{assert_close, candles_from_closes};

    #[test]
    fn cci_of_linear_rise() {
        let candles = candles_from_closes(&[1.0, 2.0, 3.0]);
        let values = cci(&candles, 3).unwrap();
        assert_eq!(values.len(), 1);
        // tp = close; sma 2, mean deviation 2/3
        assert_close(values[0], 1.0 / (0.015 * 2.0 / 3.0));
    }

    #[test]
    fn cci_fails_below_period() {
        let candles = candles_from_closes(&[1.0; 13]);
        assert!(cci(&candles, 14).unwrap_err().is_insufficient_data());
    }
}
