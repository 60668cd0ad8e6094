use common::{ensure_len, Candle, Result};

/// Stochastic oscillator lines.
#[derive(Debug, Clone, PartialEq)]
pub struct Stochastic {
    /// %K for every candle from index `period_k - 1`.
    pub k: Vec<f64>,
    /// Simple average of `period_d` consecutive %K values.
    pub d: Vec<f64>,
}

/// `%K = (close − lowestLow) / (highestHigh − lowestLow) · 100` over
/// `period_k` candles; `%D` = SMA(%K, `period_d`).
///
/// A window with no range divides by zero and is reported as-is.
pub fn stochastic(candles: &[Candle], period_k: usize, period_d: usize) -> Result<Stochastic> {
    let period_k = period_k.max(1);
    let period_d = period_d.max(1);
    ensure_len(candles.len(), period_k + period_d - 1)?;

    let k: Vec<f64> = candles
        .windows(period_k)
        .map(|window| {
            let highest = window.iter().map(|c| c.h).fold(f64::NEG_INFINITY, f64::max);
            let lowest = window.iter().map(|c| c.l).fold(f64::INFINITY, f64::min);
            let close = window[window.len() - 1].c;
            (close - lowest) / (highest - lowest) * 100.0
        })
        .collect();

    let d = k
        .windows(period_d)
        .map(|w| w.iter().fold(0.0, |acc, v| acc + v) / period_d as f64)
        .collect();

    Ok(Stochastic { k, d })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::test_support::{assert_close, candles_from_closes, rising};

    #[test]
    fn close_at_top_of_range_reads_high() {
        let candles = candles_from_closes(&rising(10));
        let stoch = stochastic(&candles, 3, 2).unwrap();
        assert_eq!(stoch.k.len(), 8);
        assert_eq!(stoch.d.len(), 7);
        // window lows 99.5.., highs ..; close sits 0.5 under the top of a 3.0 range
        assert_close(stoch.k[0], 2.5 / 3.0 * 100.0);
        assert_close(stoch.d[0], 2.5 / 3.0 * 100.0);
    }

    #[test]
    fn d_line_requires_both_periods() {
        let candles = candles_from_closes(&rising(51));
        assert!(stochastic(&candles, 8, 45).unwrap_err().is_insufficient_data());
        let candles = candles_from_closes(&rising(52));
        assert_eq!(stochastic(&candles, 8, 45).unwrap().d.len(), 1);
    }
}
