use common::{ensure_len, Candle, Result};

/// Raw vortex movement sums.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vortex {
    pub plus: f64,
    pub minus: f64,
}

/// Sums `|high[i] − low[i−1]|` and `|low[i] − high[i−1]|` over the first
/// `period` candles. No true-range normalisation.
pub fn vortex(candles: &[Candle], period: usize) -> Result<Vortex> {
    ensure_len(candles.len(), period.max(1))?;
    let (plus, minus) = candles[..period]
        .windows(2)
        .fold((0.0, 0.0), |(plus, minus), w| {
            (
                plus + (w[1].h - w[0].l).abs(),
                minus + (w[1].l - w[0].h).abs(),
            )
        });
    Ok(Vortex { plus, minus })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::test_support::{assert_close, candles_from_closes};

    #[test]
    fn upward_step_favours_positive_movement() {
        let candles = candles_from_closes(&[1.0, 2.0, 3.0]);
        let v = vortex(&candles, 2).unwrap();
        // |2.5 - 0.5| and |1.5 - 1.5|
        assert_close(v.plus, 2.0);
        assert_close(v.minus, 0.0);
    }

    #[test]
    fn vortex_needs_period_candles() {
        let candles = candles_from_closes(&[1.0]);
        assert!(vortex(&candles, 2).unwrap_err().is_insufficient_data());
    }
}
