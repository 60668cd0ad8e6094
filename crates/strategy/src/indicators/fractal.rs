use common::Candle;

/// Three-candle fractal pattern ending at a given candle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fractal {
    /// Three rising highs.
    Bearish,
    /// Three falling lows.
    Bullish,
}

/// Fractal ending at `index`, if any. Rising highs win over falling lows.
pub fn fractal_at(candles: &[Candle], index: usize) -> Option<Fractal> {
    if index < 2 || index >= candles.len() {
        return None;
    }
    let (older, prev, current) = (&candles[index - 2], &candles[index - 1], &candles[index]);

    if older.h < prev.h && prev.h < current.h {
        Some(Fractal::Bearish)
    } else if older.l > prev.l && prev.l > current.l {
        Some(Fractal::Bullish)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::test_support::{candles_from_closes, falling, rising};

    #[test]
    fn detects_both_patterns() {
        let up = candles_from_closes(&rising(3));
        assert_eq!(fractal_at(&up, 2), Some(Fractal::Bearish));
        let down = candles_from_closes(&falling(3));
        assert_eq!(fractal_at(&down, 2), Some(Fractal::Bullish));
        assert_eq!(fractal_at(&down, 1), None);
        assert_eq!(fractal_at(&candles_from_closes(&[1.0, 1.0, 1.0]), 2), None);
    }
}
