use common::{ensure_len, Candle, Result};

/// Channel bounds over the whole supplied sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Donchian {
    pub upper: f64,
    pub lower: f64,
    pub middle: f64,
}

/// Highest high and lowest low of every candle given; no fixed look-back.
pub fn donchian(candles: &[Candle]) -> Result<Donchian> {
    ensure_len(candles.len(), 2)?;
    let upper = candles.iter().map(|c| c.h).fold(f64::NEG_INFINITY, f64::max);
    let lower = candles.iter().map(|c| c.l).fold(f64::INFINITY, f64::min);
    Ok(Donchian {
        upper,
        lower,
        middle: (upper + lower) / 2.0,
    })
}
