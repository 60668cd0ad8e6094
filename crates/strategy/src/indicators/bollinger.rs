use common::{ensure_len, Result};

use super::ema::ema_incremental;

/// Bollinger band values at one point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// Bands over the last `period` closes around their simple mean.
/// Population standard deviation.
pub fn bollinger_sma(closes: &[f64], period: usize, multiplier: f64) -> Result<Bands> {
    ensure_len(closes.len(), period.max(1))?;
    let window = &closes[closes.len() - period..];
    let sma = window.iter().fold(0.0, |acc, p| acc + p) / period as f64;
    let squared = window.iter().fold(0.0, |acc, p| acc + (p - sma).powi(2));
    let std_dev = (squared / period as f64).sqrt();
    Ok(Bands {
        upper: sma + multiplier * std_dev,
        middle: sma,
        lower: sma - multiplier * std_dev,
    })
}

/// Bands for every candle around an incremental EMA of all closes.
///
/// Deviations are taken from the EMA, not from the window mean, and are
/// always divided by `period` even when the window is still filling up.
pub fn bollinger_ema_series(closes: &[f64], period: usize, multiplier: f64) -> Result<Vec<Bands>> {
    ensure_len(closes.len(), period.max(1))?;
    let middle = ema_incremental(closes, period)?;
    Ok(middle
        .iter()
        .enumerate()
        .map(|(i, &avg)| {
            let start = (i + 1).saturating_sub(period);
            let variance = closes[start..=i]
                .iter()
                .fold(0.0, |acc, p| acc + (p - avg).powi(2))
                / period as f64;
            let std_dev = variance.sqrt();
            Bands {
                upper: avg + std_dev * multiplier,
                middle: avg,
                lower: avg - std_dev * multiplier,
            }
        })
        .collect())
}
