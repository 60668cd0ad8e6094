/// MACD (Moving Average Convergence/Divergence).
///
/// MACD line = EMA(fast) − EMA(slow), signal line = EMA of the MACD line.
/// First-seeded variants produce a value from the first price on, so they
/// only need the longest of the three periods. The SMA-seeded variant needs
/// `slow + signal - 1` prices before its signal line has a value.
use common::{ensure_len, Result};

use super::ema::{ema_blend, ema_incremental, ema_sma_seeded};

/// Latest MACD and signal values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdPoint {
    pub macd: f64,
    pub signal: f64,
}

/// MACD and signal lines, one value per input price.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
}

/// MACD with a histogram, aligned on the newest values.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdHistogram {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

fn longest(fast: usize, slow: usize, signal: usize) -> usize {
    fast.max(slow).max(signal).max(1)
}

/// Scalar MACD from blend-form EMAs whose signal line is taken over a series
/// repeating the current MACD value. That line never separates from the
/// MACD value, so it is reported as the value itself and the two lines
/// never cross.
pub fn macd_constant_signal(
    closes: &[f64],
    fast: usize,
    slow: usize,
    signal: usize,
) -> Result<MacdPoint> {
    ensure_len(closes.len(), longest(fast, slow, signal))?;
    let macd = ema_blend(closes, fast)? - ema_blend(closes, slow)?;
    Ok(MacdPoint { macd, signal: macd })
}

/// Scalar MACD from incremental EMAs whose signal line is the EMA of the
/// one-element series `[macd]`, which is the MACD value itself.
pub fn macd_single_signal(
    closes: &[f64],
    fast: usize,
    slow: usize,
    signal: usize,
) -> Result<MacdPoint> {
    ensure_len(closes.len(), longest(fast, slow, signal))?;
    let fast_ema = last(&ema_incremental(closes, fast)?);
    let slow_ema = last(&ema_incremental(closes, slow)?);
    let macd = fast_ema - slow_ema;
    Ok(MacdPoint { macd, signal: macd })
}

/// Full MACD series from first-seeded incremental EMAs.
pub fn macd_series(closes: &[f64], fast: usize, slow: usize, signal: usize) -> Result<MacdSeries> {
    ensure_len(closes.len(), longest(fast, slow, signal))?;
    let fast_ema = ema_incremental(closes, fast)?;
    let slow_ema = ema_incremental(closes, slow)?;
    let macd: Vec<f64> = fast_ema.iter().zip(&slow_ema).map(|(f, s)| f - s).collect();
    let signal = ema_incremental(&macd, signal)?;
    Ok(MacdSeries { macd, signal })
}

/// MACD from SMA-seeded EMAs with histogram = MACD − signal.
///
/// The fast EMA is trimmed to the length of the slow one before
/// subtracting, and the histogram to the length of the signal line.
pub fn macd_histogram(
    closes: &[f64],
    fast: usize,
    slow: usize,
    signal: usize,
) -> Result<MacdHistogram> {
    ensure_len(closes.len(), slow.max(fast).max(1) + signal.max(1) - 1)?;
    let fast_ema = ema_sma_seeded(closes, fast)?;
    let slow_ema = ema_sma_seeded(closes, slow)?;
    let offset = fast_ema.len().saturating_sub(slow_ema.len());
    let macd: Vec<f64> = fast_ema[offset..]
        .iter()
        .zip(&slow_ema)
        .map(|(f, s)| f - s)
        .collect();
    let signal_line = ema_sma_seeded(&macd, signal)?;
    let offset = macd.len() - signal_line.len();
    let histogram = macd[offset..]
        .iter()
        .zip(&signal_line)
        .map(|(m, s)| m - s)
        .collect();
    Ok(MacdHistogram {
        macd,
        signal: signal_line,
        histogram,
    })
}

fn last(series: &[f64]) -> f64 {
    series[series.len() - 1]
}
