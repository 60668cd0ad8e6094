//! Parabolic stop-and-reverse.
//!
//! Each variant runs the same two-state machine, `sar += af * (ep - sar)`,
//! but they disagree on the breach test, on the order of the extreme-point
//! update and on what happens to the SAR at a reversal. Strategies are
//! tuned to their own variant, so none of them is shared.

use common::{ensure_len, Candle, Direction, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trend {
    Uptrend,
    Downtrend,
}

/// Starts below the first low. A low under the SAR (or a high over it)
/// flips the trend and resets the SAR to the extreme point; the new
/// candle's extreme is then applied in the new trend.
///
/// Returns one value per candle after the first.
pub fn sar_breach_low_high(candles: &[Candle], af_step: f64, af_max: f64) -> Result<Vec<f64>> {
    ensure_len(candles.len(), 2)?;
    let mut sar = candles[0].l;
    let mut ep = candles[0].h;
    let mut af = af_step;
    let mut trend = Trend::Uptrend;
    let mut trail = Vec::with_capacity(candles.len() - 1);

    for candle in &candles[1..] {
        sar += af * (ep - sar);

        match trend {
            Trend::Uptrend => {
                if candle.l < sar {
                    trend = Trend::Downtrend;
                    sar = ep;
                    ep = candle.l;
                    af = af_step;
                }
                if candle.h > ep {
                    ep = candle.h;
                    af = (af + af_step).min(af_max);
                }
            }
            Trend::Downtrend => {
                if candle.h > sar {
                    trend = Trend::Uptrend;
                    sar = ep;
                    ep = candle.h;
                    af = af_step;
                }
                if candle.l < ep {
                    ep = candle.l;
                    af = (af + af_step).min(af_max);
                }
            }
        }
        trail.push(sar);
    }
    Ok(trail)
}

/// Starts at the first high with the first low as extreme point. The
/// extreme point is extended before the reversal test, and the reversal is
/// triggered by the close crossing the SAR.
///
/// Returns one value per candle after the first.
pub fn sar_breach_close(candles: &[Candle], af_step: f64, af_max: f64) -> Result<Vec<f64>> {
    ensure_len(candles.len(), 2)?;
    let mut sar = candles[0].h;
    let mut ep = candles[0].l;
    let mut af = af_step;
    let mut trend = Trend::Uptrend;
    let mut trail = Vec::with_capacity(candles.len() - 1);

    for candle in &candles[1..] {
        sar += af * (ep - sar);

        match trend {
            Trend::Uptrend if candle.l < ep => {
                ep = candle.l;
                af = (af + af_step).min(af_max);
            }
            Trend::Downtrend if candle.h > ep => {
                ep = candle.h;
                af = (af + af_step).min(af_max);
            }
            _ => {}
        }

        match trend {
            Trend::Uptrend if candle.c < sar => {
                trend = Trend::Downtrend;
                sar = ep;
                ep = candle.h;
                af = af_step;
            }
            Trend::Downtrend if candle.c > sar => {
                trend = Trend::Uptrend;
                sar = ep;
                ep = candle.l;
                af = af_step;
            }
            _ => {}
        }
        trail.push(sar);
    }
    Ok(trail)
}

/// Starts at the first low. On a breach only the extreme point and the
/// acceleration reset; the SAR keeps its value. Otherwise the extreme point
/// tracks the running high (uptrend) or low (downtrend).
///
/// Returns one value per candle, the first being the seed.
pub fn sar_extreme_trail(candles: &[Candle], af_step: f64, af_max: f64) -> Result<Vec<f64>> {
    ensure_len(candles.len(), 2)?;
    let mut trail = Vec::with_capacity(candles.len());
    trail.push(candles[0].l);
    let mut trend = Trend::Uptrend;
    let mut ep = candles[0].h;
    let mut af = af_step;

    for candle in &candles[1..] {
        let previous = trail[trail.len() - 1];
        let sar = previous + af * (ep - previous);
        trail.push(sar);

        match trend {
            Trend::Uptrend if candle.l < sar => {
                trend = Trend::Downtrend;
                ep = candle.l;
                af = af_step;
            }
            Trend::Uptrend => {
                ep = ep.max(candle.h);
                af = (af + af_step).min(af_max);
            }
            Trend::Downtrend if candle.h > sar => {
                trend = Trend::Uptrend;
                ep = candle.h;
                af = af_step;
            }
            Trend::Downtrend => {
                ep = ep.min(candle.l);
                af = (af + af_step).min(af_max);
            }
        }
    }
    Ok(trail)
}

/// Simplified close-chasing SAR that walks the closes from newest to oldest
/// and reports where the oldest close sits relative to the chasing value.
/// Acceleration grows by 0.02 per step up to 0.2.
pub fn sar_backward_trend(closes: &[f64]) -> Result<Direction> {
    ensure_len(closes.len(), 2)?;
    let mut sar = closes[closes.len() - 1];
    let mut af: f64 = 0.02;
    let mut trend = Direction::Flat;

    for &close in closes[..closes.len() - 1].iter().rev() {
        sar += af * (close - sar);
        af = (af + 0.02).min(0.2);

        if close > sar {
            trend = Direction::Up;
        } else if close < sar {
            trend = Direction::Down;
        }
    }
    Ok(trend)
}
