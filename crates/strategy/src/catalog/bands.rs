//! Band, stop-and-reverse and voting strategies.

use common::{ensure_len, Candle, Casing, Classification, Direction, Result};

use crate::indicators::bollinger::{bollinger_ema_series, bollinger_sma};
use crate::indicators::closes;
use crate::indicators::ema::ema_incremental;
use crate::indicators::roc::roc;
use crate::indicators::rsi::rsi_trailing;
use crate::indicators::sar::{sar_backward_trend, sar_breach_close, sar_breach_low_high};
use crate::indicators::zigzag::zigzag;

use super::latest;

fn last<T: Copy>(series: &[T]) -> T {
    series[series.len() - 1]
}

/// EMA(5)/EMA(20) trend agreeing with the price's side of the SAR.
pub fn ema_sar_trend(candles: &[Candle]) -> Result<Classification> {
    let closes = closes(candles);
    let ema5 = last(&ema_incremental(&closes, 5)?);
    let ema20 = last(&ema_incremental(&closes, 20)?);
    let sar = last(&sar_breach_low_high(candles, 0.02, 0.2)?);
    let above_sar = closes[closes.len() - 1] > sar;

    let direction = if ema5 > ema20 && above_sar {
        Direction::Up
    } else if ema5 < ema20 && !above_sar {
        Direction::Down
    } else {
        Direction::Flat
    };
    Ok(direction.label(Casing::Title))
}

/// EMA(5)/EMA(20) trend bought on a pullback under the EMA Bollinger
/// middle band and sold on a rally over it.
pub fn ema_bollinger(candles: &[Candle]) -> Result<Classification> {
    const SHORT: usize = 5;
    const LONG: usize = 20;

    let closes = closes(candles);
    let short = last(&ema_incremental(&closes, SHORT)?);
    let long = last(&ema_incremental(&closes, LONG)?);
    let bands = last(&bollinger_ema_series(&closes, LONG, 2.0)?);
    let close = closes[closes.len() - 1];

    let direction = if short > long && close < bands.middle {
        Direction::Up
    } else if short < long && close > bands.middle {
        Direction::Down
    } else {
        Direction::Flat
    };
    Ok(direction.label(Casing::Upper))
}

/// Close outside the SMA Bollinger(20, 2) bands, read as a reversion.
pub fn bollinger_breakout(candles: &[Candle]) -> Result<Classification> {
    let bands = bollinger_sma(&closes(candles), 20, 2.0)?;
    let close = latest(candles)?.c;

    let direction = if close > bands.upper {
        Direction::Down
    } else if close < bands.lower {
        Direction::Up
    } else {
        Direction::Flat
    };
    Ok(direction.label(Casing::Lower))
}

/// Majority of four independent signals: Bollinger position, backward SAR,
/// zigzag and RSI(14). A tie is flat.
pub fn band_sar_vote(candles: &[Candle]) -> Result<Classification> {
    let closes = closes(candles);
    let bands = bollinger_sma(&closes, 20, 2.0)?;
    let close = latest(candles)?.c;

    let band_signal = if close > bands.upper {
        Direction::Down
    } else if close < bands.lower {
        Direction::Up
    } else if close > bands.middle {
        Direction::Up
    } else if close < bands.middle {
        Direction::Down
    } else {
        Direction::Flat
    };

    let rsi = rsi_trailing(&closes, 14)?;
    let rsi_signal = if rsi > 70.0 {
        Direction::Down
    } else if rsi < 30.0 {
        Direction::Up
    } else {
        Direction::Flat
    };

    let signals = [
        band_signal,
        sar_backward_trend(&closes)?,
        zigzag(&closes)?,
        rsi_signal,
    ];
    let up = signals.iter().filter(|s| **s == Direction::Up).count();
    let down = signals.iter().filter(|s| **s == Direction::Down).count();

    let direction = if up > down {
        Direction::Up
    } else if down > up {
        Direction::Down
    } else {
        Direction::Flat
    };
    Ok(direction.label(Casing::Lower))
}

/// Close-breach SAR side agreeing with the sign of ROC(14) gives a
/// `PUT`/`CALL` trade token; otherwise flat.
pub fn sar_roc(candles: &[Candle]) -> Result<Classification> {
    const ROC_PERIOD: usize = 14;

    ensure_len(candles.len(), ROC_PERIOD + 1)?;
    let sar = last(&sar_breach_close(candles, 0.02, 0.2)?);
    let momentum = last(&roc(&closes(candles), ROC_PERIOD)?);
    let price = latest(candles)?.c;

    if sar > price && momentum < 0.0 {
        Ok(Classification::trade("PUT"))
    } else if sar < price && momentum > 0.0 {
        Ok(Classification::trade("CALL"))
    } else {
        Ok(Classification::flat())
    }
}
