//! Oscillator and MACD driven strategies.

use tracing::debug;

use common::{ensure_len, Candle, Casing, Classification, Direction, Result};

use crate::indicators::accelerator::accelerator;
use crate::indicators::cci::cci;
use crate::indicators::closes;
use crate::indicators::ema::ema_sma_seeded;
use crate::indicators::macd::{macd_constant_signal, macd_histogram, macd_series};
use crate::indicators::moving_average::{wma_leading, wma_series};
use crate::indicators::rsi::{rsi_leading, rsi_whole_series};
use crate::indicators::sar::sar_extreme_trail;
use crate::indicators::stochastic::stochastic;
use crate::indicators::vortex::vortex;

use super::latest;

const OVERBOUGHT: f64 = 70.0;
const OVERSOLD: f64 = 30.0;

fn last(series: &[f64]) -> f64 {
    series[series.len() - 1]
}

/// RSI(14) summed over every move in the sequence. Extremes produce the
/// qualified `Down (Overbought)` / `Up (Oversold)` tokens; in between the
/// last two closes decide.
pub fn rsi_momentum(candles: &[Candle]) -> Result<Classification> {
    let closes = closes(candles);
    let rsi = rsi_whole_series(&closes, 14)?;

    if rsi > OVERBOUGHT {
        return Ok(Classification::qualified("Down (Overbought)"));
    }
    if rsi < OVERSOLD {
        return Ok(Classification::qualified("Up (Oversold)"));
    }

    let last_close = closes[closes.len() - 1];
    let prev_close = closes[closes.len() - 2];
    let direction = if last_close > prev_close {
        Direction::Up
    } else if last_close < prev_close {
        Direction::Down
    } else {
        Direction::Flat
    };
    Ok(direction.label(Casing::Title))
}

/// RSI(14) over the opening moves of the sequence, mean-reverting.
pub fn rsi_threshold(candles: &[Candle]) -> Result<Classification> {
    let rsi = rsi_leading(&closes(candles), 14)?;
    let direction = if rsi > OVERBOUGHT {
        Direction::Down
    } else if rsi < OVERSOLD {
        Direction::Up
    } else {
        Direction::Flat
    };
    Ok(direction.label(Casing::Lower))
}

/// Latest MACD(12, 26, 9) line against its signal line.
pub fn macd_cross(candles: &[Candle]) -> Result<Classification> {
    let series = macd_series(&closes(candles), 12, 26, 9)?;
    let macd = last(&series.macd);
    let signal = last(&series.signal);

    let direction = if macd > signal {
        Direction::Up
    } else if macd < signal {
        Direction::Down
    } else {
        Direction::Flat
    };
    Ok(direction.label(Casing::Lower))
}

/// Fresh zero cross of the MACD(12, 26, 9) histogram, confirmed by the
/// price sitting on the same side of EMA(9) and of the SAR.
pub fn macd_histogram_sar(candles: &[Candle]) -> Result<Classification> {
    const FAST: usize = 12;
    const SLOW: usize = 26;
    const SIGNAL: usize = 9;

    // two histogram values
    ensure_len(candles.len(), SLOW + SIGNAL)?;

    let closes = closes(candles);
    let macd = macd_histogram(&closes, FAST, SLOW, SIGNAL)?;
    let histogram = last(&macd.histogram);
    let previous = macd.histogram[macd.histogram.len() - 2];
    let ema = last(&ema_sma_seeded(&closes, 9)?);
    let sar = last(&sar_extreme_trail(candles, 0.02, 0.2)?);
    let price = latest(candles)?.c;

    let direction = if histogram > 0.0 && previous <= 0.0 && sar < price && ema < price {
        Direction::Up
    } else if histogram < 0.0 && previous >= 0.0 && sar > price && ema > price {
        Direction::Down
    } else {
        Direction::Flat
    };
    Ok(direction.label(Casing::Lower))
}

/// Close against a descending-weight WMA(5), MACD(3, 5, 2) and Vortex(2);
/// all three must agree.
pub fn wma_macd_vortex(candles: &[Candle]) -> Result<Classification> {
    let wma = wma_leading(candles, 5)?;
    let macd = macd_constant_signal(&closes(candles), 3, 5, 2)?;
    let vortex = vortex(candles, 2)?;
    let close = latest(candles)?.c;

    let direction = if close > wma && macd.macd > macd.signal && vortex.plus > vortex.minus {
        Direction::Up
    } else if close < wma && macd.macd < macd.signal && vortex.plus < vortex.minus {
        Direction::Down
    } else {
        Direction::Flat
    };
    Ok(direction.label(Casing::Lower))
}

/// WMA(40) upward cross into an overbought Stochastic(8, 45) with negative
/// acceleration reads down; an oversold %D with positive acceleration
/// reads up.
pub fn wma_stochastic_accelerator(candles: &[Candle]) -> Result<Classification> {
    ensure_len(candles.len(), 2)?;
    let wma = last(&wma_series(candles, 40)?);
    let stoch = stochastic(candles, 8, 45)?;
    let d = last(&stoch.d);
    let ao = last(&accelerator(&closes(candles), 12, 2, 4)?);

    let last_candle = &candles[candles.len() - 1];
    let prev_candle = &candles[candles.len() - 2];
    let crossed_up = last_candle.c > wma && prev_candle.c < wma;

    let direction = if crossed_up && d > 80.0 && ao < 0.0 {
        Direction::Down
    } else if d < 20.0 && ao > 0.0 {
        Direction::Up
    } else {
        Direction::Flat
    };
    Ok(direction.label(Casing::Upper))
}

/// CCI(14) with an alligator read off the last three closes.
pub fn cci_alligator(candles: &[Candle]) -> Result<Classification> {
    let cci = last(&cci(candles, 14)?);
    ensure_len(candles.len(), 3)?;

    let n = candles.len();
    let green = candles[n - 1].c;
    let red = candles[n - 2].c;
    let blue = candles[n - 3].c;
    debug!(green, red, blue, cci, "Alligator lines");

    let below_red = green < red;
    let below_blue = green < blue;
    let negative = cci < 0.0;

    let direction = if below_red && below_blue && negative {
        Direction::Down
    } else if !below_red && !below_blue && !negative {
        Direction::Up
    } else {
        Direction::Flat
    };
    Ok(direction.label(Casing::Title))
}
