//! Moving-average trend and channel strategies.

use common::{ensure_len, Candle, Casing, Classification, Direction, Result};

use crate::indicators::atr::atr;
use crate::indicators::donchian::donchian;
use crate::indicators::fractal::{fractal_at, Fractal};
use crate::indicators::macd::macd_single_signal;
use crate::indicators::moving_average::{sma, sma_series};
use crate::indicators::rsi::rsi_leading_short;
use crate::indicators::closes;

use super::latest;

fn compare(a: f64, b: f64) -> Direction {
    if a > b {
        Direction::Up
    } else if a < b {
        Direction::Down
    } else {
        Direction::Flat
    }
}

/// SMA(10) trend confirmed by a break of the sequence's resistance or
/// support. Without a matching breakout the raw trend is returned.
pub fn trend_breakout(candles: &[Candle]) -> Result<Classification> {
    const TREND_PERIOD: usize = 10;

    let average = sma(candles, TREND_PERIOD)?;
    let last_close = latest(candles)?.c;
    let trend = compare(last_close, average);

    let resistance = candles.iter().map(|c| c.h).fold(f64::NEG_INFINITY, f64::max);
    let support = candles.iter().map(|c| c.l).fold(f64::INFINITY, f64::min);

    let direction = match trend {
        Direction::Up if last_close > resistance => Direction::Up,
        Direction::Down if last_close < support => Direction::Down,
        other => other,
    };
    Ok(direction.label(Casing::Lower))
}

/// Sign of the mean close-to-close change across the whole sequence.
pub fn close_drift(candles: &[Candle]) -> Result<Classification> {
    const MIN_CANDLES: usize = 10;
    ensure_len(candles.len(), MIN_CANDLES)?;

    let total = candles.windows(2).fold(0.0, |acc, w| acc + (w[1].c - w[0].c));
    let average = total / (candles.len() - 1) as f64;
    Ok(compare(average, 0.0).label(Casing::Lower))
}

/// Percentage change taken from the latest close to the earliest one: a
/// sequence that ended below where it started reads as up. Anything that is
/// not a positive change, including no change, reads as down.
pub fn window_change(candles: &[Candle]) -> Result<Classification> {
    const MIN_CANDLES: usize = 10;
    ensure_len(candles.len(), MIN_CANDLES)?;

    let base = candles[candles.len() - 1].c;
    let target = candles[0].c;
    let change = (target - base) / base * 100.0;
    let direction = if change > 0.0 {
        Direction::Up
    } else {
        Direction::Down
    };
    Ok(direction.label(Casing::Lower))
}

/// Fresh SMA(4)/SMA(8) crossover on the latest candle, confirmed by a
/// fractal in the same direction.
pub fn fractal_ma_cross(candles: &[Candle]) -> Result<Classification> {
    const SHORT: usize = 4;
    const LONG: usize = 8;

    let previous = &candles[..candles.len().saturating_sub(1)];
    let short_prev = sma(previous, SHORT)?;
    let long_prev = sma(previous, LONG)?;
    let short_now = sma(candles, SHORT)?;
    let long_now = sma(candles, LONG)?;

    let direction = match fractal_at(candles, candles.len() - 1) {
        Some(Fractal::Bearish) if short_now < long_now && short_prev > long_prev => {
            Direction::Down
        }
        Some(Fractal::Bullish) if short_now > long_now && short_prev < long_prev => Direction::Up,
        _ => Direction::Flat,
    };
    Ok(direction.label(Casing::Lower))
}

/// Counter-trend read against a Keltner channel of SMA(20) ± 2·ATR(14):
/// a rising SMA(5)/SMA(10) with price under the channel reads up, a
/// falling one with price over it reads down.
pub fn keltner_reversal(candles: &[Candle]) -> Result<Classification> {
    const MULTIPLIER: f64 = 2.0;
    const ATR_PERIOD: usize = 14;
    const CENTER_PERIOD: usize = 20;

    let ma5 = sma(candles, 5)?;
    let ma10 = sma(candles, 10)?;
    let center = sma(candles, CENTER_PERIOD)?;
    let range = atr(candles, ATR_PERIOD)?;
    let upper = center + MULTIPLIER * range;
    let lower = center - MULTIPLIER * range;
    let price = latest(candles)?.c;

    let direction = if ma5 > ma10 && price < lower {
        Direction::Up
    } else if ma5 < ma10 && price > upper {
        Direction::Down
    } else {
        Direction::Flat
    };
    Ok(direction.label(Casing::Title))
}

/// SMA(5)/SMA(8)/SMA(13) alligator alignment confirmed by RSI(35) on the
/// opening candles against 50.
pub fn alligator_rsi(candles: &[Candle]) -> Result<Classification> {
    const RSI_PERIOD: usize = 35;

    let closes = closes(candles);
    let jaw = last_of(&sma_series(&closes, 13)?);
    let teeth = last_of(&sma_series(&closes, 8)?);
    let lips = last_of(&sma_series(&closes, 5)?);
    let rsi = rsi_leading_short(&closes, RSI_PERIOD)?;

    let direction = if lips < jaw && teeth < jaw && rsi < 50.0 {
        Direction::Down
    } else if lips > jaw && teeth > jaw && rsi > 50.0 {
        Direction::Up
    } else {
        Direction::Flat
    };
    Ok(direction.label(Casing::Title))
}

/// Donchian channel over the whole sequence with midline momentum.
///
/// A close pinned to the upper edge while above the midline is `sell`, one
/// pinned to the lower edge while below it is `buy`; otherwise the midline
/// side decides `up`/`down`, and a close exactly on the midline is `hold`.
pub fn donchian_momentum(candles: &[Candle]) -> Result<Classification> {
    const MIN_CANDLES: usize = 10;
    ensure_len(candles.len(), MIN_CANDLES)?;

    let channel = donchian(candles)?;
    let close = latest(candles)?.c;
    let momentum = compare(close, channel.middle);

    Ok(match momentum {
        Direction::Up if close >= channel.upper => Classification::trade("sell"),
        Direction::Down if close <= channel.lower => Classification::trade("buy"),
        Direction::Up => Direction::Up.label(Casing::Lower),
        Direction::Down => Direction::Down.label(Casing::Lower),
        Direction::Flat => Classification::trade("hold"),
    })
}

/// SMA(5)/SMA(22) trend confirmed by MACD(12, 26, 9) whose signal line is
/// the MACD value itself, so the MACD side always reads "sell".
pub fn sma_macd_confirmation(candles: &[Candle]) -> Result<Classification> {
    let sma5 = sma(candles, 5)?;
    let sma22 = sma(candles, 22)?;
    let macd = macd_single_signal(&closes(candles), 12, 26, 9)?;

    let trend_up = sma5 > sma22;
    let macd_buy = macd.macd > macd.signal;

    let direction = match (trend_up, macd_buy) {
        (true, true) => Direction::Up,
        (false, false) => Direction::Down,
        _ => Direction::Flat,
    };
    Ok(direction.label(Casing::Title))
}

fn last_of(series: &[f64]) -> f64 {
    series[series.len() - 1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::test_support::{candles_from_closes, falling, rising};

    #[test]
    fn trend_breakout_follows_sma_trend() {
        assert_eq!(trend_breakout(&candles_from_closes(&rising(30))).unwrap().to_string(), "up");
        assert_eq!(
            trend_breakout(&candles_from_closes(&falling(30))).unwrap().to_string(),
            "down"
        );
        assert_eq!(trend_breakout(&candles_from_closes(&[3.0; 12])).unwrap().to_string(), "flat");
    }

    #[test]
    fn trend_breakout_confirms_a_close_above_resistance() {
        let mut candles = candles_from_closes(&rising(12));
        // a last candle whose close is above every high, its own included
        let last = candles.len() - 1;
        candles[last].h = candles[last].c - 0.1;
        assert_eq!(trend_breakout(&candles).unwrap().to_string(), "up");
    }

    #[test]
    fn close_drift_and_window_change_disagree_on_trend() {
        let up = candles_from_closes(&rising(20));
        assert_eq!(close_drift(&up).unwrap().to_string(), "up");
        assert_eq!(window_change(&up).unwrap().to_string(), "down");

        let down = candles_from_closes(&falling(20));
        assert_eq!(close_drift(&down).unwrap().to_string(), "down");
        assert_eq!(window_change(&down).unwrap().to_string(), "up");

        let flat = candles_from_closes(&[2.0; 20]);
        assert_eq!(close_drift(&flat).unwrap().to_string(), "flat");
        assert_eq!(window_change(&flat).unwrap().to_string(), "down");
    }

    #[test]
    fn whole_sequence_strategies_need_ten_candles() {
        let short = candles_from_closes(&rising(9));
        assert!(close_drift(&short).unwrap_err().is_insufficient_data());
        assert!(window_change(&short).unwrap_err().is_insufficient_data());
        assert!(donchian_momentum(&short).unwrap_err().is_insufficient_data());
    }

    #[test]
    fn fractal_cross_needs_a_fresh_crossover() {
        // A steady rise has a bearish fractal but no fresh bearish cross.
        let candles = candles_from_closes(&rising(20));
        assert_eq!(fractal_ma_cross(&candles).unwrap().to_string(), "flat");
    }

    #[test]
    fn fractal_cross_reads_a_bearish_breakdown() {
        // SMA(4) above SMA(8) one candle ago, below it now, highs rising
        let closes = [10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 12.0, 2.0];
        let mut candles = candles_from_closes(&closes);
        candles[6].h = 20.0;
        candles[7].h = 21.0;
        candles[8].h = 22.0;
        assert_eq!(fractal_ma_cross(&candles).unwrap().to_string(), "down");
    }

    #[test]
    fn fractal_cross_reads_a_bullish_breakout() {
        let closes = [10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 8.0, 18.0];
        let mut candles = candles_from_closes(&closes);
        candles[6].l = 5.0;
        candles[7].l = 4.0;
        candles[8].l = 3.0;
        assert_eq!(fractal_ma_cross(&candles).unwrap().to_string(), "up");
    }

    #[test]
    fn keltner_reversal_is_flat_in_steady_trends() {
        assert_eq!(keltner_reversal(&candles_from_closes(&rising(30))).unwrap().to_string(), "Flat");
        assert!(keltner_reversal(&candles_from_closes(&rising(19)))
            .unwrap_err()
            .is_insufficient_data());
    }

    #[test]
    fn keltner_reversal_reads_an_oversold_spike() {
        // Short MA above long MA, then a close far under the channel
        let mut closes: Vec<f64> = vec![100.0; 15];
        closes.extend([101.0, 102.0, 103.0, 104.0, 60.0]);
        let mut candles = candles_from_closes(&closes);
        // keep ma5 > ma10 by lifting the middle closes
        for candle in candles[10..15].iter_mut() {
            candle.c = 90.0;
        }
        assert_eq!(keltner_reversal(&candles).unwrap().to_string(), "Up");
    }

    #[test]
    fn alligator_rsi_needs_thirty_five_candles() {
        assert!(alligator_rsi(&candles_from_closes(&rising(34)))
            .unwrap_err()
            .is_insufficient_data());
        assert_eq!(alligator_rsi(&candles_from_closes(&rising(40))).unwrap().to_string(), "Up");
        assert_eq!(
            alligator_rsi(&candles_from_closes(&falling(40))).unwrap().to_string(),
            "Down"
        );
    }

    #[test]
    fn donchian_momentum_vocabulary() {
        let up = candles_from_closes(&rising(20));
        assert_eq!(donchian_momentum(&up).unwrap().to_string(), "up");

        let mut pinned = candles_from_closes(&rising(20));
        let n = pinned.len() - 1;
        pinned[n].h = pinned[n].c;
        assert_eq!(donchian_momentum(&pinned).unwrap(), Classification::trade("sell"));

        let mut floored = candles_from_closes(&falling(20));
        let n = floored.len() - 1;
        floored[n].l = floored[n].c;
        assert_eq!(donchian_momentum(&floored).unwrap(), Classification::trade("buy"));

        let flat = candles_from_closes(&[1.0; 12]);
        assert_eq!(donchian_momentum(&flat).unwrap(), Classification::trade("hold"));
    }

    #[test]
    fn sma_macd_confirmation_never_confirms_up() {
        assert_eq!(
            sma_macd_confirmation(&candles_from_closes(&rising(40))).unwrap().to_string(),
            "Flat"
        );
        assert_eq!(
            sma_macd_confirmation(&candles_from_closes(&falling(40))).unwrap().to_string(),
            "Down"
        );
    }

    #[test]
    fn sma_macd_confirmation_runs_from_the_slow_period() {
        assert!(sma_macd_confirmation(&candles_from_closes(&rising(25))).is_err());
        assert_eq!(
            sma_macd_confirmation(&candles_from_closes(&falling(26))).unwrap().to_string(),
            "Down"
        );
    }
}
