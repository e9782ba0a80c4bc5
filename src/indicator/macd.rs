use serde::Serialize;

use crate::indicator::ma::ema_prices;
use crate::indicator::{Indicator, prices};
use crate::model::{IndicatorResult, PricePoint, Signal};

pub const FAST_PERIOD: usize = 12;
pub const SLOW_PERIOD: usize = 26;

/// The signal line is a fixed fraction of the MACD line rather than an EMA of
/// it; the histogram is therefore always a tenth of the MACD value.
pub const SIGNAL_RATIO: f64 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct MacdValue {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

impl MacdValue {
    fn from_macd(macd: f64) -> Self {
        let signal = macd * SIGNAL_RATIO;
        Self {
            macd,
            signal,
            histogram: macd - signal,
        }
    }
}

/// Per-point MACD triples; all zero when the series is shorter than the slow
/// period.
pub fn compute_macd_series(series: &[PricePoint]) -> Vec<MacdValue> {
    if series.len() < SLOW_PERIOD {
        return vec![MacdValue::default(); series.len()];
    }

    let prices = prices(series);
    let fast = ema_prices(&prices, FAST_PERIOD);
    let slow = ema_prices(&prices, SLOW_PERIOD);
    fast.iter()
        .zip(slow.iter())
        .map(|(f, s)| MacdValue::from_macd(f - s))
        .collect()
}

/// MACD reading at the latest point.
pub fn compute_macd(series: &[PricePoint]) -> MacdValue {
    compute_macd_series(series)
        .last()
        .copied()
        .unwrap_or_default()
}

pub fn macd_signal(value: &MacdValue) -> Signal {
    if value.histogram > 0.0 {
        Signal::Buy
    } else if value.histogram < 0.0 {
        Signal::Sell
    } else {
        Signal::Neutral
    }
}

pub struct Macd;

impl Macd {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self::new()
    }
}

impl Indicator for Macd {
    fn name(&self) -> &str {
        "macd"
    }

    fn period(&self) -> usize {
        SLOW_PERIOD
    }

    fn required_points(&self) -> usize {
        SLOW_PERIOD
    }

    fn evaluate(&self, series: &[PricePoint]) -> IndicatorResult {
        let value = compute_macd(series);
        let signal = macd_signal(&value);
        let description = match signal {
            Signal::Buy => "Bullish momentum, MACD above signal line",
            Signal::Sell => "Bearish momentum, MACD below signal line",
            Signal::Neutral => "No momentum crossover",
        };
        IndicatorResult {
            name: format!("MACD ({FAST_PERIOD}, {SLOW_PERIOD})"),
            value: value.macd,
            signal,
            description: description.into(),
        }
    }
}
