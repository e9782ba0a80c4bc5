use crate::indicator::{Indicator, clamp_period, prices};
use crate::model::{IndicatorResult, PricePoint, Signal};

pub const DEFAULT_PERIOD: usize = 14;

const NEUTRAL_RSI: f64 = 50.0;
const OVERBOUGHT: f64 = 70.0;
const OVERSOLD: f64 = 30.0;

/// RSI over the most recent `period` price changes, using simple averages of
/// gains and losses.
///
/// Returns the neutral 50 when fewer than `period + 1` points are available
/// and 100 when the window holds no losses.
pub fn compute_rsi(series: &[PricePoint], period: usize) -> f64 {
    let period = clamp_period(period);
    let prices = prices(series);
    if prices.len() <= period {
        return NEUTRAL_RSI;
    }

    let window = &prices[prices.len() - period - 1..];
    let (gains, losses) = window
        .windows(2)
        .map(|w| w[1] - w[0])
        .fold((0.0, 0.0), |(gains, losses), delta| {
            if delta > 0.0 {
                (gains + delta, losses)
            } else {
                (gains, losses - delta)
            }
        });

    rsi_value(gains / period as f64, losses / period as f64)
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}

pub fn rsi_signal(rsi: f64) -> Signal {
    if rsi > OVERBOUGHT {
        Signal::Sell
    } else if rsi < OVERSOLD {
        Signal::Buy
    } else {
        Signal::Neutral
    }
}

pub struct Rsi {
    period: usize,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self {
            period: clamp_period(period),
        }
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        "rsi"
    }

    fn period(&self) -> usize {
        self.period
    }

    fn required_points(&self) -> usize {
        self.period.saturating_add(1)
    }

    fn evaluate(&self, series: &[PricePoint]) -> IndicatorResult {
        let value = compute_rsi(series, self.period);
        let signal = rsi_signal(value);
        let description = match signal {
            Signal::Sell => "Overbought, momentum may reverse lower",
            Signal::Buy => "Oversold, momentum may reverse higher",
            Signal::Neutral => "Momentum within normal range",
        };
        IndicatorResult {
            name: format!("RSI ({})", self.period),
            value,
            signal,
            description: description.into(),
        }
    }
}
