use serde::Serialize;

use crate::indicator::{Indicator, clamp_period, prices};
use crate::model::{IndicatorResult, PricePoint, Signal};

pub const DEFAULT_PERIOD: usize = 20;
pub const DEFAULT_MULTIPLIER: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Bands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// Bollinger Bands over the trailing `period` prices with the default 2σ
/// width. All-zero when the series is shorter than `period`.
pub fn compute_bollinger(series: &[PricePoint], period: usize) -> Bands {
    compute_bollinger_with(series, period, DEFAULT_MULTIPLIER)
}

pub fn compute_bollinger_with(series: &[PricePoint], period: usize, multiplier: f64) -> Bands {
    let period = clamp_period(period);
    let prices = prices(series);
    if prices.len() < period {
        return Bands::default();
    }

    let window = &prices[prices.len() - period..];
    let middle = window.iter().sum::<f64>() / period as f64;
    // Population variance
    let variance = window.iter().map(|&p| (p - middle).powi(2)).sum::<f64>() / period as f64;
    let std_dev = variance.sqrt();
    Bands {
        upper: middle + multiplier * std_dev,
        middle,
        lower: middle - multiplier * std_dev,
    }
}

pub fn bollinger_signal(price: f64, bands: &Bands) -> Signal {
    if price > bands.upper {
        Signal::Sell
    } else if price < bands.lower {
        Signal::Buy
    } else {
        Signal::Neutral
    }
}

pub struct Bollinger {
    period: usize,
    multiplier: f64,
}

impl Bollinger {
    pub fn new(period: usize, multiplier: f64) -> Self {
        Self {
            period: clamp_period(period),
            multiplier,
        }
    }
}

impl Indicator for Bollinger {
    fn name(&self) -> &str {
        "bollinger"
    }

    fn period(&self) -> usize {
        self.period
    }

    fn cache_key(&self) -> String {
        format!("bollinger:{}:{}", self.period, self.multiplier)
    }

    fn required_points(&self) -> usize {
        self.period
    }

    fn evaluate(&self, series: &[PricePoint]) -> IndicatorResult {
        let name = format!("Bollinger Bands ({})", self.period);
        let Some(last) = series.last().filter(|_| series.len() >= self.period) else {
            return IndicatorResult {
                name,
                value: 0.0,
                signal: Signal::Neutral,
                description: "Not enough data for bands".into(),
            };
        };

        let bands = compute_bollinger_with(series, self.period, self.multiplier);
        let signal = bollinger_signal(last.value, &bands);
        let position = match signal {
            Signal::Sell => "Price above upper band",
            Signal::Buy => "Price below lower band",
            Signal::Neutral => "Price inside bands",
        };
        IndicatorResult {
            name,
            value: bands.middle,
            signal,
            description: format!(
                "{position} (upper {:.2}, lower {:.2})",
                bands.upper, bands.lower
            ),
        }
    }
}
