use serde::Serialize;

use crate::indicator::{Indicator, clamp_period, prices};
use crate::model::{IndicatorResult, PricePoint, Signal};

pub const DEFAULT_PERIOD: usize = 14;

/// %D is approximated as a fixed fraction of %K.
pub const D_RATIO: f64 = 0.9;

const NEUTRAL_K: f64 = 50.0;
const OVERBOUGHT: f64 = 80.0;
const OVERSOLD: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StochasticValue {
    pub k: f64,
    pub d: f64,
}

impl StochasticValue {
    const NEUTRAL: Self = Self {
        k: NEUTRAL_K,
        d: NEUTRAL_K,
    };
}

/// Stochastic %K/%D of the latest price against the trailing `period` window.
///
/// Neutral 50/50 when the series is shorter than `period`; a window with no
/// range reports %K = 50.
pub fn compute_stochastic(series: &[PricePoint], period: usize) -> StochasticValue {
    let period = clamp_period(period);
    let prices = prices(series);
    if prices.len() < period {
        return StochasticValue::NEUTRAL;
    }

    let window = &prices[prices.len() - period..];
    let current = window[window.len() - 1];
    let lowest = window.iter().copied().fold(f64::INFINITY, f64::min);
    let highest = window.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = highest - lowest;

    let k = if range > 0.0 {
        (current - lowest) / range * 100.0
    } else {
        NEUTRAL_K
    };
    StochasticValue { k, d: k * D_RATIO }
}

pub fn stochastic_signal(value: &StochasticValue) -> Signal {
    if value.k > OVERBOUGHT {
        Signal::Sell
    } else if value.k < OVERSOLD {
        Signal::Buy
    } else {
        Signal::Neutral
    }
}

pub struct Stochastic {
    period: usize,
}

impl Stochastic {
    pub fn new(period: usize) -> Self {
        Self {
            period: clamp_period(period),
        }
    }
}

impl Indicator for Stochastic {
    fn name(&self) -> &str {
        "stochastic"
    }

    fn period(&self) -> usize {
        self.period
    }

    fn required_points(&self) -> usize {
        self.period
    }

    fn evaluate(&self, series: &[PricePoint]) -> IndicatorResult {
        let value = compute_stochastic(series, self.period);
        let signal = stochastic_signal(&value);
        let zone = match signal {
            Signal::Sell => "Overbought",
            Signal::Buy => "Oversold",
            Signal::Neutral => "Mid-range",
        };
        IndicatorResult {
            name: format!("Stochastic ({})", self.period),
            value: value.k,
            signal,
            description: format!("{zone}, %K {:.1} / %D {:.1}", value.k, value.d),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicator::test_support::series_from;

    #[test]
    fn stochastic_short_series_is_neutral() {
        let value = compute_stochastic(&series_from(&[1.0; 13]), 14);
        assert_eq!(value, StochasticValue { k: 50.0, d: 50.0 });
        assert_eq!(stochastic_signal(&value), Signal::Neutral);
    }

    #[test]
    fn stochastic_flat_window_is_neutral() {
        let value = compute_stochastic(&series_from(&[7.0; 20]), 14);
        assert_eq!(value.k, 50.0);
    }

    #[test]
    fn stochastic_known_value() {
        // window [10, 20, 15]: (15 - 10) / (20 - 10) = 50%
        let value = compute_stochastic(&series_from(&[99.0, 10.0, 20.0, 15.0]), 3);
        assert!((value.k - 50.0).abs() < 1e-9);
        assert!((value.d - 45.0).abs() < 1e-9);
    }

    #[test]
    fn stochastic_at_window_high_sells() {
        let closes: Vec<f64> = (0..14).map(|i| i as f64).collect();
        let result = Stochastic::new(14).evaluate(&series_from(&closes));
        assert!((result.value - 100.0).abs() < 1e-9);
        assert_eq!(result.signal, Signal::Sell);
    }

    #[test]
    fn stochastic_at_window_low_buys() {
        let closes: Vec<f64> = (0..14).map(|i| 50.0 - i as f64).collect();
        let value = compute_stochastic(&series_from(&closes), 14);
        assert!(value.k.abs() < 1e-9);
        assert_eq!(stochastic_signal(&value), Signal::Buy);
    }
}
