use crate::indicator::{Indicator, clamp_period, prices};
use crate::model::{IndicatorResult, PricePoint, Signal};

pub const DEFAULT_SMA_PERIOD: usize = 10;
pub const DEFAULT_EMA_PERIOD: usize = 20;

/// Simple moving average, one value per input point.
///
/// The first `period` points are passed through unsmoothed; from index
/// `period` on, each value is the mean of the trailing `period` prices.
pub fn compute_sma(series: &[PricePoint], period: usize) -> Vec<f64> {
    sma_prices(&prices(series), period)
}

pub(crate) fn sma_prices(prices: &[f64], period: usize) -> Vec<f64> {
    let period = clamp_period(period);
    prices
        .iter()
        .enumerate()
        .map(|(i, &price)| {
            if i < period {
                price
            } else {
                prices[i + 1 - period..=i].iter().sum::<f64>() / period as f64
            }
        })
        .collect()
}

/// Exponential moving average seeded with the first price, defined for every
/// input point.
pub fn compute_ema(series: &[PricePoint], period: usize) -> Vec<f64> {
    ema_prices(&prices(series), period)
}

pub(crate) fn ema_prices(prices: &[f64], period: usize) -> Vec<f64> {
    let k = 2.0 / (clamp_period(period) as f64 + 1.0);
    let mut results = Vec::with_capacity(prices.len());
    let mut iter = prices.iter();
    let Some(&seed) = iter.next() else {
        return results;
    };

    let mut ema = seed;
    results.push(ema);
    for &price in iter {
        ema = price * k + ema * (1.0 - k);
        results.push(ema);
    }
    results
}

/// Price position relative to a moving average.
fn trend_signal(price: f64, average: f64) -> Signal {
    if price > average {
        Signal::Buy
    } else if price < average {
        Signal::Sell
    } else {
        Signal::Neutral
    }
}

fn trend_result(label: String, series: &[PricePoint], averages: &[f64]) -> IndicatorResult {
    let (Some(price), Some(&average)) = (series.last().map(|p| p.value), averages.last()) else {
        return IndicatorResult {
            name: label,
            value: 0.0,
            signal: Signal::Neutral,
            description: "No price data".into(),
        };
    };

    let signal = trend_signal(price, average);
    let description = match signal {
        Signal::Buy => "Price above moving average",
        Signal::Sell => "Price below moving average",
        Signal::Neutral => "Price at moving average",
    };
    IndicatorResult {
        name: label,
        value: average,
        signal,
        description: description.into(),
    }
}

pub struct Sma {
    period: usize,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        Self {
            period: clamp_period(period),
        }
    }
}

impl Indicator for Sma {
    fn name(&self) -> &str {
        "sma"
    }

    fn period(&self) -> usize {
        self.period
    }

    fn required_points(&self) -> usize {
        self.period.saturating_add(1)
    }

    fn evaluate(&self, series: &[PricePoint]) -> IndicatorResult {
        let averages = compute_sma(series, self.period);
        trend_result(format!("SMA ({})", self.period), series, &averages)
    }
}

pub struct Ema {
    period: usize,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        Self {
            period: clamp_period(period),
        }
    }
}

impl Indicator for Ema {
    fn name(&self) -> &str {
        "ema"
    }

    fn period(&self) -> usize {
        self.period
    }

    fn required_points(&self) -> usize {
        1
    }

    fn evaluate(&self, series: &[PricePoint]) -> IndicatorResult {
        let averages = compute_ema(series, self.period);
        trend_result(format!("EMA ({})", self.period), series, &averages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicator::test_support::series_from;

    #[test]
    fn sma_warm_up_passes_raw_values() {
        let values = compute_sma(&series_from(&[1.0, 2.0, 3.0, 4.0, 5.0]), 3);
        assert_eq!(values.len(), 5);
        assert_eq!(&values[..3], &[1.0, 2.0, 3.0]);
        // (2+3+4)/3 = 3.0, (3+4+5)/3 = 4.0
        assert!((values[3] - 3.0).abs() < 1e-9);
        assert!((values[4] - 4.0).abs() < 1e-9);
    }

    #[test]
    fn sma_flat_prices() {
        for v in compute_sma(&series_from(&[10.0; 12]), 10) {
            assert!((v - 10.0).abs() < 1e-9);
        }
    }

    #[test]
    fn sma_empty_series() {
        assert!(compute_sma(&[], 10).is_empty());
    }

    #[test]
    fn sma_huge_period_passes_values_through() {
        let values = compute_sma(&series_from(&[1.0, 2.0]), usize::MAX);
        assert_eq!(values, vec![1.0, 2.0]);
        assert_eq!(Sma::new(usize::MAX).required_points(), usize::MAX);
    }

    #[test]
    fn ema_seeded_with_first_value() {
        let values = compute_ema(&series_from(&[1.0, 2.0, 3.0]), 3);
        // k = 0.5: 1.0, 1.5, 2.25
        assert_eq!(values.len(), 3);
        assert!((values[0] - 1.0).abs() < 1e-9);
        assert!((values[1] - 1.5).abs() < 1e-9);
        assert!((values[2] - 2.25).abs() < 1e-9);
    }

    #[test]
    fn ema_flat_prices() {
        for v in compute_ema(&series_from(&[10.0; 6]), 3) {
            assert!((v - 10.0).abs() < 1e-9);
        }
    }

    #[test]
    fn ema_zero_period_tracks_price() {
        // period clamps to 1 -> k = 1
        let values = compute_ema(&series_from(&[1.0, 5.0, 2.0]), 0);
        assert_eq!(values, vec![1.0, 5.0, 2.0]);
    }

    #[test]
    fn sma_indicator_signals_price_above_average() {
        let series = series_from(&[1.0, 2.0, 3.0, 4.0, 10.0]);
        let result = Sma::new(3).evaluate(&series);
        // (3+4+10)/3
        assert!((result.value - 17.0 / 3.0).abs() < 1e-9);
        assert_eq!(result.signal, Signal::Buy);
    }

    #[test]
    fn ema_indicator_signals_price_below_average() {
        let series = series_from(&[10.0, 10.0, 4.0]);
        let result = Ema::new(3).evaluate(&series);
        assert_eq!(result.signal, Signal::Sell);
    }

    #[test]
    fn moving_average_empty_series_is_neutral() {
        let result = Sma::new(10).evaluate(&[]);
        assert_eq!(result.value, 0.0);
        assert_eq!(result.signal, Signal::Neutral);
    }
}
