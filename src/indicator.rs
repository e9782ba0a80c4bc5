pub mod bollinger;
pub mod ma;
pub mod macd;
pub mod rsi;
pub mod stochastic;

use error_stack::{Report, bail};

use crate::config::IndicatorConfig;
use crate::error::IndicatorError;
use crate::model::{IndicatorResult, PricePoint};

use bollinger::Bollinger;
use ma::{Ema, Sma};
use macd::Macd;
use rsi::Rsi;
use stochastic::Stochastic;

/// A technical indicator evaluated over a price series.
///
/// Series must be in ascending chronological order (oldest first).
/// Evaluation never fails: series shorter than `required_points` produce the
/// indicator's neutral reading.
pub trait Indicator: Send + Sync {
    /// Stable identifier of this indicator (e.g., "rsi", "sma").
    fn name(&self) -> &str;

    /// Lookback period.
    fn period(&self) -> usize;

    /// Identity under which results are cached. Indicators whose output
    /// depends on more than name and period must include those parameters.
    fn cache_key(&self) -> String {
        format!("{}:{}", self.name(), self.period())
    }

    /// Minimum number of points for a non-neutral reading.
    fn required_points(&self) -> usize;

    fn evaluate(&self, series: &[PricePoint]) -> IndicatorResult;
}

/// Extract prices from a series.
pub fn prices(series: &[PricePoint]) -> Vec<f64> {
    series.iter().map(|p| p.value).collect()
}

/// Periods below 1 are treated as 1.
pub(crate) fn clamp_period(period: usize) -> usize {
    period.max(1)
}

/// Build indicators from configuration entries, falling back to the default
/// set when none are configured.
pub fn build_indicators(
    configs: &[IndicatorConfig],
) -> Result<Vec<Box<dyn Indicator>>, Report<IndicatorError>> {
    if configs.is_empty() {
        return Ok(default_indicators());
    }
    configs.iter().map(build_indicator).collect()
}

pub fn default_indicators() -> Vec<Box<dyn Indicator>> {
    vec![
        Box::new(Rsi::new(rsi::DEFAULT_PERIOD)),
        Box::new(Macd::new()),
        Box::new(Bollinger::new(
            bollinger::DEFAULT_PERIOD,
            bollinger::DEFAULT_MULTIPLIER,
        )),
        Box::new(Stochastic::new(stochastic::DEFAULT_PERIOD)),
        Box::new(Sma::new(ma::DEFAULT_SMA_PERIOD)),
    ]
}

pub fn build_indicator(
    config: &IndicatorConfig,
) -> Result<Box<dyn Indicator>, Report<IndicatorError>> {
    match config.kind.as_str() {
        "rsi" => {
            let period = get_period(config, rsi::DEFAULT_PERIOD)?;
            Ok(Box::new(Rsi::new(period)))
        }
        "macd" => Ok(Box::new(Macd::new())),
        "bollinger" => {
            let period = get_period(config, bollinger::DEFAULT_PERIOD)?;
            let multiplier = get_f64(config, "std_dev_multiplier", bollinger::DEFAULT_MULTIPLIER);
            if multiplier <= 0.0 || !multiplier.is_finite() {
                bail!(IndicatorError::InvalidParameter {
                    name: "std_dev_multiplier must be > 0".into(),
                });
            }
            Ok(Box::new(Bollinger::new(period, multiplier)))
        }
        "stochastic" => {
            let period = get_period(config, stochastic::DEFAULT_PERIOD)?;
            Ok(Box::new(Stochastic::new(period)))
        }
        "sma" => {
            let period = get_period(config, ma::DEFAULT_SMA_PERIOD)?;
            Ok(Box::new(Sma::new(period)))
        }
        "ema" => {
            let period = get_period(config, ma::DEFAULT_EMA_PERIOD)?;
            Ok(Box::new(Ema::new(period)))
        }
        other => bail!(IndicatorError::UnknownKind { kind: other.into() }),
    }
}

fn get_period(config: &IndicatorConfig, default: usize) -> Result<usize, Report<IndicatorError>> {
    match config.params.get("period").and_then(|v| v.as_integer()) {
        None => Ok(default),
        Some(n) if n > 0 => Ok(n as usize),
        Some(_) => bail!(IndicatorError::InvalidParameter {
            name: format!("{}: period must be > 0", config.kind),
        }),
    }
}

fn get_f64(config: &IndicatorConfig, key: &str, default: f64) -> f64 {
    config
        .params
        .get(key)
        .and_then(|v| v.as_float().or_else(|| v.as_integer().map(|n| n as f64)))
        .unwrap_or(default)
}


#[cfg(test)]
mod tests {
    use super::*;

    fn config(kind: &str, params: &str) -> IndicatorConfig {
        IndicatorConfig {
            kind: kind.into(),
            params: toml::from_str(params).unwrap(),
        }
    }

    #[test]
    fn empty_config_yields_default_set() {
        let indicators = build_indicators(&[]).unwrap();
        let names: Vec<&str> = indicators.iter().map(|i| i.name()).collect();
        assert_eq!(names, ["rsi", "macd", "bollinger", "stochastic", "sma"]);
    }

    #[test]
    fn period_param_is_honoured() {
        let indicator = build_indicator(&config("rsi", "period = 7")).unwrap();
        assert_eq!(indicator.period(), 7);
        assert_eq!(indicator.required_points(), 8);
    }

    #[test]
    fn zero_period_rejected() {
        assert!(build_indicator(&config("sma", "period = 0")).is_err());
    }

    #[test]
    fn non_positive_multiplier_rejected() {
        assert!(build_indicator(&config("bollinger", "std_dev_multiplier = -1.0")).is_err());
    }

    #[test]
    fn integer_multiplier_accepted() {
        assert!(build_indicator(&config("bollinger", "std_dev_multiplier = 3")).is_ok());
    }

    #[test]
    fn unknown_kind_rejected() {
        assert!(build_indicator(&config("vwap", "")).is_err());
    }
}
