use error_stack::Report;
use serde::Serialize;

use crate::cache::IndicatorCache;
use crate::config::AppConfig;
use crate::error::IndicatorError;
use crate::indicator::{Indicator, build_indicators, default_indicators};
use crate::model::{IndicatorResult, Pattern, PricePoint, Signal};
use crate::pattern::{PatternDetector, build_detectors, default_detectors, detect_with};
use crate::signal::{SignalTally, tally};

/// Everything derived from one price series: indicator readings, their
/// tally, and the matched chart patterns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub last_price: Option<f64>,
    pub points: usize,
    pub indicators: Vec<IndicatorResult>,
    pub tally: SignalTally,
    pub consensus: Signal,
    pub patterns: Vec<Pattern>,
}

/// A fixed set of indicators and pattern detectors applied together.
pub struct Analyzer {
    indicators: Vec<Box<dyn Indicator>>,
    detectors: Vec<Box<dyn PatternDetector>>,
}

impl Analyzer {
    pub fn new(
        indicators: Vec<Box<dyn Indicator>>,
        detectors: Vec<Box<dyn PatternDetector>>,
    ) -> Self {
        Self {
            indicators,
            detectors,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, Report<IndicatorError>> {
        Ok(Self::new(
            build_indicators(&config.indicators)?,
            build_detectors(&config.patterns.detectors)?,
        ))
    }

    pub fn indicators(&self) -> &[Box<dyn Indicator>] {
        &self.indicators
    }

    pub fn analyze(&self, series: &[PricePoint]) -> Analysis {
        let indicators = self.indicators.iter().map(|i| i.evaluate(series)).collect();
        self.assemble(series, indicators)
    }

    /// Like [`Analyzer::analyze`], but indicator readings go through `cache`
    /// under `symbol`.
    pub fn analyze_cached(
        &self,
        symbol: &str,
        series: &[PricePoint],
        cache: &mut IndicatorCache,
    ) -> Analysis {
        let indicators = self
            .indicators
            .iter()
            .map(|i| cache.get_or_compute(symbol, i.as_ref(), series))
            .collect();
        self.assemble(series, indicators)
    }

    fn assemble(&self, series: &[PricePoint], indicators: Vec<IndicatorResult>) -> Analysis {
        let tally = tally(&indicators);
        Analysis {
            last_price: series.last().map(|p| p.value),
            points: series.len(),
            indicators,
            tally,
            consensus: tally.consensus(),
            patterns: detect_with(&self.detectors, series),
        }
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(default_indicators(), default_detectors())
    }
}
