use std::collections::HashMap;

use crate::indicator::Indicator;
use crate::model::{IndicatorResult, PricePoint};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    symbol: String,
    indicator: String,
}

/// Caller-owned memo of indicator results keyed by symbol and
/// [`Indicator::cache_key`].
///
/// Entries are never checked against the series they were computed from; the
/// owner must call [`IndicatorCache::invalidate`] whenever a symbol's series
/// changes.
#[derive(Debug, Default)]
pub struct IndicatorCache {
    entries: HashMap<CacheKey, IndicatorResult>,
}

impl IndicatorCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, symbol: &str, indicator: &dyn Indicator) -> Option<&IndicatorResult> {
        self.entries.get(&key(symbol, indicator))
    }

    /// Return the cached result for `indicator` on `symbol`, evaluating it over
    /// `series` on a miss.
    pub fn get_or_compute(
        &mut self,
        symbol: &str,
        indicator: &dyn Indicator,
        series: &[PricePoint],
    ) -> IndicatorResult {
        self.entries
            .entry(key(symbol, indicator))
            .or_insert_with(|| indicator.evaluate(series))
            .clone()
    }

    /// Drop every entry for `symbol`. Returns the number of entries removed.
    pub fn invalidate(&mut self, symbol: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|k, _| k.symbol != symbol);
        before - self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn key(symbol: &str, indicator: &dyn Indicator) -> CacheKey {
    CacheKey {
        symbol: symbol.to_string(),
        indicator: indicator.cache_key(),
    }
}
