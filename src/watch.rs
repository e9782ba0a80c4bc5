use std::collections::{HashMap, VecDeque};

use tokio::sync::mpsc;
use tracing::debug;

use crate::analysis::{Analysis, Analyzer};
use crate::cache::IndicatorCache;
use crate::feed::Tick;
use crate::model::PricePoint;
use crate::report::Reporter;

/// Rolling per-symbol price history capped at a fixed length.
pub struct SeriesHistory {
    limit: usize,
    series: HashMap<String, VecDeque<PricePoint>>,
}

impl SeriesHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
            series: HashMap::new(),
        }
    }

    /// Append `point` to `symbol`'s series, dropping the oldest point once the
    /// limit is reached. A point repeating the latest timestamp replaces it.
    pub fn push(&mut self, symbol: &str, point: PricePoint) -> &[PricePoint] {
        let series = self.series.entry(symbol.to_string()).or_default();
        match series.back_mut() {
            Some(last) if last.timestamp == point.timestamp => *last = point,
            _ => {
                series.push_back(point);
                if series.len() > self.limit {
                    series.pop_front();
                }
            }
        }
        series.make_contiguous()
    }

    pub fn get(&self, symbol: &str) -> Option<&VecDeque<PricePoint>> {
        self.series.get(symbol)
    }
}

/// Recompute and report the analysis for each incoming tick until every
/// sender is dropped. Returns the latest analysis per symbol.
pub async fn analysis_loop(
    mut rx: mpsc::Receiver<Tick>,
    analyzer: &Analyzer,
    history_limit: usize,
    reporter: &dyn Reporter,
) -> HashMap<String, Analysis> {
    let mut history = SeriesHistory::new(history_limit);
    let mut cache = IndicatorCache::new();
    let mut latest = HashMap::new();

    while let Some(tick) = rx.recv().await {
        let series = history.push(&tick.symbol, tick.point);
        let evicted = cache.invalidate(&tick.symbol);
        debug!(symbol = %tick.symbol, points = series.len(), evicted, "tick received");

        let analysis = analyzer.analyze_cached(&tick.symbol, series, &mut cache);
        reporter.report(&tick.symbol, &analysis);
        latest.insert(tick.symbol, analysis);
    }

    latest
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<(String, usize)>>,
    }

    impl Reporter for Recorder {
        fn report(&self, symbol: &str, analysis: &Analysis) {
            self.seen
                .lock()
                .unwrap()
                .push((symbol.to_string(), analysis.points));
        }
    }

    fn tick(symbol: &str, i: usize, value: f64) -> Tick {
        Tick {
            symbol: symbol.into(),
            point: PricePoint::new(format!("t{i}"), value),
        }
    }

    #[test]
    fn history_is_capped() {
        let mut history = SeriesHistory::new(3);
        for i in 0..5 {
            history.push("BTC", PricePoint::new(format!("t{i}"), i as f64));
        }
        let values: Vec<f64> = history.get("BTC").unwrap().iter().map(|p| p.value).collect();
        assert_eq!(values, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn repeated_timestamp_replaces_last_point() {
        let mut history = SeriesHistory::new(10);
        history.push("BTC", PricePoint::new("t0", 1.0));
        let series = history.push("BTC", PricePoint::new("t0", 2.0));
        assert_eq!(series, &[PricePoint::new("t0", 2.0)]);
    }

    #[tokio::test]
    async fn loop_reports_every_tick_per_symbol() {
        let (tx, rx) = mpsc::channel(32);
        for i in 0..4 {
            tx.send(tick("BTC", i, 100.0 + i as f64)).await.unwrap();
        }
        tx.send(tick("ETH", 0, 10.0)).await.unwrap();
        drop(tx);

        let recorder = Recorder::default();
        let latest = analysis_loop(rx, &Analyzer::default(), 3, &recorder).await;

        let seen = recorder.seen.into_inner().unwrap();
        assert_eq!(seen.len(), 5);
        assert_eq!(seen[3], ("BTC".to_string(), 3));
        assert_eq!(latest["BTC"].last_price, Some(103.0));
        assert_eq!(latest["ETH"].points, 1);
    }
}
