use crate::model::{Pattern, PatternKind, PricePoint};
use crate::pattern::{PatternDetector, max_of, min_of, tail};

const WINDOW: usize = 15;
const MAX_RANGE_RATIO: f64 = 0.03;
const CONFIDENCE: u8 = 60;

/// Tight consolidation over the last 15 points.
pub struct Flag;

impl PatternDetector for Flag {
    fn name(&self) -> &str {
        "flag"
    }

    fn min_points(&self) -> usize {
        WINDOW
    }

    fn detect(&self, series: &[PricePoint]) -> Option<Pattern> {
        let values = tail(series, WINDOW)?;
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        if mean <= 0.0 {
            return None;
        }

        let range_ratio = (max_of(&values) - min_of(&values)) / mean;
        if range_ratio >= MAX_RANGE_RATIO {
            return None;
        }

        Some(Pattern {
            name: "Bull Flag".into(),
            kind: PatternKind::Bullish,
            confidence: CONFIDENCE,
            description: format!(
                "Consolidating within {:.2}% around {mean:.2}",
                range_ratio * 100.0
            ),
            target_price: Some(mean * 1.04),
            stop_loss: Some(mean * 0.98),
        })
    }
}
