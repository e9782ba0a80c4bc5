use crate::model::{Pattern, PatternKind, PricePoint};
use crate::pattern::{PatternDetector, max_of, tail};

const WINDOW: usize = 20;
const TOUCH_TOLERANCE: f64 = 0.01;
const MIN_TOUCHES: usize = 3;
const CONFIDENCE: u8 = 75;

/// Flat resistance tested repeatedly by swing highs.
pub struct AscendingTriangle;

/// Interior points that turn at a local high: not exceeded by either
/// neighbour and strictly above at least one of them. Flat plateaus and
/// monotonic runs produce none.
fn swing_highs(values: &[f64]) -> impl Iterator<Item = f64> + '_ {
    values.windows(3).filter_map(|w| {
        let (prev, cur, next) = (w[0], w[1], w[2]);
        let is_high = cur >= prev && cur >= next && (cur > prev || cur > next);
        is_high.then_some(cur)
    })
}

impl PatternDetector for AscendingTriangle {
    fn name(&self) -> &str {
        "ascending_triangle"
    }

    fn min_points(&self) -> usize {
        WINDOW
    }

    fn detect(&self, series: &[PricePoint]) -> Option<Pattern> {
        let values = tail(series, WINDOW)?;
        let resistance = max_of(&values);
        let touches = swing_highs(&values)
            .filter(|high| (resistance - high).abs() <= resistance.abs() * TOUCH_TOLERANCE)
            .count();
        if touches < MIN_TOUCHES {
            return None;
        }

        Some(Pattern {
            name: "Ascending Triangle".into(),
            kind: PatternKind::Bullish,
            confidence: CONFIDENCE,
            description: format!(
                "Resistance near {resistance:.2} tested {touches} times, breakout likely"
            ),
            target_price: Some(resistance * 1.05),
            stop_loss: Some(resistance * 0.98),
        })
    }
}
