use crate::model::{Pattern, PatternKind, PricePoint};
use crate::pattern::{PatternDetector, max_of, tail};

const HALF_WINDOW: usize = 10;
const CONFIDENCE: u8 = 55;

/// Bearish divergence proxy: a new high in the latest 10 points over the
/// previous 10. Uses price only; no RSI series is computed.
pub struct RsiDivergence;

impl PatternDetector for RsiDivergence {
    fn name(&self) -> &str {
        "rsi_divergence"
    }

    fn min_points(&self) -> usize {
        HALF_WINDOW * 2
    }

    fn detect(&self, series: &[PricePoint]) -> Option<Pattern> {
        let values = tail(series, HALF_WINDOW * 2)?;
        let (older, recent) = values.split_at(HALF_WINDOW);
        let older_high = max_of(older);
        let recent_high = max_of(recent);
        if recent_high <= older_high {
            return None;
        }

        Some(Pattern {
            name: "RSI Divergence".into(),
            kind: PatternKind::Bearish,
            confidence: CONFIDENCE,
            description: format!(
                "New high {recent_high:.2} above {older_high:.2} may lack momentum"
            ),
            target_price: Some(recent_high * 0.96),
            stop_loss: Some(recent_high * 1.01),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicator::test_support::series_from;

    #[test]
    fn higher_recent_high_matches() {
        let mut closes = vec![100.0; 20];
        closes[17] = 110.0;
        let pattern = RsiDivergence.detect(&series_from(&closes)).unwrap();
        assert_eq!(pattern.kind, PatternKind::Bearish);
        assert_eq!(pattern.confidence, 55);
        assert!((pattern.target_price.unwrap() - 105.6).abs() < 1e-9);
        assert!((pattern.stop_loss.unwrap() - 111.1).abs() < 1e-9);
    }

    #[test]
    fn equal_highs_do_not_match() {
        assert!(RsiDivergence.detect(&series_from(&[100.0; 20])).is_none());
    }

    #[test]
    fn lower_recent_high_does_not_match() {
        let closes: Vec<f64> = (0..20).map(|i| 120.0 - i as f64).collect();
        assert!(RsiDivergence.detect(&series_from(&closes)).is_none());
    }

    #[test]
    fn only_last_twenty_points_considered() {
        let mut closes = vec![100.0; 25];
        closes[2] = 150.0;
        closes[22] = 101.0;
        assert!(RsiDivergence.detect(&series_from(&closes)).is_some());
    }
}
