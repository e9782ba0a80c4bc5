use crate::model::{Pattern, PatternKind, PricePoint};
use crate::pattern::{PatternDetector, tail};

const WINDOW: usize = 30;
const MIN_PEAKS: usize = 3;
const MIN_SHOULDERS: usize = 2;
const CONFIDENCE: u8 = 68;

pub struct HeadAndShoulders;

/// Strict local maxima, excluding the window edges.
fn peaks(values: &[f64]) -> Vec<f64> {
    values
        .windows(3)
        .filter(|w| w[1] > w[0] && w[1] > w[2])
        .map(|w| w[1])
        .collect()
}

impl PatternDetector for HeadAndShoulders {
    fn name(&self) -> &str {
        "head_and_shoulders"
    }

    fn min_points(&self) -> usize {
        WINDOW
    }

    fn detect(&self, series: &[PricePoint]) -> Option<Pattern> {
        let values = tail(series, WINDOW)?;
        let mut peaks = peaks(&values);
        if peaks.len() < MIN_PEAKS {
            return None;
        }

        let head_index = peaks
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)?;
        let head = peaks.remove(head_index);
        let shoulders = peaks;
        if shoulders.len() < MIN_SHOULDERS {
            return None;
        }

        Some(Pattern {
            name: "Head and Shoulders".into(),
            kind: PatternKind::Bearish,
            confidence: CONFIDENCE,
            description: format!(
                "Head at {head:.2} flanked by {} lower peaks, reversal risk",
                shoulders.len()
            ),
            target_price: Some(head * 0.92),
            stop_loss: Some(head * 1.02),
        })
    }
}
