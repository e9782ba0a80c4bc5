pub mod divergence;
pub mod flag;
pub mod head_shoulders;
pub mod triangle;

use error_stack::{Report, bail};

use crate::error::IndicatorError;
use crate::model::{Pattern, PricePoint};

use divergence::RsiDivergence;
use flag::Flag;
use head_shoulders::HeadAndShoulders;
use triangle::AscendingTriangle;

/// A heuristic chart-pattern matcher over the tail of a price series.
///
/// Detectors are independent of each other; a series too short for the
/// detector's window simply yields no match.
pub trait PatternDetector: Send + Sync {
    /// Registry name (e.g., "flag").
    fn name(&self) -> &str;

    /// Minimum series length the detector looks at.
    fn min_points(&self) -> usize;

    fn detect(&self, series: &[PricePoint]) -> Option<Pattern>;
}

pub const DETECTOR_NAMES: &[&str] = &[
    "ascending_triangle",
    "head_and_shoulders",
    "flag",
    "rsi_divergence",
];

pub fn default_detectors() -> Vec<Box<dyn PatternDetector>> {
    vec![
        Box::new(AscendingTriangle),
        Box::new(HeadAndShoulders),
        Box::new(Flag),
        Box::new(RsiDivergence),
    ]
}

/// Build detectors by registry name. An empty list selects every detector.
pub fn build_detectors(
    names: &[String],
) -> Result<Vec<Box<dyn PatternDetector>>, Report<IndicatorError>> {
    if names.is_empty() {
        return Ok(default_detectors());
    }
    names.iter().map(|name| build_detector(name)).collect()
}

pub fn build_detector(name: &str) -> Result<Box<dyn PatternDetector>, Report<IndicatorError>> {
    match name {
        "ascending_triangle" => Ok(Box::new(AscendingTriangle)),
        "head_and_shoulders" => Ok(Box::new(HeadAndShoulders)),
        "flag" => Ok(Box::new(Flag)),
        "rsi_divergence" => Ok(Box::new(RsiDivergence)),
        other => bail!(IndicatorError::UnknownDetector { name: other.into() }),
    }
}

/// Run every built-in detector over `series`.
pub fn detect_patterns(series: &[PricePoint]) -> Vec<Pattern> {
    detect_with(&default_detectors(), series)
}

/// Run `detectors` over `series`, returning matches by descending confidence.
/// Ties keep detector order.
pub fn detect_with(
    detectors: &[Box<dyn PatternDetector>],
    series: &[PricePoint],
) -> Vec<Pattern> {
    let mut patterns: Vec<Pattern> = detectors
        .iter()
        .filter(|d| series.len() >= d.min_points())
        .filter_map(|d| d.detect(series))
        .collect();
    patterns.sort_by(|a, b| b.confidence.cmp(&a.confidence));
    patterns
}

/// The last `len` values of `series`, or `None` if it is shorter.
pub(crate) fn tail(series: &[PricePoint], len: usize) -> Option<Vec<f64>> {
    if series.len() < len {
        return None;
    }
    Some(series[series.len() - len..].iter().map(|p| p.value).collect())
}

pub(crate) fn max_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

pub(crate) fn min_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicator::test_support::series_from;
    use crate::model::PatternKind;

    /// 25 points at 99.5 with a 100 every fifth index.
    fn triangle_and_flag_series() -> Vec<PricePoint> {
        let closes: Vec<f64> = (0..25)
            .map(|i| if i % 5 == 0 { 100.0 } else { 99.5 })
            .collect();
        series_from(&closes)
    }

    #[test]
    fn short_series_yields_no_patterns() {
        assert!(detect_patterns(&series_from(&[100.0, 101.0])).is_empty());
        assert!(detect_patterns(&series_from(&[100.0; 14])).is_empty());
        assert!(detect_patterns(&[]).is_empty());
    }

    #[test]
    fn patterns_sorted_by_confidence() {
        let patterns = detect_patterns(&triangle_and_flag_series());
        let names: Vec<&str> = patterns.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Ascending Triangle", "Bull Flag"]);
        assert_eq!(patterns[0].confidence, 75);
        assert_eq!(patterns[1].confidence, 60);
        assert!(patterns.iter().all(|p| p.kind == PatternKind::Bullish));
    }

    #[test]
    fn output_never_increases_in_confidence() {
        let closes: Vec<f64> = (0..40)
            .map(|i| 100.0 + (i as f64 * 0.9).sin() * 3.0 + i as f64 * 0.05)
            .collect();
        let patterns = detect_patterns(&series_from(&closes));
        assert!(patterns.windows(2).all(|w| w[0].confidence >= w[1].confidence));
    }

    #[test]
    fn detect_with_respects_selection() {
        let detectors = build_detectors(&["flag".to_string()]).unwrap();
        let patterns = detect_with(&detectors, &triangle_and_flag_series());
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].name, "Bull Flag");
    }

    #[test]
    fn empty_selection_builds_all_detectors() {
        let detectors = build_detectors(&[]).unwrap();
        let names: Vec<&str> = detectors.iter().map(|d| d.name()).collect();
        assert_eq!(names, DETECTOR_NAMES);
    }

    #[test]
    fn unknown_detector_rejected() {
        assert!(build_detector("cup_and_handle").is_err());
    }

    #[test]
    fn detection_is_deterministic() {
        let series = triangle_and_flag_series();
        assert_eq!(detect_patterns(&series), detect_patterns(&series));
    }
}
