pub mod replay;

use std::path::Path;

use error_stack::{Report, ResultExt};
use futures::future::BoxFuture;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::error::FeedError;
use crate::model::PricePoint;

/// One new sample for a symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub symbol: String,
    pub point: PricePoint,
}

/// A source of price samples.
///
/// Uses `BoxFuture` (from `futures` crate) instead of `async fn` in trait
/// to keep the trait object-safe (`dyn PriceFeed`).
pub trait PriceFeed: Send + Sync {
    fn symbol(&self) -> &str;

    /// Stream samples into `tx` in chronological order until the feed is
    /// exhausted, the receiver is dropped, or `cancel` is triggered.
    fn run(
        &self,
        tx: mpsc::Sender<Tick>,
        cancel: CancellationToken,
    ) -> BoxFuture<'_, Result<(), Report<FeedError>>>;
}

/// Load a series from a JSON file holding an array of
/// `{ "time": string, "value": number }` objects.
pub fn load_series(path: &Path) -> Result<Vec<PricePoint>, Report<FeedError>> {
    let content = std::fs::read_to_string(path)
        .change_context(FeedError::ReadFile)
        .attach_with(|| format!("path: {}", path.display()))?;
    parse_series(&content, &path.display().to_string())
}

pub fn parse_series(
    content: &str,
    source_name: &str,
) -> Result<Vec<PricePoint>, Report<FeedError>> {
    let points: Vec<PricePoint> =
        serde_json::from_str(content).change_context(FeedError::Parse {
            source_name: source_name.to_string(),
        })?;

    if let Some(index) = points.iter().position(|p| !p.value.is_finite()) {
        return Err(Report::new(FeedError::InvalidPoint {
            index,
            reason: "value is not finite".into(),
        }));
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_time_and_timestamp_keys() {
        let json = r#"[
            {"time": "2024-01-01", "value": 100.0},
            {"timestamp": "2024-01-02", "value": 101.5}
        ]"#;
        let points = parse_series(json, "inline").unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].timestamp, "2024-01-01");
        assert_eq!(points[1].value, 101.5);
    }

    #[test]
    fn empty_array_is_valid() {
        assert!(parse_series("[]", "inline").unwrap().is_empty());
    }

    #[test]
    fn malformed_json_rejected() {
        assert!(parse_series(r#"[{"time": "t0"}]"#, "inline").is_err());
        assert!(parse_series("not json", "inline").is_err());
    }

    #[test]
    fn missing_file_rejected() {
        assert!(load_series(Path::new("/nonexistent/series.json")).is_err());
    }

    #[test]
    fn load_series_reads_file() {
        let path = std::env::temp_dir().join(format!("chart-signals-{}.json", std::process::id()));
        std::fs::write(&path, r#"[{"time": "t0", "value": 42.0}]"#).unwrap();
        let points = load_series(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(points, vec![PricePoint::new("t0", 42.0)]);
    }
}
