use std::fmt;

use serde::{Deserialize, Serialize};

/// A single sample of a price series.
///
/// `timestamp` is only an ordering label supplied by the data source; it is
/// never parsed. Series are ordered by position, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    #[serde(alias = "time")]
    pub timestamp: String,
    pub value: f64,
}

impl PricePoint {
    pub fn new(timestamp: impl Into<String>, value: f64) -> Self {
        Self {
            timestamp: timestamp.into(),
            value,
        }
    }
}

/// Trading signal attached to an indicator reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Signal {
    Buy,
    Sell,
    Neutral,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
            Self::Neutral => write!(f, "neutral"),
        }
    }
}

/// Directional bias of a detected chart pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatternKind {
    Bullish,
    Bearish,
    Neutral,
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bullish => write!(f, "bullish"),
            Self::Bearish => write!(f, "bearish"),
            Self::Neutral => write!(f, "neutral"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorResult {
    pub name: String,
    pub value: f64,
    pub signal: Signal,
    pub description: String,
}

/// A chart pattern matched against the tail of a series.
///
/// `confidence` is a heuristic score in `0..=100`; target and stop levels are
/// in price units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pattern {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PatternKind,
    pub confidence: u8,
    pub description: String,
    pub target_price: Option<f64>,
    pub stop_loss: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_point_accepts_time_alias() {
        let point: PricePoint = serde_json::from_str(r#"{"time":"09:30","value":101.5}"#).unwrap();
        assert_eq!(point, PricePoint::new("09:30", 101.5));
    }

    #[test]
    fn pattern_serializes_with_stable_field_names() {
        let pattern = Pattern {
            name: "Flag".into(),
            kind: PatternKind::Bullish,
            confidence: 60,
            description: "tight consolidation".into(),
            target_price: Some(104.0),
            stop_loss: None,
        };
        let json = serde_json::to_value(&pattern).unwrap();
        assert_eq!(json["type"], "Bullish");
        assert_eq!(json["targetPrice"], 104.0);
        assert!(json["stopLoss"].is_null());
        assert_eq!(json["confidence"], 60);
    }

    #[test]
    fn signal_display() {
        assert_eq!(Signal::Buy.to_string(), "buy");
        assert_eq!(Signal::Sell.to_string(), "sell");
        assert_eq!(Signal::Neutral.to_string(), "neutral");
    }
}
