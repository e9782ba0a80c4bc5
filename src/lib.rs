//! Technical indicators, chart-pattern heuristics and signal tallies computed
//! over in-memory price series.

pub mod analysis;
pub mod cache;
pub mod config;
pub mod error;
pub mod feed;
pub mod indicator;
pub mod model;
pub mod pattern;
pub mod report;
pub mod signal;
pub mod watch;

pub use analysis::{Analysis, Analyzer};
pub use model::{IndicatorResult, Pattern, PatternKind, PricePoint, Signal};
pub use pattern::detect_patterns;
pub use signal::{SignalTally, tally};
