pub mod json;
pub mod terminal;

use crate::analysis::Analysis;

/// Sink for computed analyses.
pub trait Reporter: Send + Sync {
    fn report(&self, symbol: &str, analysis: &Analysis);
}
