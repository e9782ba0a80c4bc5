use tracing::info;

use crate::analysis::Analysis;
use crate::report::Reporter;

/// Logs each analysis as structured `tracing` events.
pub struct TerminalReporter;

impl Reporter for TerminalReporter {
    fn report(&self, symbol: &str, analysis: &Analysis) {
        info!(
            symbol,
            points = analysis.points,
            price = analysis.last_price,
            buy = analysis.tally.buy,
            neutral = analysis.tally.neutral,
            sell = analysis.tally.sell,
            consensus = %analysis.consensus,
            "analysis updated"
        );

        for result in &analysis.indicators {
            info!(
                symbol,
                indicator = %result.name,
                value = result.value,
                signal = %result.signal,
                "{}",
                result.description,
            );
        }

        if analysis.patterns.is_empty() {
            info!(symbol, "no pattern detected");
        }
        for pattern in &analysis.patterns {
            info!(
                symbol,
                pattern = %pattern.name,
                kind = %pattern.kind,
                confidence = pattern.confidence,
                target = pattern.target_price,
                stop = pattern.stop_loss,
                "{}",
                pattern.description,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Analyzer;
    use crate::indicator::test_support::series_from;

    #[test]
    fn terminal_reporter_does_not_panic() {
        let closes: Vec<f64> = (0..25)
            .map(|i| if i % 5 == 0 { 100.0 } else { 99.5 })
            .collect();
        let analysis = Analyzer::default().analyze(&series_from(&closes));
        TerminalReporter.report("BTC", &analysis);
        TerminalReporter.report("BTC", &Analyzer::default().analyze(&[]));
    }
}
