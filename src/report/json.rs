use std::io::Write;
use std::sync::Mutex;

use serde::Serialize;
use tracing::warn;

use crate::analysis::Analysis;
use crate::report::Reporter;

#[derive(Serialize)]
struct Envelope<'a> {
    symbol: &'a str,
    #[serde(flatten)]
    analysis: &'a Analysis,
}

/// Writes one JSON document per analysis, newline-delimited.
pub struct JsonReporter<W> {
    out: Mutex<W>,
}

impl<W: Write + Send> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl JsonReporter<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> Reporter for JsonReporter<W> {
    fn report(&self, symbol: &str, analysis: &Analysis) {
        let envelope = Envelope { symbol, analysis };
        let mut out = self
            .out
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let written = serde_json::to_writer(&mut *out, &envelope)
            .map_err(std::io::Error::from)
            .and_then(|()| writeln!(out));
        if let Err(e) = written {
            warn!(error = %e, symbol, "failed to write analysis");
        }
    }
}
