use serde::Serialize;

use crate::model::{IndicatorResult, Signal};

/// Count of buy/neutral/sell readings across a set of indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SignalTally {
    pub buy: usize,
    pub neutral: usize,
    pub sell: usize,
}

impl SignalTally {
    pub fn total(&self) -> usize {
        self.buy + self.neutral + self.sell
    }

    /// Buy or sell when that side strictly outnumbers both others; otherwise
    /// neutral.
    pub fn consensus(&self) -> Signal {
        if self.buy > self.sell && self.buy > self.neutral {
            Signal::Buy
        } else if self.sell > self.buy && self.sell > self.neutral {
            Signal::Sell
        } else {
            Signal::Neutral
        }
    }

    fn record(mut self, signal: Signal) -> Self {
        match signal {
            Signal::Buy => self.buy += 1,
            Signal::Neutral => self.neutral += 1,
            Signal::Sell => self.sell += 1,
        }
        self
    }
}

pub fn tally<'a>(results: impl IntoIterator<Item = &'a IndicatorResult>) -> SignalTally {
    results
        .into_iter()
        .fold(SignalTally::default(), |acc, r| acc.record(r.signal))
}
