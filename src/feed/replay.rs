use std::time::Duration;

use error_stack::Report;
use futures::future::BoxFuture;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::error::FeedError;
use crate::feed::{PriceFeed, Tick};
use crate::model::PricePoint;

/// Replays a recorded series, one point per `interval`.
pub struct ReplayFeed {
    symbol: String,
    points: Vec<PricePoint>,
    interval: Duration,
}

impl ReplayFeed {
    pub fn new(symbol: impl Into<String>, points: Vec<PricePoint>, interval: Duration) -> Self {
        Self {
            symbol: symbol.into(),
            points,
            interval,
        }
    }
}

impl PriceFeed for ReplayFeed {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn run(
        &self,
        tx: mpsc::Sender<Tick>,
        cancel: CancellationToken,
    ) -> BoxFuture<'_, Result<(), Report<FeedError>>> {
        Box::pin(async move {
            info!(symbol = %self.symbol, points = self.points.len(), "replay started");

            for (index, point) in self.points.iter().enumerate() {
                if index > 0 && !self.interval.is_zero() {
                    tokio::select! {
                        _ = cancel.cancelled() => {
                            debug!(symbol = %self.symbol, index, "replay cancelled");
                            return Ok(());
                        }
                        _ = tokio::time::sleep(self.interval) => {}
                    }
                }
                if cancel.is_cancelled() {
                    debug!(symbol = %self.symbol, index, "replay cancelled");
                    return Ok(());
                }

                let tick = Tick {
                    symbol: self.symbol.clone(),
                    point: point.clone(),
                };
                if tx.send(tick).await.is_err() {
                    debug!(symbol = %self.symbol, "receiver closed, stopping replay");
                    return Ok(());
                }
            }

            info!(symbol = %self.symbol, "replay finished");
            Ok(())
        })
    }
}
