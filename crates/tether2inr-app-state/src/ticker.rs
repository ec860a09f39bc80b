//! Cancellable market poll behind the exchange ticker view.
//!
//! Fetches immediately on mount, then on a fixed interval; compares each
//! price against the previous tick to derive a direction; keeps the last
//! good snapshot through poll failures. The poll is
//! an explicit task whose timer is guaranteed to stop: `stop()` on the happy
//! path, abort on drop for every other exit path.

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use tether2inr_api_client::market::{MarketAsset, MarketDataClient};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(7);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceDirection {
    Up,
    Down,
    Steady,
}

impl PriceDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Steady => "steady",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TickerRow {
    pub asset: MarketAsset,
    pub direction: PriceDirection,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickerSnapshot {
    pub rows: Vec<TickerRow>,
    /// Completed polls, successful or not.
    pub ticks: u64,
    /// Failure from the most recent poll; rows keep the last good data.
    pub last_error: Option<String>,
}

/// Derive per-asset directions by comparing against the previous tick.
/// Assets absent from the previous tick are steady.
pub fn diff_against_previous(previous: &[MarketAsset], next: &[MarketAsset]) -> Vec<TickerRow> {
    next.iter()
        .map(|asset| {
            let direction = previous
                .iter()
                .find(|prior| prior.id == asset.id)
                .map_or(PriceDirection::Steady, |prior| {
                    if asset.current_price > prior.current_price {
                        PriceDirection::Up
                    } else if asset.current_price < prior.current_price {
                        PriceDirection::Down
                    } else {
                        PriceDirection::Steady
                    }
                });
            TickerRow {
                asset: asset.clone(),
                direction,
            }
        })
        .collect()
}

/// Fixed-interval market poll owned by the exchange view. Stopping is
/// idempotent; dropping the ticker also terminates the task.
pub struct MarketTicker {
    snapshot: Arc<RwLock<TickerSnapshot>>,
    stop: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl MarketTicker {
    pub fn start(client: MarketDataClient, interval: Duration) -> Self {
        let snapshot = Arc::new(RwLock::new(TickerSnapshot::default()));
        let shared = Arc::clone(&snapshot);
        let (stop, mut stopped) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut previous: Vec<MarketAsset> = Vec::new();
            let mut timer = tokio::time::interval(interval);
            timer.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    changed = stopped.changed() => {
                        if changed.is_err() || *stopped.borrow() {
                            break;
                        }
                    }
                    _ = timer.tick() => {
                        match client.top_assets().await {
                            Ok(assets) => {
                                let rows = diff_against_previous(&previous, &assets);
                                previous = assets;
                                if let Ok(mut lock) = shared.write() {
                                    lock.rows = rows;
                                    lock.ticks += 1;
                                    lock.last_error = None;
                                }
                            }
                            Err(error) => {
                                tracing::warn!(%error, "market poll failed; keeping last snapshot");
                                if let Ok(mut lock) = shared.write() {
                                    lock.ticks += 1;
                                    lock.last_error = Some(error.to_string());
                                }
                            }
                        }
                    }
                }
            }
        });

        Self {
            snapshot,
            stop,
            task,
        }
    }

    pub fn snapshot(&self) -> TickerSnapshot {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Signal the poll loop to exit. Safe to call more than once.
    pub fn stop(&self) {
        let _ = self.stop.send(true);
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for MarketTicker {
    fn drop(&mut self) {
        let _ = self.stop.send(true);
        self.task.abort();
    }
}
