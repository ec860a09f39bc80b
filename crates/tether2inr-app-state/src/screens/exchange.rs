use std::time::Duration;

use tether2inr_api_client::market::MarketDataClient;

use crate::ticker::{DEFAULT_POLL_INTERVAL, MarketTicker, TickerSnapshot};

/// The exchange page: a ranked-asset ticker whose poll runs only while the
/// view is mounted. Unmounting stops the timer on every path, including
/// error exits, so no background work outlives the view.
pub struct ExchangeScreen {
    market: MarketDataClient,
    ticker: Option<MarketTicker>,
}

impl ExchangeScreen {
    pub fn new(market: MarketDataClient) -> Self {
        Self {
            market,
            ticker: None,
        }
    }

    pub fn mount(&mut self) {
        self.mount_with_interval(DEFAULT_POLL_INTERVAL);
    }

    pub fn mount_with_interval(&mut self, interval: Duration) {
        if self.ticker.is_none() {
            self.ticker = Some(MarketTicker::start(self.market.clone(), interval));
        }
    }

    pub fn unmount(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.stop();
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.ticker.is_some()
    }

    pub fn snapshot(&self) -> TickerSnapshot {
        self.ticker
            .as_ref()
            .map(MarketTicker::snapshot)
            .unwrap_or_default()
    }
}

impl Drop for ExchangeScreen {
    fn drop(&mut self) {
        self.unmount();
    }
}
