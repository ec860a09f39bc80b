//! Read-only client for the public market-data API backing the exchange
//! ticker. No credential is ever attached; the endpoint is not ours.

use serde::Deserialize;

use crate::client::{ApiError, extract_api_error};

pub const DEFAULT_MARKET_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Ranked listing query: top 20 by market cap with 24h change included.
const TOP_ASSETS_QUERY: &str = "/coins/markets?vs_currency=usd&order=market_cap_desc&per_page=20&page=1&sparkline=false&price_change_percentage=24h";

/// One asset row from the ranked listing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MarketAsset {
    pub id: String,
    #[serde(default)]
    pub symbol: Option<String>,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    pub current_price: f64,
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct MarketDataClient {
    base_url: String,
    http: reqwest::Client,
}

impl Default for MarketDataClient {
    fn default() -> Self {
        Self::new(DEFAULT_MARKET_BASE_URL)
    }
}

impl MarketDataClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    pub async fn top_assets(&self) -> Result<Vec<MarketAsset>, ApiError> {
        let url = format!("{}{}", self.base_url, TOP_ASSETS_QUERY);
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|error| ApiError::Transport(error.to_string()))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|error| ApiError::Transport(error.to_string()))?;

        if !status.is_success() {
            return Err(extract_api_error(status, &bytes));
        }

        serde_json::from_slice(&bytes).map_err(|error| ApiError::Decode(error.to_string()))
    }
}
