//! Typed HTTP client for the tether2inr exchange API.
//!
//! [`client::ApiClient`] wraps every outbound call: it reads the bearer
//! credential from the injected [`client::BearerSource`] immediately before
//! sending (never a snapshot), normalizes error bodies into
//! [`client::ApiError`], and decodes responses into the wire contracts in
//! [`types`]. The read-only market-data client lives in [`market`].

pub mod client;
pub mod market;
pub mod types;

pub use client::{ApiClient, ApiError, BearerSource, RequestOptions};
pub use market::{DEFAULT_MARKET_BASE_URL, MarketAsset, MarketDataClient};
