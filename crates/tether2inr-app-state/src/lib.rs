//! Headless application layer for the tether2inr client.
//!
//! Every page of the client is modeled here as a screen controller: state the
//! rendering layer can observe plus async operations against the exchange
//! API. Failures never escape a controller; they become user-visible
//! messages, and a retry is always a new user action. The [`app::App`] glue
//! composes the session store, request client, view router, and access guard.

pub mod app;
pub mod confirm;
pub mod screens;
pub mod ticker;

pub use app::{ActiveView, App};
pub use confirm::ConfirmationFlow;
pub use ticker::{MarketTicker, PriceDirection, TickerRow, TickerSnapshot};
