//! One controller per client page. Controllers own their form/state fields,
//! call the request client, and convert every failure into a message the
//! rendering layer can show; nothing propagates past a controller.

pub mod admin;
pub mod dashboard;
pub mod deposit;
pub mod exchange;
pub mod login;
pub mod register;
pub mod withdraw;

use tether2inr_api_client::client::ApiError;

/// User-facing message for a failed call: the server's own message when the
/// API rejected the request, otherwise the screen's fallback.
pub(crate) fn screen_message(error: &ApiError, fallback: &str) -> String {
    match error {
        ApiError::Api { message, .. } if !message.is_empty() => message.clone(),
        _ => fallback.to_string(),
    }
}

/// Parse a user-entered USDT amount, tolerating comma grouping ("1,000").
pub fn parse_usdt_amount(raw: &str) -> Option<f64> {
    let cleaned = raw.replace(',', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite() && *amount > 0.0)
}
