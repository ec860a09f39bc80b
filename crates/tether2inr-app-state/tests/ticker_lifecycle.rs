//! Ticker behavior against a local market endpoint: immediate first poll,
//! direction derived from the previous tick, failure tolerance, and
//! guaranteed shutdown.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};

use tether2inr_api_client::market::MarketDataClient;
use tether2inr_app_state::ticker::{MarketTicker, PriceDirection};

async fn markets_handler(State(calls): State<Arc<AtomicU64>>) -> Json<Value> {
    // Price climbs by one on every poll so the second tick trends up.
    let call = calls.fetch_add(1, Ordering::SeqCst);
    Json(json!([
        {
            "id": "bitcoin",
            "symbol": "btc",
            "name": "Bitcoin",
            "current_price": 64_000.0 + call as f64,
            "price_change_percentage_24h": 1.2
        },
        {
            "id": "tether",
            "symbol": "usdt",
            "name": "Tether",
            "current_price": 1.0,
            "price_change_percentage_24h": 0.0
        }
    ]))
}

async fn start_market_server() -> SocketAddr {
    let calls = Arc::new(AtomicU64::new(0));
    let app = Router::new()
        .route("/coins/markets", get(markets_handler))
        .with_state(calls);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

async fn wait_until(mut condition: impl FnMut() -> bool) -> bool {
    for _ in 0..100 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    false
}

#[tokio::test]
async fn polls_on_an_interval_and_derives_directions() {
    let addr = start_market_server().await;
    let client = MarketDataClient::new(format!("http://{addr}"));
    let ticker = MarketTicker::start(client, Duration::from_millis(25));

    assert!(
        wait_until(|| ticker.snapshot().ticks >= 2).await,
        "ticker never completed two polls"
    );

    let snapshot = ticker.snapshot();
    assert_eq!(snapshot.rows.len(), 2);
    assert!(snapshot.last_error.is_none());

    let bitcoin = &snapshot.rows[0];
    assert_eq!(bitcoin.asset.id, "bitcoin");
    assert_eq!(bitcoin.direction, PriceDirection::Up);

    let tether = &snapshot.rows[1];
    assert_eq!(tether.direction, PriceDirection::Steady);

    ticker.stop();
    assert!(
        wait_until(|| ticker.is_finished()).await,
        "ticker task did not terminate after stop"
    );
}

#[tokio::test]
async fn stop_is_idempotent() {
    let addr = start_market_server().await;
    let client = MarketDataClient::new(format!("http://{addr}"));
    let ticker = MarketTicker::start(client, Duration::from_millis(25));

    ticker.stop();
    ticker.stop();
    assert!(
        wait_until(|| ticker.is_finished()).await,
        "ticker task did not terminate"
    );
}

#[tokio::test]
async fn poll_failures_keep_the_last_snapshot() {
    // No route for /coins/markets: every poll fails with a 404.
    let app = Router::new();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let client = MarketDataClient::new(format!("http://{addr}"));
    let ticker = MarketTicker::start(client, Duration::from_millis(25));

    assert!(
        wait_until(|| ticker.snapshot().ticks >= 1).await,
        "ticker never completed a poll"
    );
    let snapshot = ticker.snapshot();
    assert!(snapshot.rows.is_empty());
    assert!(snapshot.last_error.is_some());

    ticker.stop();
}
