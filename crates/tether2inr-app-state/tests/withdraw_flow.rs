//! Withdraw screen against a stateful local server: parallel mount reads,
//! validation before submission, balance refresh after a successful request,
//! and bank removal through the confirmation flow.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use tether2inr_api_client::client::ApiClient;
use tether2inr_app_state::screens::withdraw::{WithdrawScreen, WithdrawState};
use tether2inr_client_core::session::{MemorySessionStore, SessionStore};

#[derive(Clone)]
struct ServerState {
    banks: Arc<Mutex<Vec<Value>>>,
    balance: Arc<Mutex<f64>>,
}

impl ServerState {
    fn new(balance: f64) -> Self {
        Self {
            banks: Arc::new(Mutex::new(vec![
                json!({
                    "_id": "663a",
                    "name": "Asha K",
                    "ifsc": "HDFC0001234",
                    "account": "50100123456789"
                }),
                json!({
                    "_id": "664b",
                    "name": "Asha Joint",
                    "ifsc": "SBIN0005678",
                    "account": "30200987654321"
                }),
            ])),
            balance: Arc::new(Mutex::new(balance)),
        }
    }
}

async fn banks_handler(State(state): State<ServerState>) -> Json<Value> {
    let banks = state
        .banks
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone();
    Json(Value::Array(banks))
}

async fn remove_bank_handler(
    State(state): State<ServerState>,
    Path(bank_id): Path<String>,
) -> Json<Value> {
    state
        .banks
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .retain(|bank| bank["_id"] != json!(bank_id));
    Json(json!({"ok": true}))
}

async fn profile_handler(State(state): State<ServerState>) -> Json<Value> {
    let balance = *state
        .balance
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    Json(json!({
        "email": "asha@tether2inr.com",
        "isAdmin": false,
        "usdtBalance": balance
    }))
}

async fn withdraw_handler(
    State(state): State<ServerState>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let amount = body["amount"].as_f64().unwrap_or(0.0);
    let mut balance = state
        .balance
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    if amount > *balance {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"msg": "Insufficient balance"})),
        );
    }
    *balance -= amount;
    (StatusCode::OK, Json(json!({"ok": true})))
}

async fn start_server(state: ServerState) -> SocketAddr {
    let app = Router::new()
        .route("/user/banks", get(banks_handler))
        .route("/user/banks/:id", axum::routing::delete(remove_bank_handler))
        .route("/user/profile", get(profile_handler))
        .route("/withdraw", post(withdraw_handler))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

fn screen(addr: SocketAddr) -> (WithdrawScreen, Arc<SessionStore>) {
    let session = Arc::new(SessionStore::open(Box::new(MemorySessionStore::new())));
    let api = ApiClient::new(format!("http://{addr}"), session.clone());
    (WithdrawScreen::new(api, session.clone()), session)
}

#[tokio::test]
async fn mount_loads_banks_and_balance_together() {
    let addr = start_server(ServerState::new(250.0)).await;
    let (mut screen, _session) = screen(addr);

    screen.load().await;
    assert_eq!(screen.state, WithdrawState::Ready);
    assert_eq!(screen.banks.len(), 2);
    assert_eq!(screen.selected_bank_id.as_deref(), Some("663a"));
    assert_eq!(screen.available_usdt, 250.0);
}

#[tokio::test]
async fn successful_withdrawal_clears_the_form_and_refreshes_balance() {
    let addr = start_server(ServerState::new(250.0)).await;
    let (mut screen, _session) = screen(addr);

    screen.load().await;
    screen.amount = "100".to_string();
    screen.submit().await;

    assert_eq!(screen.error, None);
    assert_eq!(screen.message.as_deref(), Some("Withdrawal request submitted!"));
    assert_eq!(screen.amount, "");
    assert_eq!(screen.available_usdt, 150.0);
}

#[tokio::test]
async fn server_rejection_surfaces_its_message() {
    let addr = start_server(ServerState::new(250.0)).await;
    let (mut screen, _session) = screen(addr);

    screen.load().await;
    // Pass client-side validation, fail server-side: shrink the balance
    // between mount and submit the way a concurrent withdrawal would.
    screen.available_usdt = 10_000.0;
    screen.amount = "9999".to_string();
    screen.submit().await;

    assert_eq!(screen.error.as_deref(), Some("Insufficient balance"));
    assert_eq!(screen.message, None);
}

#[tokio::test]
async fn validation_rejects_before_any_network_call() {
    let addr = start_server(ServerState::new(250.0)).await;
    let (mut screen, _session) = screen(addr);

    screen.load().await;
    screen.amount = "9".to_string();
    screen.submit().await;
    assert_eq!(screen.error.as_deref(), Some("Enter valid amount (min 10)."));

    screen.amount = "251".to_string();
    screen.submit().await;
    assert_eq!(
        screen.error.as_deref(),
        Some("Please enter an amount equal to or less than your available balance.")
    );
    // The server never saw a request: balance unchanged.
    assert_eq!(screen.available_usdt, 250.0);
}

#[tokio::test]
async fn bank_removal_goes_through_the_confirmation_flow() {
    let addr = start_server(ServerState::new(250.0)).await;
    let (mut screen, _session) = screen(addr);

    screen.load().await;
    screen.request_remove_bank("663a");
    assert!(screen.remove_confirmation.is_pending());

    // Cancelling keeps the bank.
    screen.cancel_remove_bank();
    screen.confirm_remove_bank().await;
    assert_eq!(screen.banks.len(), 2);

    // Confirming removes it and the selection falls back to the next bank.
    screen.request_remove_bank("663a");
    screen.confirm_remove_bank().await;
    assert_eq!(screen.message.as_deref(), Some("Bank removed!"));
    assert_eq!(screen.banks.len(), 1);
    assert_eq!(screen.selected_bank_id.as_deref(), Some("664b"));
}

#[tokio::test]
async fn failed_mount_read_fails_the_whole_view() {
    // Only profile is routed; the banks read 404s with a plain body.
    let app = Router::new().route(
        "/user/profile",
        get(|| async { Json(json!({"email": "a@b.c", "usdtBalance": 1.0})) }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let (mut screen, _session) = screen(addr);
    screen.load().await;
    assert!(matches!(screen.state, WithdrawState::Failed(_)));
    assert!(screen.banks.is_empty());
}
