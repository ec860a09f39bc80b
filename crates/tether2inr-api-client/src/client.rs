use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use tether2inr_client_core::session::SessionStore;

use crate::types::{
    AccountIdentity, AdminDepositRecord, AdminFilter, AdminWithdrawalRecord, AuthResponse,
    BankAccount, BankDetails, DepositRequest, HistoryResponse, LoginRequest, ModerationQueue,
    ModerationStatus, RegisterRequest, StatusUpdateRequest, VerifyOtpRequest, WithdrawRequest,
};

/// Fallback message when an error response carries no usable body.
pub const GENERIC_API_ERROR: &str = "API error";

/// Where the request client reads the bearer credential from, fresh on every
/// call. The session store is the production source.
pub trait BearerSource: Send + Sync {
    fn bearer_token(&self) -> Option<String>;
}

impl BearerSource for SessionStore {
    fn bearer_token(&self) -> Option<String> {
        self.credential()
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request path")]
    InvalidPath,
    #[error("invalid header: {0}")]
    InvalidHeader(String),
    #[error("request encode error: {0}")]
    Encode(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("response decode error: {0}")]
    Decode(String),
}

/// Per-call options bag: method (GET by default), optional JSON body, extra
/// headers. Ephemeral; built and discarded per call.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post(body: Value) -> Self {
        Self {
            method: Method::POST,
            body: Some(body),
            ..Self::default()
        }
    }

    pub fn patch(body: Value) -> Self {
        Self {
            method: Method::PATCH,
            body: Some(body),
            ..Self::default()
        }
    }

    pub fn delete() -> Self {
        Self {
            method: Method::DELETE,
            ..Self::default()
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Authenticated client for the exchange API.
///
/// Exactly one attempt per call; failures surface to the caller and never
/// mutate session state. An authentication-rejected response is an ordinary
/// [`ApiError::Api`]; invalidation policy belongs to callers.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    credentials: Arc<dyn BearerSource>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, credentials: Arc<dyn BearerSource>) -> Self {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
            credentials,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> Option<String> {
        let trimmed = path.trim();
        if trimmed.is_empty() {
            return None;
        }
        if trimmed.starts_with('/') {
            Some(format!("{}{}", self.base_url, trimmed))
        } else {
            Some(format!("{}/{}", self.base_url, trimmed))
        }
    }

    // Deterministic path helpers.

    pub fn bank_path(bank_id: &str) -> String {
        format!("/user/banks/{}", bank_id.trim())
    }

    pub fn admin_list_path(queue: ModerationQueue, filter: &AdminFilter) -> String {
        format!(
            "/adminpanel/{}?status={}&date={}",
            queue.as_str(),
            filter.status.as_query_value(),
            filter.date
        )
    }

    pub fn admin_status_path(queue: ModerationQueue, id: &str) -> String {
        format!("/adminpanel/{}/{}/status", queue.as_str(), id.trim())
    }

    pub fn admin_export_path(queue: ModerationQueue, filter: &AdminFilter) -> String {
        format!(
            "/adminpanel/{}/export?status={}&date={}",
            queue.as_str(),
            filter.status.as_query_value(),
            filter.date
        )
    }

    /// Absolute CSV download link for the rendering layer to open; the core
    /// never performs the download itself.
    pub fn export_url(&self, queue: ModerationQueue, filter: &AdminFilter) -> String {
        format!("{}{}", self.base_url, Self::admin_export_path(queue, filter))
    }

    // Generic request surface.

    /// Send one request and decode the JSON body. The bearer credential is
    /// read from the credential source immediately before sending; caller
    /// headers are merged but never displace the bearer or content-type
    /// headers.
    pub async fn request<T>(&self, path: &str, options: RequestOptions) -> Result<T, ApiError>
    where
        T: for<'de> serde::Deserialize<'de>,
    {
        let url = self.endpoint(path).ok_or(ApiError::InvalidPath)?;
        let headers = self.build_headers(&options.headers)?;

        let mut request = self
            .http
            .request(options.method.clone(), url)
            .headers(headers);
        if let Some(body) = &options.body {
            request = request.json(body);
        }

        let response = request
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

        serde_json::from_slice::<T>(&bytes).map_err(|error| ApiError::Decode(error.to_string()))
    }

    pub async fn get_json<T>(&self, path: &str) -> Result<T, ApiError>
    where
        T: for<'de> serde::Deserialize<'de>,
    {
        self.request(path, RequestOptions::get()).await
    }

    pub async fn post_json<Req, Res>(&self, path: &str, payload: &Req) -> Result<Res, ApiError>
    where
        Req: Serialize + ?Sized,
        Res: for<'de> serde::Deserialize<'de>,
    {
        let body = encode_body(payload)?;
        self.request(path, RequestOptions::post(body)).await
    }

    pub async fn patch_json<Req, Res>(&self, path: &str, payload: &Req) -> Result<Res, ApiError>
    where
        Req: Serialize + ?Sized,
        Res: for<'de> serde::Deserialize<'de>,
    {
        let body = encode_body(payload)?;
        self.request(path, RequestOptions::patch(body)).await
    }

    pub async fn delete_json<Res>(&self, path: &str) -> Result<Res, ApiError>
    where
        Res: for<'de> serde::Deserialize<'de>,
    {
        self.request(path, RequestOptions::delete()).await
    }

    // Typed endpoint surface.

    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.post_json("/auth/login", request).await
    }

    /// Triggers OTP issuance; the acknowledgement body is server-owned.
    pub async fn register(&self, request: &RegisterRequest) -> Result<Value, ApiError> {
        self.post_json("/auth/register", request).await
    }

    pub async fn verify_otp(&self, request: &VerifyOtpRequest) -> Result<AuthResponse, ApiError> {
        self.post_json("/auth/verify-otp", request).await
    }

    pub async fn profile(&self) -> Result<AccountIdentity, ApiError> {
        self.get_json("/user/profile").await
    }

    pub async fn history(&self) -> Result<HistoryResponse, ApiError> {
        self.get_json("/user/history").await
    }

    pub async fn banks(&self) -> Result<Vec<BankAccount>, ApiError> {
        self.get_json("/user/banks").await
    }

    pub async fn add_bank(&self, details: &BankDetails) -> Result<Value, ApiError> {
        self.post_json("/user/banks", details).await
    }

    pub async fn remove_bank(&self, bank_id: &str) -> Result<Value, ApiError> {
        self.delete_json(Self::bank_path(bank_id).as_str()).await
    }

    pub async fn submit_deposit(&self, request: &DepositRequest) -> Result<Value, ApiError> {
        self.post_json("/deposit", request).await
    }

    pub async fn submit_withdrawal(&self, request: &WithdrawRequest) -> Result<Value, ApiError> {
        self.post_json("/withdraw", request).await
    }

    pub async fn admin_deposits(
        &self,
        filter: &AdminFilter,
    ) -> Result<Vec<AdminDepositRecord>, ApiError> {
        self.get_json(Self::admin_list_path(ModerationQueue::Deposits, filter).as_str())
            .await
    }

    pub async fn admin_withdrawals(
        &self,
        filter: &AdminFilter,
    ) -> Result<Vec<AdminWithdrawalRecord>, ApiError> {
        self.get_json(Self::admin_list_path(ModerationQueue::Withdrawals, filter).as_str())
            .await
    }

    pub async fn set_moderation_status(
        &self,
        queue: ModerationQueue,
        id: &str,
        status: ModerationStatus,
    ) -> Result<Value, ApiError> {
        self.patch_json(
            Self::admin_status_path(queue, id).as_str(),
            &StatusUpdateRequest { status },
        )
        .await
    }

    fn build_headers(&self, extra: &[(String, String)]) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        for (name, value) in extra {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ApiError::InvalidHeader(name.clone()))?;
            let value = HeaderValue::from_str(value)
                .map_err(|_| ApiError::InvalidHeader(name.to_string()))?;
            headers.insert(name, value);
        }

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        // Credential read at call time, not at client construction: a logout
        // is reflected on the very next request.
        if let Some(token) = self.credentials.bearer_token() {
            let bearer = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| ApiError::InvalidHeader("authorization".to_string()))?;
            headers.insert(AUTHORIZATION, bearer);
        }
        if let Ok(request_id) =
            HeaderValue::from_str(&format!("req_{}", Uuid::new_v4().simple()))
        {
            headers.insert(HeaderName::from_static("x-request-id"), request_id);
        }

        Ok(headers)
    }
}

fn encode_body<Req: Serialize + ?Sized>(payload: &Req) -> Result<Value, ApiError> {
    serde_json::to_value(payload).map_err(|error| ApiError::Encode(error.to_string()))
}

/// Map a non-success response to [`ApiError::Api`]: the body's `msg` field
/// when it parses as JSON, else the raw text, else the generic fallback.
pub fn extract_api_error(status: StatusCode, body: &[u8]) -> ApiError {
    let message = match serde_json::from_slice::<Value>(body) {
        Ok(parsed) => parsed
            .get("msg")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| GENERIC_API_ERROR.to_string()),
        Err(_) => {
            let raw = String::from_utf8_lossy(body);
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                GENERIC_API_ERROR.to_string()
            } else {
                trimmed.to_string()
            }
        }
    };
    ApiError::Api {
        status: status.as_u16(),
        message,
    }
}
