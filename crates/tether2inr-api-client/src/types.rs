//! Wire contracts for the exchange API.
//!
//! Field names follow the server's JSON exactly (`emailOrPhone`, `txHash`,
//! `_id`, ...). Responses are decoded into these types immediately after the
//! request client call; a payload that violates its contract surfaces as a
//! decode error instead of flowing through the app untyped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use tether2inr_client_core::session::AccountIdentity;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(rename = "emailOrPhone")]
    pub email_or_phone: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub phone: String,
    pub password: String,
    #[serde(
        rename = "referralCode",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub referral_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

/// `{token, user}` returned by login and OTP verification.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: AccountIdentity,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub deposits: Vec<DepositRecord>,
    #[serde(default)]
    pub withdrawals: Vec<WithdrawalRecord>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositRecord {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    pub amount: f64,
    pub network: DepositNetwork,
    #[serde(default)]
    pub tx_hash: Option<String>,
    pub status: ModerationStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalRecord {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    pub amount: f64,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub bank: Option<BankDetails>,
    pub status: ModerationStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A saved payout bank account as the server returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankAccount {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub ifsc: String,
    pub account: String,
}

/// Bank fields without the server-assigned id; used when adding an account
/// and when the server embeds bank details in a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankDetails {
    pub name: String,
    pub ifsc: String,
    pub account: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DepositNetwork {
    #[serde(rename = "TRC20")]
    Trc20,
    #[serde(rename = "BEP20")]
    Bep20,
}

impl DepositNetwork {
    pub fn all() -> [Self; 2] {
        [Self::Trc20, Self::Bep20]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trc20 => "TRC20",
            Self::Bep20 => "BEP20",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepositRequest {
    pub network: DepositNetwork,
    pub amount: f64,
    #[serde(rename = "txHash")]
    pub tx_hash: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WithdrawRequest {
    pub amount: f64,
    pub bank: BankAccount,
    pub method: String,
}

/// Moderation lifecycle of a deposit or withdrawal. The strings are the
/// server's status values verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModerationStatus {
    Pending,
    Completed,
    Success,
    Rejected,
}

impl ModerationStatus {
    pub fn all() -> [Self; 4] {
        [Self::Pending, Self::Completed, Self::Success, Self::Rejected]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Completed => "Completed",
            Self::Success => "Success",
            Self::Rejected => "Rejected",
        }
    }

    /// Transitions the moderation table offers from this status. Success and
    /// Rejected are terminal.
    pub fn next_actions(self) -> &'static [ModerationStatus] {
        match self {
            Self::Pending => &[Self::Completed, Self::Rejected],
            Self::Completed => &[Self::Success, Self::Rejected],
            Self::Success | Self::Rejected => &[],
        }
    }

    pub fn can_transition_to(self, next: ModerationStatus) -> bool {
        self.next_actions().contains(&next)
    }
}

/// Which moderation queue an admin operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationQueue {
    Deposits,
    Withdrawals,
}

impl ModerationQueue {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Deposits => "deposits",
            Self::Withdrawals => "withdrawals",
        }
    }
}

/// Status filter for the admin list endpoints; `All` is the wire value
/// `all`, everything else is the status string itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ModerationStatus),
}

impl StatusFilter {
    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(status) => status.as_str(),
        }
    }
}

/// Filter pair sent to every admin list and export endpoint. The date is an
/// opaque `YYYY-MM-DD` string; empty means unfiltered and is still sent as
/// an empty query value, which the server treats as no date constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminFilter {
    pub status: StatusFilter,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDepositRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub user_email: Option<String>,
    pub amount: f64,
    pub network: DepositNetwork,
    #[serde(default)]
    pub tx_hash: Option<String>,
    pub status: ModerationStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminWithdrawalRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub user_email: Option<String>,
    pub amount: f64,
    #[serde(default)]
    pub bank: Option<BankDetails>,
    pub status: ModerationStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusUpdateRequest {
    pub status: ModerationStatus,
}
