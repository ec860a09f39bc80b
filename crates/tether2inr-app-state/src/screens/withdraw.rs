use std::sync::Arc;

use thiserror::Error;

use tether2inr_api_client::client::ApiClient;
use tether2inr_api_client::types::{BankAccount, BankDetails, WithdrawRequest};
use tether2inr_client_core::session::SessionStore;

use crate::confirm::ConfirmationFlow;

use super::{parse_usdt_amount, screen_message};

pub const MIN_WITHDRAWAL_USDT: f64 = 10.0;
/// Fixed quote shown as the payout preview.
pub const USDT_PRICE_INR: f64 = 95.0;

const LOAD_FAILED: &str = "Failed to load withdrawal data.";
const SUBMITTED_MESSAGE: &str = "Withdrawal request submitted!";
const BANK_ADDED_MESSAGE: &str = "Bank added!";
const BANK_REMOVED_MESSAGE: &str = "Bank removed!";

/// Client-side rejection reasons, checked before any network call. The
/// messages are what the screen shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WithdrawValidationError {
    #[error("Please select a bank account.")]
    NoBankSelected,
    #[error("Enter valid amount (min 10).")]
    InvalidAmount,
    #[error("Please enter an amount equal to or less than your available balance.")]
    ExceedsBalance,
}

/// Validate a withdrawal before submission. Both boundaries are accepted:
/// exactly the minimum, and exactly the available balance.
pub fn validate_withdrawal(
    amount_raw: &str,
    available_usdt: f64,
    selected_bank: Option<&BankAccount>,
) -> Result<(f64, BankAccount), WithdrawValidationError> {
    let Some(bank) = selected_bank else {
        return Err(WithdrawValidationError::NoBankSelected);
    };
    let amount =
        parse_usdt_amount(amount_raw).ok_or(WithdrawValidationError::InvalidAmount)?;
    if amount < MIN_WITHDRAWAL_USDT {
        return Err(WithdrawValidationError::InvalidAmount);
    }
    if amount > available_usdt {
        return Err(WithdrawValidationError::ExceedsBalance);
    }
    Ok((amount, bank.clone()))
}

pub fn inr_payout(amount_usdt: f64) -> f64 {
    amount_usdt * USDT_PRICE_INR
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WithdrawState {
    Loading,
    Ready,
    Failed(String),
}

pub struct WithdrawScreen {
    api: ApiClient,
    session: Arc<SessionStore>,
    pub state: WithdrawState,
    pub banks: Vec<BankAccount>,
    pub selected_bank_id: Option<String>,
    pub amount: String,
    pub available_usdt: f64,
    pub bank_form: BankDetails,
    pub message: Option<String>,
    pub error: Option<String>,
    /// Bank removal goes through the shared confirmation flow; the subject
    /// is the bank id awaiting the decision.
    pub remove_confirmation: ConfirmationFlow<String>,
}

impl WithdrawScreen {
    pub fn new(api: ApiClient, session: Arc<SessionStore>) -> Self {
        Self {
            api,
            session,
            state: WithdrawState::Loading,
            banks: Vec::new(),
            selected_bank_id: None,
            amount: String::new(),
            available_usdt: 0.0,
            bank_form: BankDetails {
                name: String::new(),
                ifsc: String::new(),
                account: String::new(),
            },
            message: None,
            error: None,
            remove_confirmation: ConfirmationFlow::new(),
        }
    }

    /// Mount: banks and profile are independent parallel reads; both must
    /// resolve or the view reports the failure instead of rendering data.
    pub async fn load(&mut self) {
        self.state = WithdrawState::Loading;

        let (banks, profile) = tokio::join!(self.api.banks(), self.api.profile());
        match (banks, profile) {
            (Ok(banks), Ok(profile)) => {
                self.banks = banks;
                self.reconcile_selection();
                self.available_usdt = profile.usdt_balance;
                if let Err(error) = self.session.update_identity(profile) {
                    tracing::warn!(%error, "failed to persist refreshed identity");
                }
                self.state = WithdrawState::Ready;
            }
            (Err(error), _) | (_, Err(error)) => {
                self.state = WithdrawState::Failed(screen_message(&error, LOAD_FAILED));
            }
        }
    }

    pub fn select_bank(&mut self, bank_id: &str) {
        if self.banks.iter().any(|bank| bank.id == bank_id) {
            self.selected_bank_id = Some(bank_id.to_string());
        }
    }

    pub fn selected_bank(&self) -> Option<&BankAccount> {
        let id = self.selected_bank_id.as_deref()?;
        self.banks.iter().find(|bank| bank.id == id)
    }

    pub async fn add_bank(&mut self) {
        self.error = None;
        self.message = None;

        match self.api.add_bank(&self.bank_form.clone()).await {
            Ok(_) => {
                self.bank_form = BankDetails {
                    name: String::new(),
                    ifsc: String::new(),
                    account: String::new(),
                };
                self.message = Some(BANK_ADDED_MESSAGE.to_string());
                self.refresh_banks().await;
            }
            Err(_) => self.error = Some("Failed to add bank.".to_string()),
        }
    }

    pub fn request_remove_bank(&mut self, bank_id: &str) {
        self.remove_confirmation.request(bank_id.to_string());
    }

    pub fn cancel_remove_bank(&mut self) {
        self.remove_confirmation.cancel();
    }

    /// Complete a removal previously requested through the confirmation
    /// flow. Without a pending confirmation this is a no-op.
    pub async fn confirm_remove_bank(&mut self) {
        let Some(bank_id) = self.remove_confirmation.confirm() else {
            return;
        };
        self.error = None;
        self.message = None;

        match self.api.remove_bank(&bank_id).await {
            Ok(_) => {
                self.message = Some(BANK_REMOVED_MESSAGE.to_string());
                self.refresh_banks().await;
            }
            Err(_) => self.error = Some("Failed to remove bank.".to_string()),
        }
    }

    pub async fn submit(&mut self) {
        self.error = None;
        self.message = None;

        let (amount, bank) =
            match validate_withdrawal(&self.amount, self.available_usdt, self.selected_bank()) {
                Ok(validated) => validated,
                Err(rejection) => {
                    self.error = Some(rejection.to_string());
                    return;
                }
            };

        let request = WithdrawRequest {
            amount,
            bank,
            method: "bank".to_string(),
        };
        match self.api.submit_withdrawal(&request).await {
            Ok(_) => {
                self.amount = String::new();
                self.message = Some(SUBMITTED_MESSAGE.to_string());
                self.refresh_profile().await;
            }
            Err(error) => {
                self.error = Some(screen_message(&error, "Failed to withdraw."));
            }
        }
    }

    async fn refresh_banks(&mut self) {
        match self.api.banks().await {
            Ok(banks) => {
                self.banks = banks;
                self.reconcile_selection();
            }
            Err(error) => {
                tracing::warn!(%error, "bank list refresh failed");
            }
        }
    }

    async fn refresh_profile(&mut self) {
        match self.api.profile().await {
            Ok(profile) => {
                self.available_usdt = profile.usdt_balance;
                if let Err(error) = self.session.update_identity(profile) {
                    tracing::warn!(%error, "failed to persist refreshed identity");
                }
            }
            Err(error) => {
                tracing::warn!(%error, "profile refresh failed");
            }
        }
    }

    /// Keep the selection valid: fall back to the first bank when the
    /// selected one disappears, clear it when none remain.
    fn reconcile_selection(&mut self) {
        let still_present = self
            .selected_bank_id
            .as_deref()
            .is_some_and(|id| self.banks.iter().any(|bank| bank.id == id));
        if !still_present {
            self.selected_bank_id = self.banks.first().map(|bank| bank.id.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank() -> BankAccount {
        BankAccount {
            id: "663a".to_string(),
            name: "Asha K".to_string(),
            ifsc: "HDFC0001234".to_string(),
            account: "50100123456789".to_string(),
        }
    }

    #[test]
    fn rejects_amount_below_minimum() {
        let bank = bank();
        assert_eq!(
            validate_withdrawal("9.99", 100.0, Some(&bank)),
            Err(WithdrawValidationError::InvalidAmount)
        );
    }

    #[test]
    fn rejects_amount_above_available_balance() {
        let bank = bank();
        assert_eq!(
            validate_withdrawal("100.01", 100.0, Some(&bank)),
            Err(WithdrawValidationError::ExceedsBalance)
        );
    }

    #[test]
    fn rejects_missing_bank_selection() {
        assert_eq!(
            validate_withdrawal("50", 100.0, None),
            Err(WithdrawValidationError::NoBankSelected)
        );
    }

    #[test]
    fn rejects_unparseable_amount() {
        let bank = bank();
        assert_eq!(
            validate_withdrawal("ten", 100.0, Some(&bank)),
            Err(WithdrawValidationError::InvalidAmount)
        );
    }

    #[test]
    fn accepts_both_boundaries() {
        let bank = bank();
        let (amount, _) =
            validate_withdrawal("10", 100.0, Some(&bank)).expect("minimum accepted");
        assert_eq!(amount, 10.0);

        let (amount, _) =
            validate_withdrawal("100", 100.0, Some(&bank)).expect("full balance accepted");
        assert_eq!(amount, 100.0);
    }

    #[test]
    fn accepts_comma_grouped_amount() {
        let bank = bank();
        let (amount, _) =
            validate_withdrawal("1,000", 2_000.0, Some(&bank)).expect("grouped amount accepted");
        assert_eq!(amount, 1000.0);
    }

    #[test]
    fn payout_preview_uses_the_fixed_quote() {
        assert_eq!(inr_payout(10.0), 950.0);
    }

    #[test]
    fn validation_messages_match_the_screen_copy() {
        assert_eq!(
            WithdrawValidationError::NoBankSelected.to_string(),
            "Please select a bank account."
        );
        assert_eq!(
            WithdrawValidationError::InvalidAmount.to_string(),
            "Enter valid amount (min 10)."
        );
    }
}
