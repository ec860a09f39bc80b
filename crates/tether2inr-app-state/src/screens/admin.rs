use tether2inr_api_client::client::ApiClient;
use tether2inr_api_client::types::{
    AdminDepositRecord, AdminFilter, AdminWithdrawalRecord, ModerationQueue, ModerationStatus,
};

use super::screen_message;

const LOAD_FAILED: &str = "Failed to load data. Please check your connection and backend.";
const UPDATE_FAILED: &str = "Failed to update status.";
const ILLEGAL_TRANSITION: &str = "Status change not allowed from the current state.";

#[derive(Debug, Clone, PartialEq)]
pub enum AdminState {
    Loading,
    Loaded {
        deposits: Vec<AdminDepositRecord>,
        withdrawals: Vec<AdminWithdrawalRecord>,
    },
    Failed(String),
}

/// The moderation table behind the admin page: filtered parallel loads of
/// both queues, per-row status transitions, and CSV export links.
pub struct AdminScreen {
    api: ApiClient,
    pub filter: AdminFilter,
    pub state: AdminState,
    pub error: Option<String>,
}

impl AdminScreen {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            filter: AdminFilter::default(),
            state: AdminState::Loading,
            error: None,
        }
    }

    /// Both queues are fetched concurrently; either failure is the whole
    /// table failing, never a half-rendered one.
    pub async fn load(&mut self) {
        self.state = AdminState::Loading;
        self.error = None;

        let (deposits, withdrawals) = tokio::join!(
            self.api.admin_deposits(&self.filter),
            self.api.admin_withdrawals(&self.filter)
        );
        self.state = match (deposits, withdrawals) {
            (Ok(deposits), Ok(withdrawals)) => AdminState::Loaded {
                deposits,
                withdrawals,
            },
            (Err(error), _) | (_, Err(error)) => {
                AdminState::Failed(screen_message(&error, LOAD_FAILED))
            }
        };
    }

    /// Changing the filter reloads both queues under it.
    pub async fn apply_filter(&mut self, filter: AdminFilter) {
        self.filter = filter;
        self.load().await;
    }

    /// Move a record to a new status and reload. Transitions outside the
    /// moderation table (e.g. reopening a Success record) are rejected
    /// client-side without a network call.
    pub async fn transition(
        &mut self,
        queue: ModerationQueue,
        record_id: &str,
        current: ModerationStatus,
        next: ModerationStatus,
    ) {
        self.error = None;

        if !current.can_transition_to(next) {
            self.error = Some(ILLEGAL_TRANSITION.to_string());
            return;
        }

        match self.api.set_moderation_status(queue, record_id, next).await {
            Ok(_) => self.load().await,
            Err(_) => self.error = Some(UPDATE_FAILED.to_string()),
        }
    }

    /// CSV download link under the current filter; opening it is the
    /// rendering layer's job.
    pub fn export_link(&self, queue: ModerationQueue) -> String {
        self.api.export_url(queue, &self.filter)
    }
}
