use tether2inr_api_client::client::ApiClient;
use tether2inr_api_client::types::{AccountIdentity, HistoryResponse};

use super::screen_message;

const LOAD_FAILED: &str = "Failed to load dashboard.";

/// The dashboard is all-or-nothing: profile and history are fetched
/// concurrently and both must resolve before anything renders.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardState {
    Loading,
    Loaded {
        profile: AccountIdentity,
        history: HistoryResponse,
    },
    Failed(String),
}

pub struct DashboardScreen {
    api: ApiClient,
    pub state: DashboardState,
}

impl DashboardScreen {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: DashboardState::Loading,
        }
    }

    /// Issue both reads concurrently; completions may interleave in any
    /// order, and the failure of either puts the whole view in its error
    /// state rather than partially rendering.
    pub async fn load(&mut self) {
        self.state = DashboardState::Loading;

        let (profile, history) = tokio::join!(self.api.profile(), self.api.history());
        self.state = match (profile, history) {
            (Ok(profile), Ok(history)) => DashboardState::Loaded { profile, history },
            (Err(error), _) | (_, Err(error)) => {
                DashboardState::Failed(screen_message(&error, LOAD_FAILED))
            }
        };
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, DashboardState::Loaded { .. })
    }
}
