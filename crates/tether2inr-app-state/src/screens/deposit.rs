use tether2inr_api_client::client::ApiClient;
use tether2inr_api_client::types::{DepositNetwork, DepositRequest};

use super::{parse_usdt_amount, screen_message};

const SUBMITTED_STATUS: &str = "Your deposit request has been submitted. Await admin approval!";
const INVALID_AMOUNT: &str = "Enter a valid deposit amount.";
const MISSING_TX_HASH: &str = "Enter the transaction hash.";

const TRC20_WALLET: &str = "TH9N2PkXguotCrC2PbFQsHnwBZrYGSmZ8e";
const BEP20_WALLET: &str = "0x944909359A1Cb0140Ba9047F72fA503A93Bf80f1";

/// Receiving address the user must send USDT to, fixed per network.
pub fn wallet_address(network: DepositNetwork) -> &'static str {
    match network {
        DepositNetwork::Trc20 => TRC20_WALLET,
        DepositNetwork::Bep20 => BEP20_WALLET,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositForm {
    pub network: DepositNetwork,
    pub amount: String,
    pub tx_hash: String,
}

impl Default for DepositForm {
    fn default() -> Self {
        Self {
            network: DepositNetwork::Trc20,
            amount: String::new(),
            tx_hash: String::new(),
        }
    }
}

pub struct DepositScreen {
    api: ApiClient,
    pub form: DepositForm,
    pub status: Option<String>,
    pub error: Option<String>,
}

impl DepositScreen {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            form: DepositForm::default(),
            status: None,
            error: None,
        }
    }

    pub async fn submit(&mut self) {
        self.error = None;
        self.status = None;

        let Some(amount) = parse_usdt_amount(&self.form.amount) else {
            self.error = Some(INVALID_AMOUNT.to_string());
            return;
        };
        let tx_hash = self.form.tx_hash.trim().to_string();
        if tx_hash.is_empty() {
            self.error = Some(MISSING_TX_HASH.to_string());
            return;
        }

        let request = DepositRequest {
            network: self.form.network,
            amount,
            tx_hash,
        };
        match self.api.submit_deposit(&request).await {
            Ok(_) => self.status = Some(SUBMITTED_STATUS.to_string()),
            Err(error) => self.error = Some(screen_message(&error, "Deposit failed.")),
        }
    }
}
