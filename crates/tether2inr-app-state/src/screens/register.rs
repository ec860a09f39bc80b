use std::sync::Arc;

use tether2inr_api_client::client::ApiClient;
use tether2inr_api_client::types::{RegisterRequest, VerifyOtpRequest};
use tether2inr_client_core::input::{normalize_email, normalize_otp};
use tether2inr_client_core::router::Page;
use tether2inr_client_core::session::{Session, SessionStore};

use super::screen_message;

const OTP_SENT_INFO: &str = "OTP sent to your email. Enter it below to complete registration.";

/// Registration is two steps: details trigger OTP issuance, the OTP
/// completes the account and establishes the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterStep {
    Details,
    AwaitingOtp,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub email: String,
    pub phone: String,
    pub password: String,
    pub referral_code: String,
}

pub struct RegisterScreen {
    api: ApiClient,
    session: Arc<SessionStore>,
    pub form: RegisterForm,
    pub otp: String,
    pub step: RegisterStep,
    pub info: Option<String>,
    pub error: Option<String>,
}

impl RegisterScreen {
    pub fn new(api: ApiClient, session: Arc<SessionStore>) -> Self {
        Self {
            api,
            session,
            form: RegisterForm::default(),
            otp: String::new(),
            step: RegisterStep::Details,
            info: None,
            error: None,
        }
    }

    /// Step one: submit the registration details, triggering an OTP send.
    pub async fn submit_details(&mut self) {
        self.error = None;
        self.info = None;

        let email = match normalize_email(&self.form.email) {
            Ok(email) => email,
            Err(error) => {
                self.error = Some(error.to_string());
                return;
            }
        };
        let referral_code = {
            let trimmed = self.form.referral_code.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        };
        let request = RegisterRequest {
            email,
            phone: self.form.phone.trim().to_string(),
            password: self.form.password.clone(),
            referral_code,
        };

        match self.api.register(&request).await {
            Ok(_) => {
                self.step = RegisterStep::AwaitingOtp;
                self.info = Some(OTP_SENT_INFO.to_string());
            }
            Err(error) => {
                self.error = Some(screen_message(&error, "Register failed"));
            }
        }
    }

    /// Step two: verify the OTP and adopt the returned session.
    pub async fn submit_otp(&mut self) -> Option<Page> {
        self.error = None;
        self.info = None;

        let email = match normalize_email(&self.form.email) {
            Ok(email) => email,
            Err(error) => {
                self.error = Some(error.to_string());
                return None;
            }
        };
        let otp = match normalize_otp(&self.otp) {
            Ok(otp) => otp,
            Err(error) => {
                self.error = Some(error.to_string());
                return None;
            }
        };

        match self.api.verify_otp(&VerifyOtpRequest { email, otp }).await {
            Ok(auth) => {
                let session = Session {
                    identity: auth.user,
                    credential: auth.token,
                };
                if let Err(error) = self.session.replace(session) {
                    self.error = Some(error.to_string());
                    return None;
                }
                Some(Page::Dashboard)
            }
            Err(error) => {
                self.error = Some(screen_message(&error, "OTP verification failed"));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tether2inr_client_core::session::MemorySessionStore;

    fn screen() -> RegisterScreen {
        let session = Arc::new(SessionStore::open(Box::new(MemorySessionStore::new())));
        let api = ApiClient::new("http://127.0.0.1:1", session.clone());
        RegisterScreen::new(api, session)
    }

    #[tokio::test]
    async fn invalid_email_is_rejected_before_any_network_call() {
        let mut screen = screen();
        screen.form.email = "   ".to_string();

        screen.submit_details().await;
        assert_eq!(screen.step, RegisterStep::Details);
        assert!(screen.error.is_some());
    }

    #[tokio::test]
    async fn malformed_otp_is_rejected_before_any_network_call() {
        let mut screen = screen();
        screen.form.email = "asha@tether2inr.com".to_string();
        screen.step = RegisterStep::AwaitingOtp;
        screen.otp = "12".to_string();

        let page = screen.submit_otp().await;
        assert_eq!(page, None);
        assert!(screen.error.is_some());
    }
}
