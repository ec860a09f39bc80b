use std::sync::Arc;

use tether2inr_api_client::client::ApiClient;
use tether2inr_api_client::types::LoginRequest;
use tether2inr_client_core::router::Page;
use tether2inr_client_core::session::{Session, SessionStore};

use super::screen_message;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email_or_phone: String,
    pub password: String,
}

pub struct LoginScreen {
    api: ApiClient,
    session: Arc<SessionStore>,
    pub form: LoginForm,
    pub error: Option<String>,
}

impl LoginScreen {
    pub fn new(api: ApiClient, session: Arc<SessionStore>) -> Self {
        Self {
            api,
            session,
            form: LoginForm::default(),
            error: None,
        }
    }

    /// Submit the form. On success the session is adopted and the returned
    /// page (dashboard) is where the caller should navigate.
    pub async fn submit(&mut self) -> Option<Page> {
        self.error = None;

        let request = LoginRequest {
            email_or_phone: self.form.email_or_phone.trim().to_string(),
            password: self.form.password.clone(),
        };
        if request.email_or_phone.is_empty() || request.password.is_empty() {
            self.error = Some("Login failed".to_string());
            return None;
        }

        match self.api.login(&request).await {
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
                self.error = Some(screen_message(&error, "Login failed"));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tether2inr_client_core::session::MemorySessionStore;

    #[tokio::test]
    async fn empty_form_is_rejected_before_any_network_call() {
        // Unroutable base URL: a network attempt would fail differently.
        let session = Arc::new(SessionStore::open(Box::new(MemorySessionStore::new())));
        let api = ApiClient::new("http://127.0.0.1:1", session.clone());
        let mut screen = LoginScreen::new(api, session.clone());

        let page = screen.submit().await;
        assert_eq!(page, None);
        assert_eq!(screen.error.as_deref(), Some("Login failed"));
        assert!(!session.is_signed_in());
    }
}
