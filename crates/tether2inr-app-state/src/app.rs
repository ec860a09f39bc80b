use std::sync::Arc;

use tether2inr_api_client::client::ApiClient;
use tether2inr_client_core::config::resolve_api_base_url;
use tether2inr_client_core::guard::{AccessDecision, DenyReason, evaluate_access};
use tether2inr_client_core::input::InputError;
use tether2inr_client_core::router::{Page, ViewRouter};
use tether2inr_client_core::session::SessionStore;

/// What the rendering layer should mount for the current page, with the
/// access guard already applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveView {
    Screen(Page),
    Denied(DenyReason),
    NotFound,
}

/// Composition root: one session store, one request client reading its
/// credential from that store, and the view router. The router itself knows
/// nothing about access control; the guard is applied here, fresh at every
/// view resolution.
pub struct App {
    session: Arc<SessionStore>,
    api: ApiClient,
    router: ViewRouter,
}

impl App {
    pub fn new(base_url: impl Into<String>, session: Arc<SessionStore>) -> Self {
        let api = ApiClient::new(base_url, session.clone());
        Self {
            session,
            api,
            router: ViewRouter::new(),
        }
    }

    /// Construct against the environment-resolved base URL.
    pub fn from_env(session: Arc<SessionStore>) -> Result<Self, InputError> {
        let (base_url, source) = resolve_api_base_url()?;
        tracing::debug!(%base_url, source, "resolved api base url");
        Ok(Self::new(base_url, session))
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn current_page(&self) -> Page {
        self.router.current()
    }

    pub fn navigate(&mut self, name: &str) {
        self.router.select_by_name(name);
    }

    pub fn navigate_to(&mut self, page: Page) {
        self.router.select(page);
    }

    /// Clear the session (store plus persisted backing) and return to the
    /// login page.
    pub fn logout(&mut self) {
        if let Err(error) = self.session.clear() {
            tracing::warn!(%error, "session clear failed during logout");
        }
        self.router.select(Page::Login);
    }

    /// Resolve the view for the current page. Re-evaluated on every call, so
    /// a logout while a protected view is active takes effect the next time
    /// that view would mount.
    pub fn view(&self) -> ActiveView {
        let page = self.router.current();
        if page == Page::NotFound {
            return ActiveView::NotFound;
        }
        if !page.requires_session() {
            return ActiveView::Screen(page);
        }

        let session = self.session.session();
        match evaluate_access(session.as_ref(), page.requires_admin()) {
            AccessDecision::Allowed => ActiveView::Screen(page),
            AccessDecision::Denied(reason) => ActiveView::Denied(reason),
        }
    }
}
