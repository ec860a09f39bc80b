//! Client-side session and navigation core for the tether2inr exchange client.
//!
//! This crate owns the pieces every screen depends on: the persisted session
//! store, the access guard evaluated before protected views mount, the
//! single-page view router, and base-URL configuration. It performs no HTTP
//! itself; the request client lives in `tether2inr-api-client`.

pub mod config;
pub mod guard;
pub mod input;
pub mod router;
pub mod session;

pub use config::{DEFAULT_API_BASE_URL, ENV_API_BASE_URL, resolve_api_base_url};
pub use guard::{AccessDecision, DenyReason, evaluate_access};
pub use router::{Page, ViewRouter};
pub use session::{
    AccountIdentity, FileSessionStore, MemorySessionStore, Session, SessionStateStore,
    SessionStore, SessionStoreError,
};
