//! The authenticated session and its persisted backing.
//!
//! The store is the single owner of the current session: screens read through
//! it, login/registration replace it, and clearing it is the only logout
//! path. The persisted record and the bearer credential are kept under
//! separate keys so the request client can read the credential fresh on every
//! call.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const SESSION_FILE: &str = "session.json";
const CREDENTIAL_FILE: &str = "credential";

/// Identity fields the client renders and gates on. Wire names match the
/// server's user record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountIdentity {
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub usdt_balance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referral_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referral_earnings: Option<f64>,
}

/// The authenticated identity plus the opaque bearer credential proving it.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub identity: AccountIdentity,
    pub credential: String,
}

#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("session storage io: {0}")]
    Io(#[from] std::io::Error),
    #[error("session record encode: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Persistence seam for the session record and credential.
pub trait SessionStateStore: Send + Sync {
    fn load(&self) -> Result<Option<Session>, SessionStoreError>;
    fn persist(&self, session: &Session) -> Result<(), SessionStoreError>;
    fn clear(&self) -> Result<(), SessionStoreError>;
}

/// File-backed store keeping the identity record and the credential in
/// separate files under one directory, surviving restarts until logout.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn session_path(&self) -> PathBuf {
        self.dir.join(SESSION_FILE)
    }

    fn credential_path(&self) -> PathBuf {
        self.dir.join(CREDENTIAL_FILE)
    }
}

impl SessionStateStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>, SessionStoreError> {
        let Some(credential) = read_if_present(&self.credential_path())? else {
            return Ok(None);
        };
        let credential = credential.trim().to_string();
        if credential.is_empty() {
            return Ok(None);
        }

        let Some(raw) = read_if_present(&self.session_path())? else {
            return Ok(None);
        };
        match serde_json::from_str::<AccountIdentity>(&raw) {
            Ok(identity) => Ok(Some(Session {
                identity,
                credential,
            })),
            Err(error) => {
                // Corrupt local state is never fatal; start signed out.
                tracing::warn!(%error, "discarding malformed persisted session record");
                Ok(None)
            }
        }
    }

    fn persist(&self, session: &Session) -> Result<(), SessionStoreError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(
            self.session_path(),
            serde_json::to_string(&session.identity)?,
        )?;
        fs::write(self.credential_path(), &session.credential)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        remove_if_present(&self.session_path())?;
        remove_if_present(&self.credential_path())?;
        Ok(())
    }
}

/// In-memory store for tests and ephemeral (incognito-style) contexts.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: RwLock<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(session: Session) -> Self {
        Self {
            slot: RwLock::new(Some(session)),
        }
    }
}

impl SessionStateStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>, SessionStoreError> {
        Ok(self
            .slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn persist(&self, session: &Session) -> Result<(), SessionStoreError> {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// Process-wide holder of the current session, loaded from its backing at
/// construction. All mutation goes through [`SessionStore::replace`],
/// [`SessionStore::update_identity`], or [`SessionStore::clear`].
pub struct SessionStore {
    backing: Box<dyn SessionStateStore>,
    current: RwLock<Option<Session>>,
}

impl SessionStore {
    /// Open the store, adopting a persisted session when one is present and
    /// well formed. A backing that fails to load starts signed out.
    pub fn open(backing: Box<dyn SessionStateStore>) -> Self {
        let current = match backing.load() {
            Ok(session) => session,
            Err(error) => {
                tracing::warn!(%error, "session backing failed to load; starting signed out");
                None
            }
        };
        Self {
            backing,
            current: RwLock::new(current),
        }
    }

    pub fn session(&self) -> Option<Session> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn identity(&self) -> Option<AccountIdentity> {
        self.session().map(|session| session.identity)
    }

    /// Current bearer credential. Read at call time by the request client so
    /// a logout is reflected on the very next request.
    pub fn credential(&self) -> Option<String> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|session| session.credential.clone())
    }

    pub fn is_signed_in(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Adopt a new session (login or completed registration) and persist it.
    pub fn replace(&self, session: Session) -> Result<(), SessionStoreError> {
        self.backing.persist(&session)?;
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(session);
        Ok(())
    }

    /// Refresh identity fields (e.g. balance after a withdrawal) without
    /// touching the credential. No-op when signed out.
    pub fn update_identity(&self, identity: AccountIdentity) -> Result<(), SessionStoreError> {
        let Some(mut session) = self.session() else {
            return Ok(());
        };
        session.identity = identity;
        self.replace(session)
    }

    /// The sole logout path: drops the in-memory session and clears both the
    /// persisted record and the persisted credential.
    pub fn clear(&self) -> Result<(), SessionStoreError> {
        self.backing.clear()?;
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

fn read_if_present(path: &Path) -> Result<Option<String>, SessionStoreError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(error) => Err(error.into()),
    }
}

fn remove_if_present(path: &Path) -> Result<(), SessionStoreError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(error) => Err(error.into()),
    }
}
