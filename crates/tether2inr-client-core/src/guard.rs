use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    NotAuthenticated,
    InsufficientPrivilege,
}

impl DenyReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotAuthenticated => "not_authenticated",
            Self::InsufficientPrivilege => "insufficient_privilege",
        }
    }

    /// Message shown in place of the protected view.
    pub fn label(self) -> &'static str {
        match self {
            Self::NotAuthenticated => "Please log in to access this page.",
            Self::InsufficientPrivilege => "Admin access only.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allowed,
    Denied(DenyReason),
}

impl AccessDecision {
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Gate a protected view on the current session. Pure; re-evaluated at every
/// mount rather than cached, so a logout is reflected the next time the view
/// is entered.
pub fn evaluate_access(session: Option<&Session>, require_admin: bool) -> AccessDecision {
    let Some(session) = session else {
        return AccessDecision::Denied(DenyReason::NotAuthenticated);
    };
    if require_admin && !session.identity.is_admin {
        return AccessDecision::Denied(DenyReason::InsufficientPrivilege);
    }
    AccessDecision::Allowed
}
