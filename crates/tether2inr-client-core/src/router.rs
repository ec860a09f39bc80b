/// The finite set of client pages, plus the not-found state any unrecognized
/// name maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Exchange,
    Dashboard,
    Login,
    Register,
    Deposit,
    Withdraw,
    Admin,
    NotFound,
}

impl Page {
    pub fn known() -> [Self; 8] {
        [
            Self::Home,
            Self::Exchange,
            Self::Dashboard,
            Self::Login,
            Self::Register,
            Self::Deposit,
            Self::Withdraw,
            Self::Admin,
        ]
    }

    /// Map a page name to its state; anything outside the known set is the
    /// not-found state.
    pub fn from_name(name: &str) -> Self {
        match name {
            "home" => Self::Home,
            "exchange" => Self::Exchange,
            "dashboard" => Self::Dashboard,
            "login" => Self::Login,
            "register" => Self::Register,
            "deposit" => Self::Deposit,
            "withdraw" => Self::Withdraw,
            "admin" => Self::Admin,
            _ => Self::NotFound,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Exchange => "exchange",
            Self::Dashboard => "dashboard",
            Self::Login => "login",
            Self::Register => "register",
            Self::Deposit => "deposit",
            Self::Withdraw => "withdraw",
            Self::Admin => "admin",
            Self::NotFound => "not_found",
        }
    }

    /// Pages that may only mount with a session present.
    pub fn requires_session(self) -> bool {
        matches!(
            self,
            Self::Dashboard | Self::Deposit | Self::Withdraw | Self::Admin
        )
    }

    /// Pages that additionally require the admin flag.
    pub fn requires_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// Single-page, in-memory page selector. No history stack; every transition
/// is an explicit setter call, and the router lives for the process lifetime.
#[derive(Debug, Clone)]
pub struct ViewRouter {
    current: Page,
}

impl Default for ViewRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewRouter {
    pub fn new() -> Self {
        Self {
            current: Page::Home,
        }
    }

    pub fn current(&self) -> Page {
        self.current
    }

    pub fn select(&mut self, page: Page) {
        self.current = page;
    }

    pub fn select_by_name(&mut self, name: &str) {
        self.current = Page::from_name(name);
    }
}
