/// Two-phase confirmation shared by every destructive action: request a
/// confirmation for a subject, then either confirm (yielding the subject back
/// to the caller) or cancel (discarding it). At most one confirmation is
/// pending at a time; a new request replaces the previous one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationFlow<T> {
    pending: Option<T>,
}

impl<T> Default for ConfirmationFlow<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T> ConfirmationFlow<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self, subject: T) {
        self.pending = Some(subject);
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref()
    }

    /// Approve the pending confirmation, handing the subject to the caller.
    pub fn confirm(&mut self) -> Option<T> {
        self.pending.take()
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
