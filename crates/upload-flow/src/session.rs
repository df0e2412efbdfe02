//! Page-session verification state.

use std::sync::{Mutex, PoisonError};

use upload_common::VerificationToken;

/// Holds the token delivered by the checkbox widget until a submission
/// consumes it.
///
/// `empty → populated` on every widget callback (a newer token replaces an
/// older one), `populated → empty` when a checkbox submission takes it.
#[derive(Debug, Default)]
pub struct VerificationSession {
    token: Mutex<Option<VerificationToken>>,
}

impl VerificationSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a freshly issued token, returning the one it replaced
    pub fn store(&self, token: VerificationToken) -> Option<VerificationToken> {
        self.lock().replace(token)
    }

    /// Take the token for a submission; it is not reused afterwards
    pub fn take(&self) -> Option<VerificationToken> {
        self.lock().take()
    }

    pub fn has_token(&self) -> bool {
        self.lock().is_some()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<VerificationToken>> {
        // Poisoning is ignored: the Option is only ever swapped whole.
        self.token.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
