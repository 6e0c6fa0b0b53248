// Session guard state.
// Tracks whether the auth status check has resolved and its outcome.

use crate::error::Result;

/// Authentication status of the ambient session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionState {
    pub authenticated: bool,
    /// Set once the status request has resolved or failed.
    pub checked: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A status request is in flight; the gate shows the checking placeholder.
    pub fn begin_check(&mut self) {
        self.checked = false;
    }

    /// Apply the status response. Failures count as unauthenticated.
    pub fn resolve(&mut self, result: &Result<bool>) -> bool {
        self.authenticated = matches!(result, Ok(true));
        self.checked = true;
        self.authenticated
    }

    /// The backend rejected a request with 401.
    pub fn deauthenticate(&mut self) {
        self.authenticated = false;
    }

    /// State after an explicit logout: checked, not authenticated.
    pub fn logged_out() -> Self {
        Self {
            authenticated: false,
            checked: true,
        }
    }

    /// Whether data requests are allowed.
    pub fn is_active(&self) -> bool {
        self.checked && self.authenticated
    }
}
