//! Result of a successful issue or refresh.

use chrono::Duration;

use crate::domain::entities::token::Credential;

/// A freshly signed credential plus the lifetimes the caller needs to schedule
/// its own refresh
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedCredential {
    /// Signed token string handed to the client
    pub token: String,

    /// The credential the token encodes
    pub credential: Credential,

    /// Validity duration the credential was issued with
    pub validity: Duration,

    /// Grace window after expiry during which refresh is allowed
    pub refresh_grace: Duration,
}

impl IssuedCredential {
    /// Validity in whole seconds
    pub fn expires_in_seconds(&self) -> i64 {
        self.validity.num_seconds()
    }

    /// Refresh grace window in whole seconds
    pub fn refresh_grace_seconds(&self) -> i64 {
        self.refresh_grace.num_seconds()
    }
}
