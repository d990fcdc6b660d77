//! Credential failure kinds reported by the token service
//!
//! Every variant is an expected, caller-recoverable condition. Each carries a
//! stable machine code so the transport layer can tell them apart without
//! parsing messages.

use thiserror::Error;

/// Per-request credential failures
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// No bearer credential was supplied
    #[error("Token not found")]
    MissingCredential,

    /// Signature invalid or payload unparsable
    #[error("Invalid token")]
    MalformedCredential,

    /// Signature valid but the credential is past its expiry
    #[error("Token expired")]
    Expired,

    /// The credential was already exchanged by an earlier refresh
    #[error("Token has already been refreshed")]
    AlreadyRefreshed,

    /// The credential is past its refresh grace window
    #[error("The time to receive a new token has expired")]
    RefreshWindowExpired,
}

impl TokenError {
    /// Stable machine-readable code for this failure kind
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::MissingCredential => "MISSING_CREDENTIAL",
            TokenError::MalformedCredential => "MALFORMED_CREDENTIAL",
            TokenError::Expired => "CREDENTIAL_EXPIRED",
            TokenError::AlreadyRefreshed => "ALREADY_REFRESHED",
            TokenError::RefreshWindowExpired => "REFRESH_WINDOW_EXPIRED",
        }
    }
}
