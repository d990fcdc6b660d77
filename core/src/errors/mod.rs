//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

pub use types::TokenError;

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Startup-time misconfiguration (bad key, unsupported algorithm)
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to credential failures
    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    /// Stable machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::Validation { .. } => "VALIDATION_ERROR",
            DomainError::Configuration { .. } => "CONFIGURATION_ERROR",
            DomainError::Internal { .. } => "INTERNAL_ERROR",
            DomainError::Token(token_error) => token_error.code(),
        }
    }

    /// The credential failure kind, if this is one
    pub fn token_error(&self) -> Option<TokenError> {
        match self {
            DomainError::Token(token_error) => Some(*token_error),
            _ => None,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
