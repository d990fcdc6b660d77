//! Unit tests for domain error types

use crate::errors::{DomainError, TokenError};

#[test]
fn test_token_error_codes_are_distinct() {
    let kinds = [
        TokenError::MissingCredential,
        TokenError::MalformedCredential,
        TokenError::Expired,
        TokenError::AlreadyRefreshed,
        TokenError::RefreshWindowExpired,
    ];

    let mut codes: Vec<&str> = kinds.iter().map(|kind| kind.code()).collect();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), kinds.len());
}

#[test]
fn test_token_error_messages() {
    assert_eq!(TokenError::MissingCredential.to_string(), "Token not found");
    assert_eq!(
        TokenError::RefreshWindowExpired.to_string(),
        "The time to receive a new token has expired"
    );
}

#[test]
fn test_domain_error_keeps_token_kind() {
    let error: DomainError = TokenError::AlreadyRefreshed.into();
    assert_eq!(error.code(), "ALREADY_REFRESHED");
    assert_eq!(error.token_error(), Some(TokenError::AlreadyRefreshed));
    assert_eq!(error.to_string(), "Token has already been refreshed");
}

#[test]
fn test_non_token_errors_have_no_kind() {
    let error = DomainError::Internal {
        message: "store unavailable".to_string(),
    };
    assert_eq!(error.code(), "INTERNAL_ERROR");
    assert!(error.token_error().is_none());
}
