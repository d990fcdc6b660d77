//! # SessionGate Core
//!
//! Credential lifecycle for SessionGate: issuing short-lived signed
//! credentials, verifying them, and exchanging them exactly once for a fresh
//! credential within a grace window after expiry.
//!
//! The crate holds the domain entities, the token service, the revocation
//! store interface with its in-memory implementation, and the error types
//! shared by every layer above it.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{Claims, Credential, IssuedCredential, RevocationRecord, JWT_ISSUER};
pub use errors::{DomainError, DomainResult, TokenError};
pub use repositories::{InMemoryRevocationStore, RevocationStore};
pub use services::{
    Clock, ExpiryCheck, ManualClock, RevocationSweepConfig, RevocationSweeper, Signer,
    SweepResult, SystemClock, TokenService, TokenServiceConfig,
};
