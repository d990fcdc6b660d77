//! Token service module for credential management
//!
//! This module handles the credential lifecycle:
//! - Credential issuance and strict verification
//! - Grace-window refresh with single-use enforcement
//! - HMAC signing and signature verification
//! - Background sweeping of stale revocation records

mod cleanup;
mod config;
mod service;
mod signer;

#[cfg(test)]
mod tests;

pub use cleanup::{RevocationSweepConfig, RevocationSweeper, SweepResult};
pub use config::TokenServiceConfig;
pub use service::TokenService;
pub use signer::{ExpiryCheck, Signer};
