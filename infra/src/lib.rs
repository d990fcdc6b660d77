//! # Infrastructure Layer
//!
//! Concrete implementations of the SessionGate core interfaces that talk to
//! external systems. Today that is the Redis-backed revocation store, which
//! keeps consumed-credential records durable across restarts and shared
//! between service instances.

use sg_core::errors::DomainError;

/// Cache module - Redis client and revocation store
pub mod cache;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        match error {
            InfrastructureError::Config(message) => DomainError::Configuration { message },
            InfrastructureError::Cache(e) => DomainError::Internal {
                message: format!("Revocation store unavailable: {}", e),
            },
        }
    }
}
