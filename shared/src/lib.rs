//! Shared utilities and common types for SessionGate server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types and loading
//! - The JSON response envelope used by every endpoint

pub mod config;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, ConfigError, Environment, JwtConfig, LoggingConfig, RedisConfig,
    RevocationBackend, RevocationConfig, ServerConfig,
};
pub use types::{ApiResponse, HealthResponse};
