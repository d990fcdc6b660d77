//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - Credential signing secret, algorithm and lifetimes
//! - `environment` - Environment detection and logging configuration
//! - `revocation` - Revocation store backend and sweeping
//! - `server` - HTTP server bind configuration
//!
//! [`AppConfig::from_env`] layers built-in defaults, structured environment
//! variables (`JWT__SECRET`, `SERVER__PORT`, `REVOCATION__BACKEND`, ...) and
//! the flat legacy names (`JWT_TOKEN_EXPIRES`, `JWT_TOKEN_REFRESH`,
//! `JWT_PRIVATE_KEY`, `SERVER_HOST`, `SERVER_PORT`), later layers winning.

pub mod auth;
pub mod environment;
pub mod revocation;
pub mod server;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export commonly used types
pub use auth::{JwtConfig, MAX_LIFETIME_SECONDS};
pub use environment::{Environment, LoggingConfig};
pub use revocation::{RedisConfig, RevocationBackend, RevocationConfig};
pub use server::ServerConfig;

/// Flat variable names that override the structured keys
const LEGACY_OVERRIDES: &[(&str, &str)] = &[
    ("JWT_TOKEN_EXPIRES", "jwt.token_expiry"),
    ("JWT_TOKEN_REFRESH", "jwt.refresh_grace"),
    ("JWT_PRIVATE_KEY", "jwt.secret"),
    ("SERVER_HOST", "server.host"),
    ("SERVER_PORT", "server.port"),
    ("REDIS_URL", "revocation.redis.url"),
    ("RUST_LOG", "logging.level"),
];

/// Configuration loading or validation failure
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Credential configuration
    pub jwt: JwtConfig,

    /// Revocation store configuration
    #[serde(default)]
    pub revocation: RevocationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            jwt: JwtConfig::default(),
            revocation: RevocationConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars().collect())
    }

    /// Load configuration from an explicit variable map
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        let environment = vars
            .get("ENVIRONMENT")
            .or_else(|| vars.get("RUST_ENV"))
            .and_then(|value| value.parse::<Environment>().ok())
            .unwrap_or_default();

        let server = ServerConfig::default();
        let jwt = JwtConfig::default();
        let revocation = RevocationConfig::default();
        let logging = LoggingConfig::for_environment(environment);

        let mut builder = config::Config::builder()
            .set_default("environment", environment.to_string())?
            .set_default("server.host", server.host)?
            .set_default("server.port", i64::from(server.port))?
            .set_default("server.workers", server.workers as i64)?
            .set_default("jwt.secret", jwt.secret)?
            .set_default("jwt.token_expiry", jwt.token_expiry)?
            .set_default("jwt.refresh_grace", jwt.refresh_grace)?
            .set_default("jwt.issuer", jwt.issuer)?
            .set_default("jwt.algorithm", jwt.algorithm)?
            .set_default("revocation.backend", revocation.backend.to_string())?
            .set_default(
                "revocation.sweep_interval_seconds",
                revocation.sweep_interval_seconds as i64,
            )?
            .set_default("revocation.sweep_enabled", revocation.sweep_enabled)?
            .set_default("revocation.redis.url", revocation.redis.url)?
            .set_default("revocation.redis.key_prefix", revocation.redis.key_prefix)?
            .set_default("revocation.redis.max_retries", i64::from(revocation.redis.max_retries))?
            .set_default(
                "revocation.redis.retry_delay_ms",
                revocation.redis.retry_delay_ms as i64,
            )?
            .set_default("logging.level", logging.level)?
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .source(Some(vars.clone())),
            )
            .set_override("environment", environment.to_string())?;

        for (variable, key) in LEGACY_OVERRIDES {
            builder = builder.set_override_option(*key, vars.get(*variable).cloned())?;
        }

        let config: AppConfig = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Check the loaded values for combinations the service cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(ConfigError::Invalid("JWT secret must not be empty".to_string()));
        }
        if self.environment.is_production() && self.jwt.is_using_default_secret() {
            return Err(ConfigError::Invalid(
                "JWT secret must be set explicitly in production".to_string(),
            ));
        }
        if self.jwt.token_expiry <= 0 {
            return Err(ConfigError::Invalid(
                "JWT token expiry must be greater than 0".to_string(),
            ));
        }
        if self.jwt.refresh_grace < 0 {
            return Err(ConfigError::Invalid(
                "JWT refresh grace must not be negative".to_string(),
            ));
        }
        if self.jwt.token_expiry > MAX_LIFETIME_SECONDS {
            return Err(ConfigError::Invalid(format!(
                "JWT token expiry must not exceed {} seconds",
                MAX_LIFETIME_SECONDS
            )));
        }
        if self.jwt.refresh_grace > MAX_LIFETIME_SECONDS {
            return Err(ConfigError::Invalid(format!(
                "JWT refresh grace must not exceed {} seconds",
                MAX_LIFETIME_SECONDS
            )));
        }
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("Server port must be greater than 0".to_string()));
        }
        if self.revocation.sweep_enabled && self.revocation.sweep_interval_seconds == 0 {
            return Err(ConfigError::Invalid(
                "Sweep interval must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_without_variables() {
        let config = AppConfig::from_vars(HashMap::new()).unwrap();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.server.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.jwt.token_expiry, 5);
        assert_eq!(config.jwt.refresh_grace, 10);
        assert_eq!(config.revocation.backend, RevocationBackend::Memory);
        assert_eq!(config.logging.level, "debug");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_legacy_variables_override() {
        let config = AppConfig::from_vars(vars(&[
            ("JWT_TOKEN_EXPIRES", "30"),
            ("JWT_TOKEN_REFRESH", "120"),
            ("JWT_PRIVATE_KEY", "legacy-secret"),
            ("SERVER_PORT", "8081"),
        ]))
        .unwrap();

        assert_eq!(config.jwt.token_expiry, 30);
        assert_eq!(config.jwt.refresh_grace, 120);
        assert_eq!(config.jwt.secret, "legacy-secret");
        assert_eq!(config.server.port, 8081);
    }

    #[test]
    fn test_structured_variables() {
        let config = AppConfig::from_vars(vars(&[
            ("JWT__SECRET", "structured-secret"),
            ("REVOCATION__BACKEND", "redis"),
            ("REVOCATION__REDIS__URL", "redis://cache:6379"),
        ]))
        .unwrap();

        assert_eq!(config.jwt.secret, "structured-secret");
        assert_eq!(config.revocation.backend, RevocationBackend::Redis);
        assert_eq!(config.revocation.redis.url, "redis://cache:6379");
    }

    #[test]
    fn test_legacy_name_wins_over_structured() {
        let config = AppConfig::from_vars(vars(&[
            ("JWT__SECRET", "structured-secret"),
            ("JWT_PRIVATE_KEY", "legacy-secret"),
        ]))
        .unwrap();

        assert_eq!(config.jwt.secret, "legacy-secret");
    }

    #[test]
    fn test_production_rejects_default_secret() {
        let config = AppConfig::from_vars(vars(&[("ENVIRONMENT", "production")])).unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_bad_lifetimes() {
        let mut config = AppConfig::default();
        config.jwt.token_expiry = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.jwt.refresh_grace = -1;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.jwt.secret = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_oversized_lifetimes() {
        let mut config = AppConfig::default();
        config.jwt.token_expiry = 10_000_000_000_000;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = AppConfig::default();
        config.jwt.token_expiry = i64::MAX;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.jwt.refresh_grace = MAX_LIFETIME_SECONDS + 1;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.jwt.token_expiry = MAX_LIFETIME_SECONDS;
        config.jwt.refresh_grace = MAX_LIFETIME_SECONDS;
        assert!(config.validate().is_ok());
    }
}
