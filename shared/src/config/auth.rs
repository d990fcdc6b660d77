//! Credential signing and lifetime configuration

use serde::{Deserialize, Serialize};

/// Development-only signing secret
pub const DEFAULT_JWT_SECRET: &str = "private-key";

/// Upper bound for `token_expiry` and `refresh_grace` (ten years)
pub const MAX_LIFETIME_SECONDS: i64 = 10 * 365 * 24 * 60 * 60;

/// JWT credential configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Shared secret used to sign credentials
    pub secret: String,

    /// Credential validity in seconds
    pub token_expiry: i64,

    /// Seconds after expiry during which a credential may still be refreshed
    pub refresh_grace: i64,

    /// JWT issuer claim
    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// Algorithm for JWT signing (default: HS256)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_JWT_SECRET),
            token_expiry: 5,
            refresh_grace: 10,
            issuer: default_issuer(),
            algorithm: default_algorithm(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set credential validity in seconds
    pub fn with_token_expiry(mut self, seconds: i64) -> Self {
        self.token_expiry = seconds;
        self
    }

    /// Set the refresh grace window in seconds
    pub fn with_refresh_grace(mut self, seconds: i64) -> Self {
        self.refresh_grace = seconds;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_JWT_SECRET
    }
}

pub(crate) fn default_issuer() -> String {
    String::from("sessiongate")
}

pub(crate) fn default_algorithm() -> String {
    String::from("HS256")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.token_expiry, 5);
        assert_eq!(config.refresh_grace, 10);
        assert_eq!(config.algorithm, "HS256");
        assert_eq!(config.issuer, "sessiongate");
        assert!(config.is_using_default_secret());
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("my-secret")
            .with_token_expiry(300)
            .with_refresh_grace(600);

        assert_eq!(config.token_expiry, 300);
        assert_eq!(config.refresh_grace, 600);
        assert!(!config.is_using_default_secret());
    }
}
