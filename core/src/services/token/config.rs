//! Configuration for the token service

use chrono::Duration;
use jsonwebtoken::Algorithm;
use sg_shared::config::auth::DEFAULT_JWT_SECRET;
use sg_shared::config::{JwtConfig, MAX_LIFETIME_SECONDS};

use crate::domain::entities::token::JWT_ISSUER;
use crate::errors::DomainError;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// JWT signing algorithm
    pub algorithm: Algorithm,
    /// Issuer written into and required on every credential
    pub issuer: String,
    /// How long an issued credential is valid
    pub validity: Duration,
    /// How long after expiry a credential may still be refreshed
    pub refresh_grace: Duration,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            algorithm: Algorithm::HS256,
            issuer: JWT_ISSUER.to_string(),
            validity: Duration::seconds(5),
            refresh_grace: Duration::seconds(10),
        }
    }
}

impl TokenServiceConfig {
    /// Build from the loaded application configuration
    ///
    /// Fails when the algorithm name cannot be parsed or a lifetime is out
    /// of range.
    pub fn from_jwt_config(jwt: &JwtConfig) -> Result<Self, DomainError> {
        let algorithm = jwt
            .algorithm
            .parse::<Algorithm>()
            .map_err(|_| DomainError::Configuration {
                message: format!("Unknown JWT algorithm: {}", jwt.algorithm),
            })?;

        let config = Self {
            jwt_secret: jwt.secret.clone(),
            algorithm,
            issuer: jwt.issuer.clone(),
            validity: lifetime("token expiry", jwt.token_expiry)?,
            refresh_grace: lifetime("refresh grace", jwt.refresh_grace)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that both lifetimes are in range
    ///
    /// Validity must be positive, grace non-negative, and neither may exceed
    /// [`MAX_LIFETIME_SECONDS`], so expiry and refresh deadlines always fit.
    pub fn validate(&self) -> Result<(), DomainError> {
        let max = Duration::seconds(MAX_LIFETIME_SECONDS);

        if self.validity <= Duration::zero() || self.validity > max {
            return Err(DomainError::Configuration {
                message: format!(
                    "Token validity must be between 1 and {} seconds",
                    MAX_LIFETIME_SECONDS
                ),
            });
        }
        if self.refresh_grace < Duration::zero() || self.refresh_grace > max {
            return Err(DomainError::Configuration {
                message: format!(
                    "Refresh grace must be between 0 and {} seconds",
                    MAX_LIFETIME_SECONDS
                ),
            });
        }
        Ok(())
    }
}

fn lifetime(name: &str, seconds: i64) -> Result<Duration, DomainError> {
    Duration::try_seconds(seconds).ok_or_else(|| DomainError::Configuration {
        message: format!("JWT {} of {} seconds is out of range", name, seconds),
    })
}
