//! Signs credentials into JWTs and verifies them.

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;

use crate::domain::entities::token::Claims;
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

/// Whether verification enforces the `exp` claim
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryCheck {
    /// Fail with [`TokenError::Expired`] when `now >= exp`
    Enforce(DateTime<Utc>),
    /// Accept expired credentials (refresh path)
    Ignore,
}

/// HMAC JWT signer
///
/// Expiry is checked against the caller-supplied time rather than the system
/// clock, so `jsonwebtoken`'s own `exp` validation is switched off.
pub struct Signer {
    issuer: String,
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl Signer {
    /// Creates a signer for a shared secret
    ///
    /// # Errors
    ///
    /// `DomainError::Configuration` when the secret is empty or the algorithm
    /// is not an HMAC algorithm.
    pub fn new(
        secret: &str,
        algorithm: Algorithm,
        issuer: impl Into<String>,
    ) -> Result<Self, DomainError> {
        if secret.is_empty() {
            return Err(DomainError::Configuration {
                message: "JWT signing secret must not be empty".to_string(),
            });
        }
        if !matches!(algorithm, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512) {
            return Err(DomainError::Configuration {
                message: format!("Unsupported JWT algorithm for shared secret: {:?}", algorithm),
            });
        }

        let issuer = issuer.into();

        let mut validation = Validation::new(algorithm);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.leeway = 0;
        validation.set_issuer(&[issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);

        Ok(Self {
            issuer,
            algorithm,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    /// Creates a signer from token service configuration
    pub fn from_config(config: &TokenServiceConfig) -> Result<Self, DomainError> {
        Self::new(&config.jwt_secret, config.algorithm, config.issuer.clone())
    }

    /// Issuer stamped on every credential
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Encodes claims into a JWT
    pub fn sign(&self, claims: &Claims) -> Result<String, DomainError> {
        encode(&Header::new(self.algorithm), claims, &self.encoding_key).map_err(|e| {
            DomainError::Internal {
                message: format!("Failed to sign credential: {}", e),
            }
        })
    }

    /// Verifies the signature of `token` and returns its claims
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - Signature valid (and not expired, if enforced)
    /// * `Err(TokenError::MalformedCredential)` - Bad signature, wrong
    ///   algorithm or issuer, missing claims, or undecodable payload
    /// * `Err(TokenError::Expired)` - Signature valid but past `exp`
    pub fn verify(&self, token: &str, expiry: ExpiryCheck) -> Result<Claims, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                debug!(reason = %e, "Rejected credential");
                TokenError::MalformedCredential
            })?
            .claims;

        if let ExpiryCheck::Enforce(now) = expiry {
            if now.timestamp() >= claims.exp {
                return Err(TokenError::Expired);
            }
        }

        Ok(claims)
    }
}
