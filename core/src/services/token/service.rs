//! Main token service implementation

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::entities::token::{Credential, RevocationRecord};
use crate::domain::value_objects::IssuedCredential;
use crate::errors::{DomainError, TokenError};
use crate::repositories::RevocationStore;
use crate::services::clock::{Clock, SystemClock};

use super::config::TokenServiceConfig;
use super::signer::{ExpiryCheck, Signer};

/// Issues, verifies and refreshes credentials
///
/// The service is the only owner of its revocation store; everything that
/// touches consumed-credential records goes through it.
pub struct TokenService<S: RevocationStore> {
    store: S,
    signer: Signer,
    clock: Arc<dyn Clock>,
    config: TokenServiceConfig,
}

impl<S: RevocationStore> TokenService<S> {
    /// Creates a new token service reading the system clock
    ///
    /// # Arguments
    ///
    /// * `store` - Revocation store for consumed credentials
    /// * `config` - Token service configuration
    ///
    /// # Returns
    ///
    /// A new `TokenService` instance or a configuration error if the signing
    /// key or algorithm is unusable
    pub fn new(store: S, config: TokenServiceConfig) -> Result<Self, DomainError> {
        Self::with_clock(store, config, Arc::new(SystemClock))
    }

    /// Creates a new token service with an explicit clock
    pub fn with_clock(
        store: S,
        config: TokenServiceConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, DomainError> {
        config.validate()?;
        let signer = Signer::from_config(&config)?;

        Ok(Self {
            store,
            signer,
            clock,
            config,
        })
    }

    /// Service configuration
    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    /// Issues a new credential for an already-authenticated subject
    ///
    /// # Arguments
    ///
    /// * `subject` - Non-empty login identifier
    ///
    /// # Returns
    ///
    /// * `Ok(IssuedCredential)` - Signed token plus validity and grace durations
    /// * `Err(DomainError::Validation)` - Empty subject
    pub fn issue(&self, subject: &str) -> Result<IssuedCredential, DomainError> {
        if subject.trim().is_empty() {
            return Err(DomainError::Validation {
                message: "Subject must not be empty".to_string(),
            });
        }

        let credential = Credential::new(subject, self.clock.now(), self.config.validity);
        let token = self.signer.sign(&credential.to_claims(self.signer.issuer()))?;

        info!(
            subject = %credential.subject,
            expires_at = %credential.expires_at,
            "Issued credential"
        );

        Ok(IssuedCredential {
            token,
            credential,
            validity: self.config.validity,
            refresh_grace: self.config.refresh_grace,
        })
    }

    /// Verifies a credential and returns its subject
    ///
    /// No grace period applies; this is the strict check used to gate
    /// protected operations.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The subject
    /// * `Err(TokenError::MissingCredential)` - No token supplied
    /// * `Err(TokenError::MalformedCredential)` - Signature or payload invalid
    /// * `Err(TokenError::Expired)` - Past `expires_at`
    pub fn verify(&self, token: Option<&str>) -> Result<String, DomainError> {
        self.verify_credential(token).map(|credential| credential.subject)
    }

    /// Verifies a credential and returns all of its fields
    pub fn verify_credential(&self, token: Option<&str>) -> Result<Credential, DomainError> {
        let now = self.clock.now();
        self.decode(token, ExpiryCheck::Enforce(now)).map_err(|e| {
            debug!(error = e.code(), "Credential verification failed");
            DomainError::Token(e)
        })
    }

    /// Exchanges a (typically expired) credential for a new one
    ///
    /// At most one refresh ever succeeds per issued credential. The old
    /// credential is recorded as consumed before the new one is returned.
    ///
    /// # Returns
    ///
    /// * `Ok(IssuedCredential)` - A brand-new credential for the same subject
    /// * `Err(TokenError::MissingCredential)` - No token supplied
    /// * `Err(TokenError::MalformedCredential)` - Signature or payload invalid
    /// * `Err(TokenError::AlreadyRefreshed)` - Credential already exchanged
    /// * `Err(TokenError::RefreshWindowExpired)` - Past `expires_at + grace`
    pub async fn refresh(&self, token: Option<&str>) -> Result<IssuedCredential, DomainError> {
        let credential = self.decode(token, ExpiryCheck::Ignore)?;
        let now = self.clock.now();

        if self.store.is_consumed(&credential.id).await? {
            warn!(subject = %credential.subject, "Rejected refresh of already refreshed credential");
            return Err(TokenError::AlreadyRefreshed.into());
        }

        if !credential.is_refreshable_at(now, self.config.refresh_grace) {
            warn!(
                subject = %credential.subject,
                deadline = %credential.refresh_deadline(self.config.refresh_grace),
                "Rejected refresh outside grace window"
            );
            return Err(TokenError::RefreshWindowExpired.into());
        }

        let record = RevocationRecord::for_credential(&credential, self.config.refresh_grace);
        if !self
            .store
            .mark_consumed(&record.credential_id, record.eligible_until)
            .await?
        {
            // another refresh of the same credential won the race
            warn!(subject = %credential.subject, "Rejected concurrent refresh of credential");
            return Err(TokenError::AlreadyRefreshed.into());
        }

        self.issue(&credential.subject)
    }

    /// Drops revocation records that can no longer affect a refresh
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of records removed
    pub async fn sweep_revocations(&self) -> Result<usize, DomainError> {
        self.store.sweep(self.clock.now()).await
    }

    /// Number of revocation records currently retained
    pub async fn tracked_revocations(&self) -> Result<usize, DomainError> {
        self.store.count().await
    }

    /// Checks presence and signature, returning the credential
    fn decode(&self, token: Option<&str>, expiry: ExpiryCheck) -> Result<Credential, TokenError> {
        let token = token
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(TokenError::MissingCredential)?;

        let claims = self.signer.verify(token, expiry)?;
        Credential::from_claims(&claims).ok_or(TokenError::MalformedCredential)
    }
}
