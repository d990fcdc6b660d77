//! Credential entities for JWT-based session tokens.

use chrono::{DateTime, Duration, SubsecRound, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default JWT issuer
pub const JWT_ISSUER: &str = "sessiongate";

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (the authenticated login)
    pub sub: String,

    /// JWT ID, the credential identifier used for revocation bookkeeping
    pub jti: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,
}

/// One issued credential
///
/// Immutable once created. Timestamps have whole-second resolution so they
/// survive the round trip through the `iat`/`exp` claims unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    /// Authenticated subject the credential asserts
    pub subject: String,

    /// Unique identifier generated at issuance
    pub id: String,

    /// Issuance time
    pub issued_at: DateTime<Utc>,

    /// Expiry time, `issued_at + validity`
    pub expires_at: DateTime<Utc>,
}

impl Credential {
    /// Creates a new credential with a fresh identifier
    ///
    /// # Arguments
    ///
    /// * `subject` - The authenticated login
    /// * `now` - Issuance time (sub-second precision is dropped)
    /// * `validity` - How long the credential is valid for
    pub fn new(subject: impl Into<String>, now: DateTime<Utc>, validity: Duration) -> Self {
        let issued_at = now.trunc_subsecs(0);
        Self {
            subject: subject.into(),
            id: Uuid::new_v4().to_string(),
            issued_at,
            expires_at: issued_at + validity,
        }
    }

    /// Rebuilds a credential from verified claims
    ///
    /// Returns `None` when a timestamp is outside the representable range.
    pub fn from_claims(claims: &Claims) -> Option<Self> {
        let issued_at = Utc.timestamp_opt(claims.iat, 0).single()?;
        let expires_at = Utc.timestamp_opt(claims.exp, 0).single()?;
        Some(Self {
            subject: claims.sub.clone(),
            id: claims.jti.clone(),
            issued_at,
            expires_at,
        })
    }

    /// Builds the JWT claims for this credential
    pub fn to_claims(&self, issuer: &str) -> Claims {
        Claims {
            sub: self.subject.clone(),
            jti: self.id.clone(),
            iat: self.issued_at.timestamp(),
            exp: self.expires_at.timestamp(),
            iss: issuer.to_string(),
        }
    }

    /// Checks if the credential has expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Last instant (exclusive) at which a refresh may succeed
    pub fn refresh_deadline(&self, grace: Duration) -> DateTime<Utc> {
        self.expires_at + grace
    }

    /// Checks if the credential is still inside its refresh window at `now`
    pub fn is_refreshable_at(&self, now: DateTime<Utc>, grace: Duration) -> bool {
        now < self.refresh_deadline(grace)
    }
}

/// Marks a credential as consumed by a refresh exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevocationRecord {
    /// Identifier of the consumed credential
    pub credential_id: String,

    /// After this instant no refresh of the credential can succeed anyway
    pub eligible_until: DateTime<Utc>,
}

impl RevocationRecord {
    /// Creates the record that revokes `credential`
    pub fn for_credential(credential: &Credential, grace: Duration) -> Self {
        Self {
            credential_id: credential.id.clone(),
            eligible_until: credential.refresh_deadline(grace),
        }
    }

    /// Whether the record still affects refresh decisions at `now`
    pub fn is_retained_at(&self, now: DateTime<Utc>) -> bool {
        now < self.eligible_until
    }
}
