//! Redis-backed revocation store
//!
//! Each consumed credential becomes one key, `<prefix><credential id>`, that
//! Redis expires on its own at the end of the credential's refresh window.
//! Records therefore survive restarts and are shared by every instance
//! pointing at the same Redis.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use sg_core::errors::DomainError;
use sg_core::repositories::RevocationStore;
use sg_shared::config::RedisConfig;

use super::redis_client::RedisClient;
use crate::InfrastructureError;

/// Value stored under every revocation key
const CONSUMED_MARKER: &str = "1";

/// Revocation store keeping records in Redis
#[derive(Clone)]
pub struct RedisRevocationStore {
    client: RedisClient,
    key_prefix: String,
}

impl RedisRevocationStore {
    /// Create a store on top of an existing client
    pub fn new(client: RedisClient, key_prefix: impl Into<String>) -> Self {
        Self {
            client,
            key_prefix: key_prefix.into(),
        }
    }

    /// Connect to Redis and create the store
    pub async fn connect(config: &RedisConfig) -> Result<Self, InfrastructureError> {
        let client = RedisClient::new(config).await?;
        info!(prefix = %config.key_prefix, "Redis revocation store ready");
        Ok(Self::new(client, config.key_prefix.clone()))
    }

    /// Underlying client, for health checks
    pub fn client(&self) -> &RedisClient {
        &self.client
    }

    fn key(&self, credential_id: &str) -> String {
        revocation_key(&self.key_prefix, credential_id)
    }
}

#[async_trait]
impl RevocationStore for RedisRevocationStore {
    async fn mark_consumed(
        &self,
        id: &str,
        eligible_until: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let created = self
            .client
            .set_if_absent_until(&self.key(id), CONSUMED_MARKER, eligible_until.timestamp())
            .await?;
        Ok(created)
    }

    async fn is_consumed(&self, id: &str) -> Result<bool, DomainError> {
        Ok(self.client.exists(&self.key(id)).await?)
    }

    async fn sweep(&self, _now: DateTime<Utc>) -> Result<usize, DomainError> {
        // keys carry their own EXAT expiry
        debug!("Skipping sweep, Redis expires revocation keys itself");
        Ok(0)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.client.count_with_prefix(&self.key_prefix).await?)
    }
}

/// Build the Redis key for a consumed credential
pub(crate) fn revocation_key(prefix: &str, credential_id: &str) -> String {
    format!("{}{}", prefix, credential_id)
}
