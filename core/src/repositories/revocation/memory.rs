//! In-memory implementation of RevocationStore

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::errors::DomainError;

use super::r#trait::RevocationStore;

/// Process-local revocation store
///
/// Records live in a map keyed by credential id, guarded by a single lock.
/// They are lost on restart.
#[derive(Clone)]
pub struct InMemoryRevocationStore {
    records: Arc<RwLock<HashMap<String, DateTime<Utc>>>>,
}

impl InMemoryRevocationStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryRevocationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RevocationStore for InMemoryRevocationStore {
    async fn mark_consumed(
        &self,
        id: &str,
        eligible_until: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        // check and insert under one write guard
        let mut records = self.records.write().await;

        if records.contains_key(id) {
            return Ok(false);
        }

        records.insert(id.to_string(), eligible_until);
        Ok(true)
    }

    async fn is_consumed(&self, id: &str) -> Result<bool, DomainError> {
        let records = self.records.read().await;
        Ok(records.contains_key(id))
    }

    async fn sweep(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let mut records = self.records.write().await;
        let before_count = records.len();
        records.retain(|_, eligible_until| *eligible_until > now);

        let removed = before_count - records.len();
        debug!(removed, remaining = records.len(), "Swept in-memory revocation records");
        Ok(removed)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.records.read().await.len())
    }
}
