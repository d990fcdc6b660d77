//! Revocation store trait defining the interface for consumed-credential records.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::DomainError;

/// Records which credential identifiers have been consumed by a refresh
///
/// A record only matters until its `eligible_until` has passed: after that no
/// refresh of the credential can succeed regardless of revocation state, so
/// implementations may drop it. They must never drop it earlier.
///
/// # Concurrency
/// [`mark_consumed`](RevocationStore::mark_consumed) is the single critical
/// section of the refresh exchange. For any given `id`, concurrent callers must
/// observe exactly one `true`.
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Atomically record `id` as consumed unless it already is
    ///
    /// # Arguments
    /// * `id` - Credential identifier
    /// * `eligible_until` - When the record stops mattering
    ///
    /// # Returns
    /// * `Ok(true)` - This call created the record
    /// * `Ok(false)` - The identifier was already consumed; nothing changed
    /// * `Err(DomainError)` - Backend failure
    ///
    /// # Example
    /// ```no_run
    /// # use chrono::Utc;
    /// # use sg_core::repositories::RevocationStore;
    /// # async fn example(store: &impl RevocationStore) -> Result<(), Box<dyn std::error::Error>> {
    /// let eligible_until = Utc::now() + chrono::Duration::seconds(10);
    ///
    /// if store.mark_consumed("3f1c...", eligible_until).await? {
    ///     println!("first refresh of this credential");
    /// } else {
    ///     println!("replay");
    /// }
    /// # Ok(())
    /// # }
    /// ```
    async fn mark_consumed(
        &self,
        id: &str,
        eligible_until: DateTime<Utc>,
    ) -> Result<bool, DomainError>;

    /// Check whether `id` has been consumed
    async fn is_consumed(&self, id: &str) -> Result<bool, DomainError>;

    /// Remove every record whose `eligible_until <= now`
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of records removed
    async fn sweep(&self, now: DateTime<Utc>) -> Result<usize, DomainError>;

    /// Number of records currently retained
    async fn count(&self) -> Result<usize, DomainError>;
}
