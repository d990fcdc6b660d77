//! Redis cache client implementation
//!
//! Thin wrapper over a multiplexed Redis connection with connect-time retry,
//! exponential backoff for idempotent commands, and the handful of commands
//! the revocation store needs: conditional set with absolute expiry,
//! existence checks and prefix counting.

use redis::{aio::MultiplexedConnection, AsyncCommands, Client, RedisError, RedisResult};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use sg_shared::config::RedisConfig;

use crate::InfrastructureError;

/// Keys fetched per SCAN round trip
const SCAN_BATCH: usize = 100;

/// Upper bound for the backoff delay in milliseconds
const MAX_BACKOFF_MS: u64 = 5000;

/// Redis client with connection retry logic
///
/// Cloning is cheap; all clones share the same multiplexed connection.
#[derive(Clone)]
pub struct RedisClient {
    /// Redis multiplexed connection for async operations
    connection: MultiplexedConnection,
    /// Maximum number of attempts for connecting and idempotent operations
    max_retries: u32,
    /// Base delay between retries (exponential backoff)
    retry_delay_ms: u64,
}

impl RedisClient {
    /// Connect to Redis using the given configuration
    ///
    /// # Arguments
    /// * `config` - Redis URL and retry settings
    ///
    /// # Returns
    /// * `Result<Self, InfrastructureError>` - Connected client, a config
    ///   error for an unparsable URL, or the last connection error
    ///
    /// # Example
    /// ```no_run
    /// use sg_infra::cache::{RedisClient, RedisConfig};
    ///
    /// async fn connect() -> Result<RedisClient, Box<dyn std::error::Error>> {
    ///     let client = RedisClient::new(&RedisConfig::new("redis://localhost:6379")).await?;
    ///     Ok(client)
    /// }
    /// ```
    pub async fn new(config: &RedisConfig) -> Result<Self, InfrastructureError> {
        info!("Creating Redis client with URL: {}", mask_url(&config.url));

        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let max_retries = config.max_retries.max(1);
        let connection =
            Self::create_connection_with_retry(client, max_retries, config.retry_delay_ms).await?;

        info!("Redis client created successfully");

        Ok(Self {
            connection,
            max_retries,
            retry_delay_ms: config.retry_delay_ms,
        })
    }

    /// Create multiplexed connection with retry logic
    async fn create_connection_with_retry(
        client: Client,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = retry_delay_ms;

        loop {
            attempts += 1;
            debug!("Attempting to connect to Redis (attempt {})", attempts);

            match client.get_multiplexed_async_connection().await {
                Ok(connection) => {
                    info!("Successfully connected to Redis");
                    return Ok(connection);
                }
                Err(e) if attempts < max_retries => {
                    warn!(
                        "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(MAX_BACKOFF_MS);
                }
                Err(e) => {
                    error!("Failed to connect to Redis after {} attempts: {}", attempts, e);
                    return Err(InfrastructureError::Cache(e));
                }
            }
        }
    }

    /// Set `key` only if it does not exist, expiring at a unix timestamp
    ///
    /// Issues `SET key value NX EXAT unix_seconds` (Redis 6.2+).
    ///
    /// # Returns
    /// * `Ok(true)` - The key was created by this call
    /// * `Ok(false)` - The key already existed
    pub async fn set_if_absent_until(
        &self,
        key: &str,
        value: &str,
        expire_at_unix: i64,
    ) -> Result<bool, InfrastructureError> {
        debug!("Setting key '{}' if absent, expiring at {}", key, expire_at_unix);

        // not retried: a lost reply would turn the first writer into a loser
        let mut conn = self.connection.clone();
        let reply: RedisResult<Option<String>> = redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("NX")
            .arg("EXAT")
            .arg(expire_at_unix)
            .query_async(&mut conn)
            .await;

        match reply {
            Ok(created) => {
                let created = created.is_some();
                debug!("Key '{}' created: {}", key, created);
                Ok(created)
            }
            Err(e) => {
                error!("Failed to set key '{}': {}", key, e);
                Err(InfrastructureError::Cache(e))
            }
        }
    }

    /// Check if a key exists
    pub async fn exists(&self, key: &str) -> Result<bool, InfrastructureError> {
        debug!("Checking if key '{}' exists", key);

        let result = self
            .execute_with_retry(|mut conn| {
                let key = key.to_string();

                Box::pin(async move { conn.exists::<_, bool>(key).await })
            })
            .await;

        match result {
            Ok(exists) => {
                debug!("Key '{}' exists: {}", key, exists);
                Ok(exists)
            }
            Err(e) => {
                error!("Failed to check key '{}' existence: {}", key, e);
                Err(InfrastructureError::Cache(e))
            }
        }
    }

    /// Count keys starting with `prefix`
    ///
    /// Walks the keyspace with `SCAN ... MATCH prefix*` so the server is never
    /// blocked the way `KEYS` would.
    pub async fn count_with_prefix(&self, prefix: &str) -> Result<usize, InfrastructureError> {
        let pattern = format!("{}*", prefix);
        debug!("Counting keys matching '{}'", pattern);

        let mut cursor: u64 = 0;
        let mut total = 0;

        loop {
            let result = self
                .execute_with_retry(|mut conn| {
                    let pattern = pattern.clone();

                    Box::pin(async move {
                        redis::cmd("SCAN")
                            .arg(cursor)
                            .arg("MATCH")
                            .arg(pattern)
                            .arg("COUNT")
                            .arg(SCAN_BATCH)
                            .query_async::<_, (u64, Vec<String>)>(&mut conn)
                            .await
                    })
                })
                .await;

            match result {
                Ok((next, keys)) => {
                    total += keys.len();
                    if next == 0 {
                        debug!("Found {} keys matching '{}'", total, pattern);
                        return Ok(total);
                    }
                    cursor = next;
                }
                Err(e) => {
                    error!("Failed to scan keys matching '{}': {}", pattern, e);
                    return Err(InfrastructureError::Cache(e));
                }
            }
        }
    }

    /// Check if the Redis connection is healthy
    ///
    /// Performs a PING command to verify connectivity.
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        debug!("Performing Redis health check");

        let result = self
            .execute_with_retry(|mut conn| {
                Box::pin(async move { redis::cmd("PING").query_async::<_, String>(&mut conn).await })
            })
            .await;

        match result {
            Ok(response) if response == "PONG" => {
                debug!("Redis health check passed");
                Ok(true)
            }
            Ok(response) => {
                warn!("Redis health check returned unexpected response: {}", response);
                Ok(false)
            }
            Err(e) => {
                error!("Redis health check failed: {}", e);
                Err(InfrastructureError::Cache(e))
            }
        }
    }

    /// Execute an idempotent Redis operation with automatic retry
    async fn execute_with_retry<F, T>(&self, operation: F) -> RedisResult<T>
    where
        F: Fn(
            MultiplexedConnection,
        ) -> std::pin::Pin<Box<dyn std::future::Future<Output = RedisResult<T>> + Send>>,
    {
        let mut attempts = 0;
        let mut delay = self.retry_delay_ms;

        loop {
            attempts += 1;
            let conn = self.connection.clone();

            match operation(conn).await {
                Ok(result) => return Ok(result),
                Err(e) if attempts < self.max_retries && is_retriable_error(&e) => {
                    warn!(
                        "Redis operation failed (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, self.max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(MAX_BACKOFF_MS);
                }
                Err(e) => {
                    error!("Redis operation failed after {} attempts: {}", attempts, e);
                    return Err(e);
                }
            }
        }
    }
}

/// Check if a Redis error is transient and the operation should be retried
pub(crate) fn is_retriable_error(error: &RedisError) -> bool {
    matches!(
        error.kind(),
        redis::ErrorKind::IoError
            | redis::ErrorKind::ClientError
            | redis::ErrorKind::BusyLoadingError
            | redis::ErrorKind::TryAgain
    )
}

/// Mask credentials in a Redis URL for logging
pub(crate) fn mask_url(url: &str) -> String {
    if let Some(at_pos) = url.rfind('@') {
        if let Some(proto_end) = url.find("://") {
            let proto = &url[..proto_end + 3];
            let host_part = &url[at_pos..];
            return format!("{}****{}", proto, host_part);
        }
    }
    url.to_string()
}
