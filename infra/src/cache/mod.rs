//! Cache module for Redis-backed storage
//!
//! Provides the Redis client with connection retry and the revocation store
//! built on top of it.

pub mod redis_client;
pub mod revocation_store;

#[cfg(test)]
mod tests;

pub use redis_client::RedisClient;
pub use revocation_store::RedisRevocationStore;

// Re-export commonly used types
pub use sg_shared::config::RedisConfig;
