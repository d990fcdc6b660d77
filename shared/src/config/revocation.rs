//! Revocation store configuration module

use serde::{Deserialize, Serialize};

/// Where consumed-credential records are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RevocationBackend {
    /// Process-local map; records are lost on restart
    Memory,
    /// Redis keys with server-side expiry
    Redis,
}

impl Default for RevocationBackend {
    fn default() -> Self {
        RevocationBackend::Memory
    }
}

impl std::fmt::Display for RevocationBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RevocationBackend::Memory => write!(f, "memory"),
            RevocationBackend::Redis => write!(f, "redis"),
        }
    }
}

/// Redis connection configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RedisConfig {
    /// Redis connection URL
    pub url: String,

    /// Prefix for revocation record keys
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,

    /// Connection attempts before giving up
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base delay between connection attempts in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://localhost:6379"),
            key_prefix: default_key_prefix(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl RedisConfig {
    /// Create a Redis configuration for the given URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}

/// Revocation bookkeeping configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RevocationConfig {
    /// Storage backend
    #[serde(default)]
    pub backend: RevocationBackend,

    /// How often the sweeper runs (in seconds)
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,

    /// Whether the background sweeper runs at all
    #[serde(default = "default_sweep_enabled")]
    pub sweep_enabled: bool,

    /// Redis settings, used when `backend` is `redis`
    #[serde(default)]
    pub redis: RedisConfig,
}

impl Default for RevocationConfig {
    fn default() -> Self {
        Self {
            backend: RevocationBackend::default(),
            sweep_interval_seconds: default_sweep_interval(),
            sweep_enabled: default_sweep_enabled(),
            redis: RedisConfig::default(),
        }
    }
}

fn default_key_prefix() -> String {
    String::from("sessiongate:revoked:")
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    100
}

fn default_sweep_interval() -> u64 {
    60
}

fn default_sweep_enabled() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revocation_config_default() {
        let config = RevocationConfig::default();
        assert_eq!(config.backend, RevocationBackend::Memory);
        assert_eq!(config.sweep_interval_seconds, 60);
        assert!(config.sweep_enabled);
        assert_eq!(config.redis.key_prefix, "sessiongate:revoked:");
    }

    #[test]
    fn test_backend_deserializes_lowercase() {
        let backend: RevocationBackend = serde_json::from_str("\"redis\"").unwrap();
        assert_eq!(backend, RevocationBackend::Redis);
        assert_eq!(backend.to_string(), "redis");
    }
}
