//! Periodic sweeping of revocation records
//!
//! Records are only needed until their credential's refresh window closes.
//! The sweeper drops them afterwards so the store stays bounded.

use std::sync::Arc;
use tracing::{error, info, warn};

use sg_shared::config::RevocationConfig;

use crate::errors::DomainError;
use crate::repositories::RevocationStore;

use super::service::TokenService;

/// Configuration for the revocation sweeper
#[derive(Debug, Clone)]
pub struct RevocationSweepConfig {
    /// How often to run a sweep (in seconds)
    pub interval_seconds: u64,
    /// Whether to enable automatic sweeping
    pub enabled: bool,
}

impl Default for RevocationSweepConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 60,
            enabled: true,
        }
    }
}

impl From<&RevocationConfig> for RevocationSweepConfig {
    fn from(config: &RevocationConfig) -> Self {
        Self {
            interval_seconds: config.sweep_interval_seconds,
            enabled: config.sweep_enabled,
        }
    }
}

/// Removes revocation records whose refresh window has closed
pub struct RevocationSweeper<S: RevocationStore + 'static> {
    service: Arc<TokenService<S>>,
    config: RevocationSweepConfig,
}

impl<S: RevocationStore> RevocationSweeper<S> {
    /// Create a new sweeper for the service's store
    pub fn new(service: Arc<TokenService<S>>, config: RevocationSweepConfig) -> Self {
        Self { service, config }
    }

    /// Run a single sweep cycle
    ///
    /// # Returns
    /// * `Ok(SweepResult)` - Summary of the cycle; backend failures are
    ///   collected in `errors` rather than returned
    pub async fn run_sweep(&self) -> Result<SweepResult, DomainError> {
        if !self.config.enabled {
            return Ok(SweepResult::default());
        }

        let mut result = SweepResult::default();

        match self.service.sweep_revocations().await {
            Ok(count) => {
                result.records_removed = count;
                info!("Swept {} expired revocation records", count);
            }
            Err(e) => {
                error!("Failed to sweep revocation records: {}", e);
                result.errors.push(format!("Revocation sweep error: {}", e));
            }
        }

        Ok(result)
    }

    /// Start the sweeper as a background task
    ///
    /// This spawns a tokio task that sweeps at regular intervals
    pub fn start_background_task(self: Arc<Self>) {
        if !self.config.enabled {
            warn!("Revocation sweeper is disabled");
            return;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds);

        tokio::spawn(async move {
            info!(
                "Revocation sweeper started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                match self.run_sweep().await {
                    Ok(result) => {
                        if !result.errors.is_empty() {
                            warn!("Sweep completed with errors: {:?}", result.errors);
                        }
                    }
                    Err(e) => {
                        error!("Revocation sweep cycle failed: {}", e);
                    }
                }
            }
        });
    }
}

/// Result of a sweep cycle
#[derive(Debug, Default)]
pub struct SweepResult {
    /// Number of revocation records removed
    pub records_removed: usize,
    /// Any errors encountered during the sweep
    pub errors: Vec<String>,
}

impl SweepResult {
    /// Check if the sweep was successful (no errors)
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}
