//! Unit tests for the revocation sweeper

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::repositories::InMemoryRevocationStore;
use crate::services::clock::ManualClock;
use crate::services::token::{
    RevocationSweepConfig, RevocationSweeper, TokenService, TokenServiceConfig,
};

fn epoch() -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000, 0).unwrap()
}

fn service_with_clock() -> (Arc<TokenService<InMemoryRevocationStore>>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(epoch()));
    let service = TokenService::with_clock(
        InMemoryRevocationStore::new(),
        TokenServiceConfig::default(),
        clock.clone(),
    )
    .unwrap();
    (Arc::new(service), clock)
}

#[tokio::test]
async fn test_run_sweep_removes_closed_windows() {
    let (service, clock) = service_with_clock();
    let early = service.issue("alice").unwrap();
    clock.advance(Duration::seconds(3));
    let late = service.issue("bob").unwrap();

    service.refresh(Some(&early.token)).await.unwrap();
    service.refresh(Some(&late.token)).await.unwrap();
    assert_eq!(service.tracked_revocations().await.unwrap(), 2);

    let sweeper = RevocationSweeper::new(service.clone(), RevocationSweepConfig::default());

    // early window closes at t=15, late at t=18
    clock.set(epoch() + Duration::seconds(15));
    let result = sweeper.run_sweep().await.unwrap();
    assert!(result.is_success());
    assert_eq!(result.records_removed, 1);
    assert_eq!(service.tracked_revocations().await.unwrap(), 1);

    clock.set(epoch() + Duration::seconds(18));
    let result = sweeper.run_sweep().await.unwrap();
    assert_eq!(result.records_removed, 1);
    assert_eq!(service.tracked_revocations().await.unwrap(), 0);
}

#[tokio::test]
async fn test_disabled_sweeper_does_nothing() {
    let (service, clock) = service_with_clock();
    let issued = service.issue("alice").unwrap();
    service.refresh(Some(&issued.token)).await.unwrap();

    let sweeper = RevocationSweeper::new(
        service.clone(),
        RevocationSweepConfig {
            interval_seconds: 1,
            enabled: false,
        },
    );

    clock.advance(Duration::seconds(60));
    let result = sweeper.run_sweep().await.unwrap();
    assert_eq!(result.records_removed, 0);
    assert_eq!(service.tracked_revocations().await.unwrap(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_background_task_sweeps_on_interval() {
    let (service, clock) = service_with_clock();
    let issued = service.issue("alice").unwrap();
    service.refresh(Some(&issued.token)).await.unwrap();
    clock.advance(Duration::seconds(30));

    let sweeper = Arc::new(RevocationSweeper::new(
        service.clone(),
        RevocationSweepConfig {
            interval_seconds: 5,
            enabled: true,
        },
    ));
    sweeper.start_background_task();

    tokio::time::sleep(std::time::Duration::from_secs(6)).await;

    assert_eq!(service.tracked_revocations().await.unwrap(), 0);
}

#[test]
fn test_sweep_config_from_revocation_config() {
    let mut revocation = sg_shared::config::RevocationConfig::default();
    revocation.sweep_interval_seconds = 15;
    revocation.sweep_enabled = false;

    let config = RevocationSweepConfig::from(&revocation);
    assert_eq!(config.interval_seconds, 15);
    assert!(!config.enabled);
}
