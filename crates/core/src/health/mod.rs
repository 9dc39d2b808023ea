//! Readiness and liveness checking.
//!
//! This module provides the `ReadinessProbe` trait (Adapter Pattern),
//! the HTTP basic-auth implementation used against the backend, and the
//! bounded poll loop that distinguishes a dead child from a slow one.

pub mod base;
pub mod http;
pub mod mock;

pub use base::{HealthError, ReadinessProbe};
pub use http::HttpProbe;
pub use mock::MockProbe;

use crate::service::spawn::SpawnedService;
use std::time::Duration;
use tracing::debug;

/// Poll a probe until the service is ready or the budget is exhausted.
///
/// Each attempt first checks whether the child is still alive: a dead
/// process can never become ready, so its exit is reported immediately
/// instead of burning the remaining attempts.
///
/// # Arguments
///
/// * `spawned` - The service under startup; its child is liveness-checked
/// * `probe` - Readiness probe to poll
/// * `attempts` - Maximum number of probe attempts
/// * `interval` - Delay between attempts
///
/// # Errors
///
/// Returns `HealthError::ProcessExited` when the child dies during
/// startup, or `HealthError::TimedOut` when all attempts are used up.
pub async fn wait_for_ready(
    spawned: &mut SpawnedService,
    probe: &dyn ReadinessProbe,
    attempts: u32,
    interval: Duration,
) -> Result<(), HealthError> {
    for attempt in 1..=attempts {
        if let Ok(Some(status)) = spawned.child.try_wait() {
            return Err(HealthError::ProcessExited {
                name: spawned.service.name.clone(),
                code: status.code(),
            });
        }

        if probe.check().await {
            debug!(name = %spawned.service.name, attempt, "service ready");
            return Ok(());
        }

        tokio::time::sleep(interval).await;
    }

    Err(HealthError::TimedOut {
        name: spawned.service.name.clone(),
        attempts,
    })
}

/// Liveness check for services without a readiness endpoint.
///
/// Waits `grace` and then reports whether the child is still running.
/// Returns `Ok(())` when alive, or the exit code when it already died.
pub async fn confirm_alive(
    spawned: &mut SpawnedService,
    grace: Duration,
) -> Result<(), HealthError> {
    tokio::time::sleep(grace).await;

    if let Ok(Some(status)) = spawned.child.try_wait() {
        return Err(HealthError::ProcessExited {
            name: spawned.service.name.clone(),
            code: status.code(),
        });
    }
    Ok(())
}
