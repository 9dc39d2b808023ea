//! Service state machine implementation.
//!
//! This module provides functions for transitioning a `Service` through
//! its lifecycle, emitting a `LaunchEvent` for every transition.

use crate::events::LaunchEvent;
use crate::service::models::{Service, ServiceStatus};
use tokio::sync::mpsc::Sender;

/// Record a successful spawn: store the pid and transition to Starting.
///
/// # Arguments
///
/// * `service` - The service that was spawned
/// * `pid` - OS process id of the new child
/// * `events_tx` - Channel to send lifecycle events
pub async fn mark_spawned(service: &mut Service, pid: u32, events_tx: &Sender<LaunchEvent>) {
    service.pid = Some(pid);
    service.status = ServiceStatus::Starting;
    let _ = events_tx
        .send(LaunchEvent::ServiceSpawned {
            service_id: service.id,
            name: service.name.clone(),
            pid,
        })
        .await;
}

/// Transition to Ready after the readiness probe succeeded.
pub async fn mark_ready(service: &mut Service, url: String, events_tx: &Sender<LaunchEvent>) {
    service.status = ServiceStatus::Ready;
    let _ = events_tx
        .send(LaunchEvent::ServiceReady {
            service_id: service.id,
            name: service.name.clone(),
            url,
        })
        .await;
}

/// Transition to Running after the liveness grace period.
///
/// Used for services without a readiness endpoint.
pub async fn mark_running(service: &mut Service, events_tx: &Sender<LaunchEvent>) {
    service.status = ServiceStatus::Running;
    let _ = events_tx
        .send(LaunchEvent::ServiceRunning {
            service_id: service.id,
            name: service.name.clone(),
        })
        .await;
}

/// Record a child exit and transition to Stopped.
pub async fn mark_exited(service: &mut Service, code: Option<i32>, events_tx: &Sender<LaunchEvent>) {
    service.status = ServiceStatus::Stopped;
    let _ = events_tx
        .send(LaunchEvent::ServiceExited {
            service_id: service.id,
            name: service.name.clone(),
            code,
        })
        .await;
}

/// Record a startup failure and transition to Failed.
pub async fn mark_failed(service: &mut Service, error: String, events_tx: &Sender<LaunchEvent>) {
    service.status = ServiceStatus::Failed;
    let _ = events_tx
        .send(LaunchEvent::ServiceFailed {
            service_id: service.id,
            name: service.name.clone(),
            error,
        })
        .await;
}
