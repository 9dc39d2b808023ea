//! Supervisor for all spawned children.
//!
//! The supervisor owns every `Child` handle the launch produced. It can
//! wait for exits one at a time and terminate the remaining children
//! gracefully: SIGTERM first, SIGKILL after the grace period.

use crate::events::LaunchEvent;
use crate::port::kill_pid;
use crate::service::models::{Service, ServiceStatus};
use crate::service::spawn::SpawnedService;
use crate::service::state::mark_exited;
use std::time::Duration;
use tokio::process::Child;
use tokio::sync::mpsc::Sender;
use tokio::time::timeout;
use tracing::{info, warn};
use uuid::Uuid;

/// How often child liveness is re-checked while waiting for an exit.
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(250);

struct SupervisedService {
    service: Service,
    child: Child,
}

/// Owns all spawned children and coordinates their shutdown.
pub struct Supervisor {
    entries: Vec<SupervisedService>,
    events_tx: Sender<LaunchEvent>,
}

impl Supervisor {
    /// Create an empty supervisor.
    ///
    /// # Arguments
    ///
    /// * `events_tx` - Channel for lifecycle events emitted on exits
    pub fn new(events_tx: Sender<LaunchEvent>) -> Self {
        Self {
            entries: Vec::new(),
            events_tx,
        }
    }

    /// Take ownership of a spawned service.
    ///
    /// # Returns
    ///
    /// The service id, usable with [`Supervisor::get_service`].
    pub fn adopt(&mut self, spawned: SpawnedService) -> Uuid {
        let id = spawned.service.id;
        self.entries.push(SupervisedService {
            service: spawned.service,
            child: spawned.child,
        });
        id
    }

    /// Snapshot of all supervised services.
    pub fn services(&self) -> Vec<Service> {
        self.entries.iter().map(|e| e.service.clone()).collect()
    }

    /// Snapshot of one service by id.
    pub fn get_service(&self, id: Uuid) -> Option<Service> {
        self.entries
            .iter()
            .find(|e| e.service.id == id)
            .map(|e| e.service.clone())
    }

    /// Number of supervised services.
    pub fn service_count(&self) -> usize {
        self.entries.len()
    }

    /// Whether any supervised child is still alive.
    pub fn has_live_children(&self) -> bool {
        self.entries.iter().any(|e| {
            matches!(
                e.service.status,
                ServiceStatus::Starting | ServiceStatus::Ready | ServiceStatus::Running
            )
        })
    }

    /// Wait until any supervised child exits.
    ///
    /// The exited service is marked Stopped, a `ServiceExited` event is
    /// emitted, and its final state is returned. Returns `None` when
    /// there is nothing left to wait for.
    pub async fn wait_any(&mut self) -> Option<Service> {
        loop {
            if !self.has_live_children() {
                return None;
            }

            for entry in &mut self.entries {
                if !matches!(
                    entry.service.status,
                    ServiceStatus::Starting | ServiceStatus::Ready | ServiceStatus::Running
                ) {
                    continue;
                }
                if let Ok(Some(status)) = entry.child.try_wait() {
                    mark_exited(&mut entry.service, status.code(), &self.events_tx).await;
                    return Some(entry.service.clone());
                }
            }

            tokio::time::sleep(WAIT_POLL_INTERVAL).await;
        }
    }

    /// Terminate all live children.
    ///
    /// Each child first receives SIGTERM and is given `grace` to exit;
    /// stragglers are SIGKILLed. Already-dead children are only reaped.
    /// The method is idempotent.
    pub async fn shutdown(&mut self, grace: Duration) {
        for entry in &mut self.entries {
            if !matches!(
                entry.service.status,
                ServiceStatus::Starting | ServiceStatus::Ready | ServiceStatus::Running
            ) {
                continue;
            }

            // Reap without signaling when the child is already gone.
            if let Ok(Some(status)) = entry.child.try_wait() {
                mark_exited(&mut entry.service, status.code(), &self.events_tx).await;
                continue;
            }

            if let Some(pid) = entry.service.pid {
                info!(name = %entry.service.name, pid, "terminating service");
                kill_pid(pid, false).await;
            }

            match timeout(grace, entry.child.wait()).await {
                Ok(Ok(status)) => {
                    mark_exited(&mut entry.service, status.code(), &self.events_tx).await;
                }
                Ok(Err(_)) => {
                    mark_exited(&mut entry.service, None, &self.events_tx).await;
                }
                Err(_) => {
                    warn!(name = %entry.service.name, "grace period elapsed, killing");
                    let _ = entry.child.start_kill();
                    let code = entry.child.wait().await.ok().and_then(|s| s.code());
                    mark_exited(&mut entry.service, code, &self.events_tx).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServiceConfig;
    use crate::service::spawn::spawn_service;
    use std::path::PathBuf;
    use tempfile::tempdir;
    use tokio::sync::mpsc;

    fn shell_service(name: &str, script: &str) -> ServiceConfig {
        ServiceConfig {
            name: name.to_string(),
            command: "sh".to_string(),
            args: vec!["-c".to_string(), script.to_string()],
            port: None,
            log: PathBuf::from(format!("logs/{}.log", name)),
        }
    }

    #[tokio::test]
    async fn test_supervisor_starts_empty() {
        let (tx, _rx) = mpsc::channel(10);
        let mut supervisor = Supervisor::new(tx);
        assert_eq!(supervisor.service_count(), 0);
        assert!(!supervisor.has_live_children());
        assert!(supervisor.wait_any().await.is_none());
    }

    #[tokio::test]
    async fn test_wait_any_reports_first_exit() {
        let dir = tempdir().expect("Failed to create temp dir");
        let (tx, mut rx) = mpsc::channel(32);
        let mut supervisor = Supervisor::new(tx.clone());

        let long = spawn_service(&shell_service("long", "sleep 30"), dir.path(), &tx)
            .await
            .expect("spawn long");
        let short = spawn_service(&shell_service("short", "exit 7"), dir.path(), &tx)
            .await
            .expect("spawn short");

        supervisor.adopt(long);
        let short_id = supervisor.adopt(short);

        let exited = supervisor.wait_any().await.expect("one child should exit");
        assert_eq!(exited.id, short_id);
        assert_eq!(exited.status, ServiceStatus::Stopped);

        // Drain spawn events, then find the exit event
        let mut saw_exit = false;
        while let Ok(event) = rx.try_recv() {
            if let LaunchEvent::ServiceExited { code, name, .. } = event {
                assert_eq!(name, "short");
                assert_eq!(code, Some(7));
                saw_exit = true;
            }
        }
        assert!(saw_exit);

        supervisor.shutdown(Duration::from_secs(5)).await;
    }

    #[tokio::test]
    async fn test_shutdown_terminates_children() {
        let dir = tempdir().expect("Failed to create temp dir");
        let (tx, mut rx) = mpsc::channel(32);
        let mut supervisor = Supervisor::new(tx.clone());

        for name in ["a", "b"] {
            let spawned = spawn_service(&shell_service(name, "sleep 30"), dir.path(), &tx)
                .await
                .expect("spawn");
            supervisor.adopt(spawned);
        }

        supervisor.shutdown(Duration::from_secs(5)).await;

        assert!(!supervisor.has_live_children());
        for service in supervisor.services() {
            assert_eq!(service.status, ServiceStatus::Stopped);
        }

        let mut exits = 0;
        while let Ok(event) = rx.try_recv() {
            if matches!(event, LaunchEvent::ServiceExited { .. }) {
                exits += 1;
            }
        }
        assert_eq!(exits, 2);
    }

    #[tokio::test]
    async fn test_shutdown_is_idempotent() {
        let dir = tempdir().expect("Failed to create temp dir");
        let (tx, _rx) = mpsc::channel(32);
        let mut supervisor = Supervisor::new(tx.clone());

        let spawned = spawn_service(&shell_service("once", "sleep 30"), dir.path(), &tx)
            .await
            .expect("spawn");
        supervisor.adopt(spawned);

        supervisor.shutdown(Duration::from_secs(5)).await;
        supervisor.shutdown(Duration::from_secs(5)).await;
        assert!(!supervisor.has_live_children());
    }

    #[tokio::test]
    async fn test_shutdown_reaps_already_dead_child() {
        let dir = tempdir().expect("Failed to create temp dir");
        let (tx, _rx) = mpsc::channel(32);
        let mut supervisor = Supervisor::new(tx.clone());

        let spawned = spawn_service(&shell_service("dead", "exit 0"), dir.path(), &tx)
            .await
            .expect("spawn");
        supervisor.adopt(spawned);

        // Give the child time to exit before shutting down.
        tokio::time::sleep(Duration::from_millis(200)).await;
        supervisor.shutdown(Duration::from_secs(5)).await;

        let services = supervisor.services();
        assert_eq!(services[0].status, ServiceStatus::Stopped);
    }
}
