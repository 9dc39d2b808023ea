//! Runtime service state models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// Lifecycle status of a managed service.
///
/// Normal progression for a port-bearing service:
/// Pending -> Starting -> Ready
///
/// A portless service (the simulator) goes Pending -> Starting -> Running
/// after surviving its liveness grace period. Terminal states are Stopped
/// and Failed.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceStatus {
    /// Service has been created but not spawned yet.
    Pending,

    /// Child process is spawned; readiness not yet confirmed.
    Starting,

    /// The readiness probe answered successfully.
    Ready,

    /// Liveness confirmed for a service without a readiness endpoint.
    Running,

    /// The child exited or was terminated by the supervisor.
    Stopped,

    /// Startup failed: spawn error, early exit, or probe timeout.
    Failed,
}

/// Runtime state of one managed child process.
///
/// Each spawned child gets a unique ID so supervisor operations and
/// events can refer to it unambiguously.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Service {
    /// Unique identifier for this service instance.
    pub id: Uuid,

    /// Display name, e.g. `web` or `app-simulator`.
    pub name: String,

    /// Full command line the child was spawned with.
    pub command_line: String,

    /// OS process id, available once spawned.
    pub pid: Option<u32>,

    /// Current lifecycle status.
    pub status: ServiceStatus,

    /// Log file the child's output is redirected to.
    pub log_path: PathBuf,

    /// When the service instance was created.
    pub started_at: DateTime<Utc>,
}

impl Service {
    /// Create a new service in the Pending state.
    pub fn new(name: &str, command_line: &str, log_path: PathBuf) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            command_line: command_line.to_string(),
            pid: None,
            status: ServiceStatus::Pending,
            log_path,
            started_at: Utc::now(),
        }
    }

    /// Whether the service reached a healthy state.
    pub fn is_up(&self) -> bool {
        matches!(self.status, ServiceStatus::Ready | ServiceStatus::Running)
    }
}
