//! Child process spawning with log redirection.
//!
//! A service's stdout and stderr are redirected into its log file, which
//! is truncated on every start. The child is detached from the launcher's
//! terminal; its output is only ever inspected through the log file.

use crate::config::ServiceConfig;
use crate::events::LaunchEvent;
use crate::logs;
use crate::service::models::Service;
use crate::service::state::mark_spawned;
use crate::service::ServiceError;
use std::path::Path;
use std::process::Stdio;
use tokio::process::{Child, Command};
use tokio::sync::mpsc::Sender;
use tracing::info;

/// A spawned service: the model plus the owned child process handle.
///
/// Ownership of the `Child` moves into the `Supervisor` once startup
/// checks have passed.
pub struct SpawnedService {
    pub service: Service,
    pub child: Child,
}

/// Spawn a service with its output redirected to the configured log file.
///
/// The log file is truncated first, matching the behavior of clearing the
/// previous run's log before each start.
///
/// # Arguments
///
/// * `config` - Command, arguments and log path for the service
/// * `root` - Project root; working directory of the child and base for
///   relative log paths
/// * `events_tx` - Channel to send lifecycle events
///
/// # Errors
///
/// Returns `ServiceError::LogSetup` if the log file cannot be prepared,
/// or `ServiceError::Spawn` if the command cannot be executed.
pub async fn spawn_service(
    config: &ServiceConfig,
    root: &Path,
    events_tx: &Sender<LaunchEvent>,
) -> Result<SpawnedService, ServiceError> {
    let log_path = root.join(&config.log);

    let log_out = logs::prepare_log(&log_path).map_err(|source| ServiceError::LogSetup {
        path: log_path.clone(),
        source,
    })?;
    let log_err = log_out
        .try_clone()
        .map_err(|source| ServiceError::LogSetup {
            path: log_path.clone(),
            source,
        })?;

    let mut cmd = Command::new(&config.command);
    cmd.args(&config.args)
        .current_dir(root)
        .stdin(Stdio::null())
        .stdout(Stdio::from(log_out))
        .stderr(Stdio::from(log_err))
        .kill_on_drop(true);

    let child = cmd.spawn().map_err(|source| ServiceError::Spawn {
        command: config.command_line(),
        source,
    })?;

    let pid = child.id().unwrap_or(0);
    let mut service = Service::new(&config.name, &config.command_line(), log_path);
    mark_spawned(&mut service, pid, events_tx).await;

    info!(name = %service.name, pid, "spawned service");

    Ok(SpawnedService { service, child })
}
