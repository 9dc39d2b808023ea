//! Thin driver around `systemctl`.
//!
//! Lifecycle management of the deployed backend is delegated to the init
//! system; this module only shells out and maps exit codes to typed
//! errors.

use crate::deploy::error::{DeployError, DeployResult};
use tokio::process::Command;
use tracing::debug;

/// Reload unit definitions after writing a unit file.
pub async fn daemon_reload() -> DeployResult<()> {
    run(&["daemon-reload"]).await
}

/// Enable a unit so it starts on boot.
pub async fn enable(service: &str) -> DeployResult<()> {
    run(&["enable", service]).await
}

/// Restart a unit, starting it if it was not running.
pub async fn restart(service: &str) -> DeployResult<()> {
    run(&["restart", service]).await
}

/// Stop a unit.
pub async fn stop(service: &str) -> DeployResult<()> {
    run(&["stop", service]).await
}

async fn run(args: &[&str]) -> DeployResult<()> {
    let action = args.join(" ");
    debug!(%action, "running systemctl");

    let status = Command::new("systemctl")
        .args(args)
        .status()
        .await
        .map_err(|source| DeployError::SystemctlIo {
            action: action.clone(),
            source,
        })?;

    if !status.success() {
        return Err(DeployError::Systemctl {
            action,
            code: status.code(),
        });
    }
    Ok(())
}
