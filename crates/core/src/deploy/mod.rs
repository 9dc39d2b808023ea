//! systemd provisioning for the production backend.
//!
//! `svckit deploy` verifies the interpreter and backend entry point,
//! installs the Python dependencies, renders the embedded unit template,
//! writes it to the systemd directory, restarts the unit, and confirms
//! the deployed service answers its readiness probe. Recovery after that
//! point is systemd's job (`Restart=always` in the unit).

pub mod error;
pub mod systemctl;
pub mod templates;
pub mod unit;

pub use error::{DeployError, DeployResult};
pub use unit::UnitSpec;

use crate::config::LauncherConfig;
use crate::health::{HealthError, HttpProbe, ReadinessProbe};
use crate::python::PythonEnv;
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Steps reported to the caller while a deploy progresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployStep {
    Preconditions,
    Dependencies,
    UnitFile,
    Restart,
    HealthCheck,
}

/// Run the full deployment sequence.
///
/// # Arguments
///
/// * `config` - Launcher configuration
/// * `root` - Project root containing the backend entry point
/// * `report` - Invoked before each step begins, for progress output
///
/// # Errors
///
/// Every failure maps to a distinct `DeployError` so the CLI exits
/// nonzero with a precise message: missing interpreter, missing entry
/// point, pip failure, unit write failure, systemctl failure, or a
/// failed post-deploy health check.
pub async fn deploy(
    config: &LauncherConfig,
    root: &Path,
    mut report: impl FnMut(DeployStep),
) -> DeployResult<()> {
    report(DeployStep::Preconditions);
    let python = PythonEnv::resolve(&config.python.interpreter)?;
    let entry_point = root.join(&config.deploy.entry_point);
    if !entry_point.exists() {
        return Err(DeployError::MissingEntryPoint(entry_point));
    }

    report(DeployStep::Dependencies);
    python.pip_install(&config.deploy.pip_packages).await?;

    report(DeployStep::UnitFile);
    let spec = UnitSpec::from_config(&config.deploy, python.path(), root);
    let rendered = spec.render()?;
    write_unit(&config.deploy.unit_path, &rendered)?;

    report(DeployStep::Restart);
    systemctl::daemon_reload().await?;
    systemctl::enable(&config.deploy.service_name).await?;
    systemctl::restart(&config.deploy.service_name).await?;

    report(DeployStep::HealthCheck);
    let probe = HttpProbe::from_config(&config.health, config.deploy.port)
        .map_err(|e| DeployError::Probe(e.to_string()))?;
    verify_health(&probe, config.health.attempts(), config.health.interval()).await?;

    info!(
        service = %config.deploy.service_name,
        port = config.deploy.port,
        "deploy complete"
    );
    Ok(())
}

/// Write the rendered unit file to its target path.
fn write_unit(path: &Path, content: &str) -> DeployResult<()> {
    std::fs::write(path, content).map_err(|source| DeployError::UnitWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Poll the deployed service until ready.
///
/// Unlike the development launcher there is no child handle to watch;
/// systemd owns the process, so only the probe budget bounds the wait.
async fn verify_health(
    probe: &dyn ReadinessProbe,
    attempts: u32,
    interval: Duration,
) -> DeployResult<()> {
    for _ in 0..attempts {
        if probe.check().await {
            return Ok(());
        }
        tokio::time::sleep(interval).await;
    }

    Err(DeployError::Health(HealthError::TimedOut {
        name: probe.describe(),
        attempts,
    }))
}
