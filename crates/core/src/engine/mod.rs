//! Launch orchestration for the development stack.
//!
//! The LaunchEngine sequences a `svckit start`: free the backend port,
//! spawn the backend with log redirection, poll it for readiness, then
//! optionally bring up the simulator. A backend that never becomes ready
//! aborts the launch; a simulator that dies during its grace period is
//! reported and skipped.

use crate::config::LauncherConfig;
use crate::events::LaunchEvent;
use crate::health::{confirm_alive, wait_for_ready, HealthError, HttpProbe, ReadinessProbe};
use crate::logs;
use crate::port::free_port;
use crate::python::PythonEnv;
use crate::service::spawn::{spawn_service, SpawnedService};
use crate::service::state::{mark_failed, mark_ready, mark_running};
use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::Sender;

/// How long the simulator must survive before it counts as running.
pub const SIMULATOR_GRACE: Duration = Duration::from_secs(1);

/// How long a child gets to exit on SIGTERM before being killed.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// The main launch orchestrator.
///
/// Holds the configuration and project root; an alternative readiness
/// probe can be injected for services that are not probed over HTTP.
pub struct LaunchEngine {
    config: LauncherConfig,
    root: PathBuf,
    probe: Option<Arc<dyn ReadinessProbe>>,
}

impl LaunchEngine {
    /// Create a new LaunchEngine.
    ///
    /// # Arguments
    ///
    /// * `config` - Validated launcher configuration
    /// * `root` - Project root; working directory for all children
    pub fn new(config: LauncherConfig, root: PathBuf) -> Self {
        Self {
            config,
            root,
            probe: None,
        }
    }

    /// Replace the HTTP readiness probe with a custom implementation.
    pub fn with_probe(mut self, probe: Arc<dyn ReadinessProbe>) -> Self {
        self.probe = Some(probe);
        self
    }

    /// Project root the engine launches into.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Configuration the engine was built with.
    pub fn config(&self) -> &LauncherConfig {
        &self.config
    }

    /// Verify the interpreter exists and the web-stack modules import,
    /// installing them when they do not.
    ///
    /// # Errors
    ///
    /// Returns an error when the interpreter is missing or pip fails;
    /// both end the launch before anything is spawned.
    pub async fn ensure_dependencies(&self) -> Result<()> {
        let python = PythonEnv::resolve(&self.config.python.interpreter)?;
        python
            .ensure_modules(&self.config.python.probe_modules)
            .await
            .context("Failed to prepare python dependencies")?;
        Ok(())
    }

    /// Start the backend and wait until it answers its readiness probe.
    ///
    /// On failure the log tail is emitted, the child is killed, and an
    /// error is returned; the launch cannot proceed without a backend.
    pub async fn start_backend(
        &self,
        events_tx: &Sender<LaunchEvent>,
    ) -> Result<SpawnedService> {
        let port = self
            .config
            .backend
            .port
            .ok_or_else(|| anyhow!("backend has no configured port"))?;

        free_port(port, events_tx).await;

        let mut spawned = spawn_service(&self.config.backend, &self.root, events_tx).await?;

        let probe = self.readiness_probe(port)?;
        let result = wait_for_ready(
            &mut spawned,
            probe.as_ref(),
            self.config.health.attempts(),
            self.config.health.interval(),
        )
        .await;

        match result {
            Ok(()) => {
                mark_ready(&mut spawned.service, probe.describe(), events_tx).await;
                Ok(spawned)
            }
            Err(e) => {
                self.report_startup_failure(&mut spawned, &e, events_tx).await;
                let _ = spawned.child.start_kill();
                let _ = spawned.child.wait().await;
                Err(e).context("Backend failed to start")
            }
        }
    }

    /// Start the simulator and confirm it survives its grace period.
    ///
    /// A simulator that cannot be spawned or dies immediately is
    /// reported through the event channel and skipped; the backend
    /// keeps running.
    pub async fn start_simulator(
        &self,
        events_tx: &Sender<LaunchEvent>,
    ) -> Result<Option<SpawnedService>> {
        let mut spawned = match spawn_service(&self.config.simulator, &self.root, events_tx).await
        {
            Ok(spawned) => spawned,
            Err(e) => {
                let _ = events_tx
                    .send(LaunchEvent::ServiceFailed {
                        service_id: uuid::Uuid::new_v4(),
                        name: self.config.simulator.name.clone(),
                        error: e.to_string(),
                    })
                    .await;
                return Ok(None);
            }
        };

        match confirm_alive(&mut spawned, SIMULATOR_GRACE).await {
            Ok(()) => {
                mark_running(&mut spawned.service, events_tx).await;
                Ok(Some(spawned))
            }
            Err(e) => {
                self.report_startup_failure(&mut spawned, &e, events_tx).await;
                Ok(None)
            }
        }
    }

    /// Emit the failure event and the tail of the service log.
    async fn report_startup_failure(
        &self,
        spawned: &mut SpawnedService,
        error: &HealthError,
        events_tx: &Sender<LaunchEvent>,
    ) {
        mark_failed(&mut spawned.service, error.to_string(), events_tx).await;

        let lines = logs::tail(&spawned.service.log_path, logs::TAIL_LINES).unwrap_or_default();
        let _ = events_tx
            .send(LaunchEvent::LogTail {
                name: spawned.service.name.clone(),
                path: spawned.service.log_path.clone(),
                lines,
            })
            .await;
    }

    fn readiness_probe(&self, port: u16) -> Result<Arc<dyn ReadinessProbe>> {
        if let Some(probe) = &self.probe {
            return Ok(Arc::clone(probe));
        }
        let probe = HttpProbe::from_config(&self.config.health, port)
            .context("Failed to build readiness probe")?;
        Ok(Arc::new(probe))
    }
}
