//! Configuration models for the launcher.
//!
//! The defaults reproduce the fixed constants the launcher historically
//! carried inline: the development backend on port 9091, the deployed
//! backend on port 9092, and the basic-auth credentials the readiness
//! probe authenticates with.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::error::{ConfigError, ConfigResult};

/// Unified launcher configuration loaded from `svckit.toml`.
///
/// Every section falls back to its default when absent, so an empty or
/// missing file yields a fully working development setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherConfig {
    /// The web backend started by `svckit start`.
    pub backend: ServiceConfig,

    /// The device simulator started alongside the backend.
    pub simulator: ServiceConfig,

    /// Readiness probe settings shared by `start` and `deploy`.
    pub health: HealthConfig,

    /// Python interpreter and dependency probing.
    pub python: PythonConfig,

    /// Production provisioning via systemd.
    pub deploy: DeployConfig,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            backend: ServiceConfig::backend_default(),
            simulator: ServiceConfig::simulator_default(),
            health: HealthConfig::default(),
            python: PythonConfig::default(),
            deploy: DeployConfig::default(),
        }
    }
}

impl LauncherConfig {
    /// Validate invariants that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` when a service has an empty command,
    /// the backend has no port, a configured port is zero, or the health
    /// path is empty.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.backend.command.is_empty() {
            return Err(ConfigError::Invalid {
                reason: "backend command must not be empty".to_string(),
            });
        }
        if self.simulator.command.is_empty() {
            return Err(ConfigError::Invalid {
                reason: "simulator command must not be empty".to_string(),
            });
        }
        match self.backend.port {
            None => {
                return Err(ConfigError::Invalid {
                    reason: "backend port must be set".to_string(),
                });
            }
            Some(0) => {
                return Err(ConfigError::Invalid {
                    reason: "backend port must not be zero".to_string(),
                });
            }
            Some(_) => {}
        }
        if self.deploy.port == 0 {
            return Err(ConfigError::Invalid {
                reason: "deploy port must not be zero".to_string(),
            });
        }
        if self.health.path.is_empty() {
            return Err(ConfigError::Invalid {
                reason: "health path must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// One spawnable service: the backend or the simulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Display name, also used in events and log lines.
    pub name: String,

    /// Executable to launch. Resolved through `PATH`.
    pub command: String,

    /// Arguments passed to the command.
    pub args: Vec<String>,

    /// TCP port the service listens on, if any.
    ///
    /// The simulator does not listen and has no port; only services with a
    /// port get conflict resolution and a readiness probe.
    pub port: Option<u16>,

    /// Log file the child's stdout and stderr are redirected to,
    /// relative to the project root.
    pub log: PathBuf,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::backend_default()
    }
}

impl ServiceConfig {
    /// Development web backend: `python3 -u web.py` on port 9091.
    pub fn backend_default() -> Self {
        Self {
            name: "web".to_string(),
            command: "python3".to_string(),
            args: vec!["-u".to_string(), "web.py".to_string()],
            port: Some(9091),
            log: PathBuf::from("logs/web.log"),
        }
    }

    /// Device simulator: `python3 -u app_simulator.py`, no port.
    pub fn simulator_default() -> Self {
        Self {
            name: "app-simulator".to_string(),
            command: "python3".to_string(),
            args: vec!["-u".to_string(), "app_simulator.py".to_string()],
            port: None,
            log: PathBuf::from("logs/app_simulator.log"),
        }
    }

    /// Full command line for display purposes.
    pub fn command_line(&self) -> String {
        let mut line = self.command.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Readiness probe settings.
///
/// The probe requests `http://localhost:<port><path>` with basic auth and
/// considers the service ready on HTTP 200.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthConfig {
    /// Path of the authenticated endpoint to poll.
    pub path: String,

    /// Basic-auth username.
    pub username: String,

    /// Basic-auth password.
    pub password: String,

    /// Delay between attempts, in milliseconds.
    pub interval_ms: u64,

    /// Per-request timeout, in milliseconds.
    pub request_timeout_ms: u64,

    /// Overall budget, in seconds. Divided by the interval this yields
    /// the attempt count (20 s / 500 ms = 40 attempts).
    pub budget_secs: u64,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            path: "/api/defaults".to_string(),
            username: "lich".to_string(),
            password: "123123".to_string(),
            interval_ms: 500,
            request_timeout_ms: 1_000,
            budget_secs: 20,
        }
    }
}

impl HealthConfig {
    /// Number of poll attempts within the configured budget.
    pub fn attempts(&self) -> u32 {
        let interval = self.interval_ms.max(1);
        ((self.budget_secs * 1_000) / interval).max(1) as u32
    }

    /// Delay between attempts.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Probe URL for a service on the given port.
    pub fn url_for_port(&self, port: u16) -> String {
        format!("http://localhost:{}{}", port, self.path)
    }
}

/// Python interpreter settings shared by `start` and `deploy`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PythonConfig {
    /// Interpreter name or path, resolved through `PATH`.
    pub interpreter: String,

    /// Modules the dependency probe imports before falling back to pip.
    pub probe_modules: Vec<String>,
}

impl Default for PythonConfig {
    fn default() -> Self {
        Self {
            interpreter: "python3".to_string(),
            probe_modules: vec![
                "fastapi".to_string(),
                "uvicorn".to_string(),
                "websockets".to_string(),
            ],
        }
    }
}

/// Production provisioning settings for `svckit deploy`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeployConfig {
    /// systemd service name.
    pub service_name: String,

    /// Where the rendered unit file is written.
    pub unit_path: PathBuf,

    /// Backend entry point script, relative to the project root.
    pub entry_point: PathBuf,

    /// TCP port the deployed backend listens on.
    pub port: u16,

    /// Packages installed with `pip install -q` before provisioning.
    pub pip_packages: Vec<String>,

    /// Log file the unit appends stdout/stderr to, relative to the
    /// project root.
    pub log: PathBuf,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            service_name: "lightweight-backend".to_string(),
            unit_path: PathBuf::from("/etc/systemd/system/lightweight-backend.service"),
            entry_point: PathBuf::from("lightweight_backend.py"),
            port: 9092,
            pip_packages: vec![
                "fastapi".to_string(),
                "uvicorn".to_string(),
                "websockets".to_string(),
            ],
            log: PathBuf::from("logs/backend.log"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = LauncherConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_ports() {
        let config = LauncherConfig::default();
        assert_eq!(config.backend.port, Some(9091));
        assert_eq!(config.simulator.port, None);
        assert_eq!(config.deploy.port, 9092);
    }

    #[test]
    fn test_health_attempts_from_budget() {
        let health = HealthConfig::default();
        // 20 s budget at 500 ms per attempt
        assert_eq!(health.attempts(), 40);
    }

    #[test]
    fn test_health_url() {
        let health = HealthConfig::default();
        assert_eq!(
            health.url_for_port(9091),
            "http://localhost:9091/api/defaults"
        );
    }

    #[test]
    fn test_command_line_rendering() {
        let backend = ServiceConfig::backend_default();
        assert_eq!(backend.command_line(), "python3 -u web.py");
    }

    #[test]
    fn test_validate_rejects_empty_command() {
        let mut config = LauncherConfig::default();
        config.backend.command = String::new();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let mut config = LauncherConfig::default();
        config.backend.port = Some(0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { .. })
        ));

        let mut config = LauncherConfig::default();
        config.deploy.port = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_missing_backend_port() {
        let mut config = LauncherConfig::default();
        config.backend.port = None;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { .. })
        ));
    }
}
