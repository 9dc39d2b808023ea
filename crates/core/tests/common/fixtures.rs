//! Test fixtures for creating launcher configurations and fake services.
//!
//! The fake services are plain `sh` one-liners so the tests run on any
//! Unix host without a Python web stack installed.

use sk_core::config::{LauncherConfig, ServiceConfig};
use std::path::PathBuf;
use tempfile::TempDir;

/// A service definition backed by a shell one-liner.
pub fn shell_service(name: &str, script: &str, port: Option<u16>) -> ServiceConfig {
    ServiceConfig {
        name: name.to_string(),
        command: "sh".to_string(),
        args: vec!["-c".to_string(), script.to_string()],
        port,
        log: PathBuf::from(format!("logs/{}.log", name)),
    }
}

/// A full configuration with shell-backed backend and simulator.
///
/// The backend port is a high port nothing listens on, so the
/// port-freeing pass is a no-op in tests.
#[allow(dead_code)]
pub fn shell_stack(backend_script: &str, simulator_script: &str) -> LauncherConfig {
    let mut config = LauncherConfig::default();
    config.backend = shell_service("web", backend_script, Some(39_091));
    config.simulator = shell_service("app-simulator", simulator_script, None);
    config.health.interval_ms = 10;
    config.health.budget_secs = 1;
    config
}

/// Create an empty project root for a launch.
pub fn create_test_root() -> std::io::Result<TempDir> {
    tempfile::tempdir()
}
