//! Error types for deployment.

use crate::health::HealthError;
use crate::python::PythonError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while provisioning the systemd unit.
#[derive(Error, Debug)]
pub enum DeployError {
    /// Interpreter or pip problems.
    #[error(transparent)]
    Python(#[from] PythonError),

    /// The backend entry point script does not exist.
    #[error("Backend entry point not found: {0}")]
    MissingEntryPoint(PathBuf),

    /// The embedded unit template is missing from the binary.
    #[error("Unit template `{0}` not embedded")]
    TemplateNotFound(String),

    /// The unit file could not be written.
    #[error("Failed to write unit file {path}: {source}")]
    UnitWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// systemctl could not be invoked at all.
    #[error("Failed to run systemctl {action}: {source}")]
    SystemctlIo {
        action: String,
        source: std::io::Error,
    },

    /// systemctl ran but reported failure.
    #[error("systemctl {action} exited with code {code:?}")]
    Systemctl { action: String, code: Option<i32> },

    /// The readiness probe could not be constructed.
    #[error("Failed to build readiness probe: {0}")]
    Probe(String),

    /// The deployed service never became ready.
    #[error(transparent)]
    Health(#[from] HealthError),
}

/// Type alias for Result with DeployError.
pub type DeployResult<T> = Result<T, DeployError>;
