//! Managed service model, spawning and supervision.
//!
//! This module provides:
//! - The `Service` model and its status state machine
//! - Child process spawning with log redirection
//! - The `Supervisor` that owns all spawned children

pub mod models;
pub mod spawn;
pub mod state;
pub mod supervisor;

pub use models::{Service, ServiceStatus};
pub use spawn::{spawn_service, SpawnedService};
pub use supervisor::Supervisor;

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while spawning or controlling a service.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The child process could not be spawned.
    #[error("Failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    /// The log file or its parent directory could not be prepared.
    #[error("Failed to prepare log file {path}: {source}")]
    LogSetup {
        path: PathBuf,
        source: std::io::Error,
    },
}
