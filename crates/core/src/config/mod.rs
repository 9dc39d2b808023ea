//! Configuration loading and management.
//!
//! This module provides functionality to load and validate the launcher
//! configuration from `svckit.toml` at the project root.

pub mod error;
pub mod loader;
pub mod models;

pub use error::{ConfigError, ConfigResult};
pub use loader::load_config;
pub use models::{DeployConfig, HealthConfig, LauncherConfig, PythonConfig, ServiceConfig};
