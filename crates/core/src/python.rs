//! Python interpreter resolution and dependency installation.
//!
//! The backend and simulator are Python programs, so both `start` and
//! `deploy` need a working interpreter and the web-stack packages. The
//! development path probes with an import before reaching for pip, which
//! keeps the common case (everything already installed) fast and offline.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command;
use tracing::info;

/// Errors from interpreter resolution or dependency installation.
#[derive(Error, Debug)]
pub enum PythonError {
    /// The interpreter is not on `PATH`.
    #[error("Python interpreter `{0}` not found in PATH")]
    InterpreterNotFound(String),

    /// Running the interpreter failed at the OS level.
    #[error("Failed to run {context}: {source}")]
    Io {
        context: String,
        source: std::io::Error,
    },

    /// pip exited nonzero.
    #[error("Failed to install python packages: {0:?}")]
    InstallFailed(Vec<String>),
}

/// A resolved Python interpreter.
#[derive(Debug, Clone)]
pub struct PythonEnv {
    interpreter: PathBuf,
}

impl PythonEnv {
    /// Resolve the configured interpreter through `PATH`.
    ///
    /// # Errors
    ///
    /// Returns `PythonError::InterpreterNotFound` when the lookup fails;
    /// callers turn this into a nonzero exit.
    pub fn resolve(interpreter: &str) -> Result<Self, PythonError> {
        let interpreter = which::which(interpreter)
            .map_err(|_| PythonError::InterpreterNotFound(interpreter.to_string()))?;
        Ok(Self { interpreter })
    }

    /// Absolute path of the resolved interpreter.
    pub fn path(&self) -> &Path {
        &self.interpreter
    }

    /// Whether all of `modules` can be imported.
    pub async fn modules_importable(&self, modules: &[String]) -> Result<bool, PythonError> {
        if modules.is_empty() {
            return Ok(true);
        }

        let import_line = format!("import {}", modules.join(", "));
        let status = Command::new(&self.interpreter)
            .arg("-c")
            .arg(&import_line)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|source| PythonError::Io {
                context: format!("`{}`", import_line),
                source,
            })?;

        Ok(status.success())
    }

    /// Install packages with `pip install -q`.
    ///
    /// # Errors
    ///
    /// Returns `PythonError::InstallFailed` with the package list when
    /// pip exits nonzero.
    pub async fn pip_install(&self, packages: &[String]) -> Result<(), PythonError> {
        if packages.is_empty() {
            return Ok(());
        }

        info!(?packages, "installing python packages");
        let status = Command::new(&self.interpreter)
            .args(["-m", "pip", "install", "-q"])
            .args(packages)
            .status()
            .await
            .map_err(|source| PythonError::Io {
                context: "pip install".to_string(),
                source,
            })?;

        if !status.success() {
            return Err(PythonError::InstallFailed(packages.to_vec()));
        }
        Ok(())
    }

    /// Make sure `modules` are importable, installing them when not.
    pub async fn ensure_modules(&self, modules: &[String]) -> Result<(), PythonError> {
        if self.modules_importable(modules).await? {
            return Ok(());
        }
        self.pip_install(modules).await
    }
}
