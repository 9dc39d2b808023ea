//! Base ReadinessProbe trait and supporting types.

use async_trait::async_trait;
use thiserror::Error;

/// Errors produced by the readiness poll loop.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HealthError {
    /// The monitored child exited before answering the probe.
    #[error("Service `{name}` exited with code {code:?} before becoming ready")]
    ProcessExited { name: String, code: Option<i32> },

    /// All probe attempts were used without a successful answer.
    #[error("Service `{name}` failed its readiness check after {attempts} attempts")]
    TimedOut { name: String, attempts: u32 },
}

/// A single readiness check against a starting service.
///
/// Implementations must be cheap to call repeatedly; the poll loop
/// invokes `check` up to the configured attempt count.
#[async_trait]
pub trait ReadinessProbe: Send + Sync {
    /// Human-readable target, e.g. the probed URL.
    fn describe(&self) -> String;

    /// One probe attempt. `true` means the service is serving traffic.
    async fn check(&self) -> bool;
}
