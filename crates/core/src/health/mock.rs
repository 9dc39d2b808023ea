//! Mock readiness probe for testing.

use crate::health::base::ReadinessProbe;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};

/// Scripted probe: not ready for a fixed number of calls, then ready
/// (or never ready at all).
pub struct MockProbe {
    ready_after: Option<u32>,
    calls: AtomicU32,
}

impl MockProbe {
    /// Ready on every call.
    pub fn always_ready() -> Self {
        Self {
            ready_after: Some(0),
            calls: AtomicU32::new(0),
        }
    }

    /// Not ready for the first `attempts` calls, ready afterwards.
    pub fn ready_after(attempts: u32) -> Self {
        Self {
            ready_after: Some(attempts),
            calls: AtomicU32::new(0),
        }
    }

    /// Never answers ready.
    pub fn never_ready() -> Self {
        Self {
            ready_after: None,
            calls: AtomicU32::new(0),
        }
    }

    /// Number of probe attempts observed so far.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReadinessProbe for MockProbe {
    fn describe(&self) -> String {
        "mock://probe".to_string()
    }

    async fn check(&self) -> bool {
        let seen = self.calls.fetch_add(1, Ordering::SeqCst);
        match self.ready_after {
            Some(threshold) => seen >= threshold,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_always_ready() {
        let probe = MockProbe::always_ready();
        assert!(probe.check().await);
        assert_eq!(probe.calls(), 1);
    }

    #[tokio::test]
    async fn test_ready_after_threshold() {
        let probe = MockProbe::ready_after(2);
        assert!(!probe.check().await);
        assert!(!probe.check().await);
        assert!(probe.check().await);
    }

    #[tokio::test]
    async fn test_never_ready() {
        let probe = MockProbe::never_ready();
        for _ in 0..5 {
            assert!(!probe.check().await);
        }
        assert_eq!(probe.calls(), 5);
    }
}
