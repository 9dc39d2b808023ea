//! Launch event protocol.
//!
//! The core reports lifecycle progress to its consumer (the CLI) through
//! an asynchronous `tokio::sync::mpsc` channel of `LaunchEvent` values.
//! The channel keeps the orchestration code free of terminal concerns:
//! the CLI decides how each event is rendered.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// Events sent from the core to the user interface.
///
/// Uses tagged enum serialization:
/// ```json
/// {
///   "type": "serviceReady",
///   "payload": {
///     "service_id": "uuid-here",
///     "name": "web",
///     "url": "http://localhost:9091"
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum LaunchEvent {
    /// Listeners occupying a port were killed before binding.
    PortFreed { port: u16, pids: Vec<u32> },

    /// A child process was spawned.
    ServiceSpawned {
        service_id: Uuid,
        name: String,
        pid: u32,
    },

    /// A port-bearing service answered its readiness probe.
    ServiceReady {
        service_id: Uuid,
        name: String,
        url: String,
    },

    /// A portless service survived its liveness grace period.
    ServiceRunning { service_id: Uuid, name: String },

    /// A supervised service exited.
    ServiceExited {
        service_id: Uuid,
        name: String,
        code: Option<i32>,
    },

    /// A service failed to start or died during startup.
    ServiceFailed {
        service_id: Uuid,
        name: String,
        error: String,
    },

    /// The tail of a service log, reported after a startup failure.
    LogTail {
        name: String,
        path: PathBuf,
        lines: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization_tagging() {
        let event = LaunchEvent::ServiceReady {
            service_id: Uuid::new_v4(),
            name: "web".to_string(),
            url: "http://localhost:9091".to_string(),
        };

        let json = serde_json::to_value(&event).expect("serialize");
        assert_eq!(json["type"], "serviceReady");
        assert_eq!(json["payload"]["name"], "web");
        assert_eq!(json["payload"]["url"], "http://localhost:9091");
    }

    #[test]
    fn test_event_round_trip() {
        let event = LaunchEvent::ServiceExited {
            service_id: Uuid::new_v4(),
            name: "app-simulator".to_string(),
            code: Some(1),
        };

        let json = serde_json::to_string(&event).expect("serialize");
        let back: LaunchEvent = serde_json::from_str(&json).expect("deserialize");
        assert!(matches!(
            back,
            LaunchEvent::ServiceExited { code: Some(1), .. }
        ));
    }
}
