//! Port occupancy checks.
//!
//! Before binding a service to its configured port, any process already
//! listening there is detected with `lsof -ti :PORT` and killed. Hosts
//! without `lsof` skip the check entirely, which mirrors how the launcher
//! has always behaved when the tool is absent.

use crate::events::LaunchEvent;
use std::time::Duration;
use tokio::process::Command;
use tokio::sync::mpsc::Sender;
use tracing::{debug, warn};

/// Parse the PID-per-line output of `lsof -ti`.
///
/// Blank lines and non-numeric garbage are skipped.
pub fn parse_pids(output: &str) -> Vec<u32> {
    output
        .lines()
        .filter_map(|line| line.trim().parse::<u32>().ok())
        .collect()
}

/// PIDs of processes currently listening on `port`.
///
/// Returns an empty list when `lsof` is not installed or reports no
/// listeners (`lsof` exits nonzero when nothing matches).
pub async fn listeners_on(port: u16) -> Vec<u32> {
    let lsof = match which::which("lsof") {
        Ok(path) => path,
        Err(_) => {
            debug!(port, "lsof not found, skipping port check");
            return Vec::new();
        }
    };

    let output = Command::new(lsof)
        .arg("-ti")
        .arg(format!(":{}", port))
        .output()
        .await;

    match output {
        Ok(output) => parse_pids(&String::from_utf8_lossy(&output.stdout)),
        Err(e) => {
            debug!(port, error = %e, "lsof invocation failed");
            Vec::new()
        }
    }
}

/// Send a signal to a process via `kill`.
///
/// `force` selects SIGKILL; otherwise SIGTERM is delivered. Returns
/// whether the signal was accepted.
pub async fn kill_pid(pid: u32, force: bool) -> bool {
    let mut cmd = Command::new("kill");
    if force {
        cmd.arg("-9");
    }
    cmd.arg(pid.to_string());

    matches!(cmd.status().await, Ok(status) if status.success())
}

/// Kill any process listening on `port` so the service can bind it.
///
/// Waits one second after killing, giving the kernel time to release the
/// socket. Returns the PIDs that were killed.
pub async fn free_port(port: u16, events_tx: &Sender<LaunchEvent>) -> Vec<u32> {
    let pids = listeners_on(port).await;
    if pids.is_empty() {
        return pids;
    }

    warn!(port, ?pids, "port occupied, killing listeners");
    for &pid in &pids {
        kill_pid(pid, true).await;
    }

    let _ = events_tx
        .send(LaunchEvent::PortFreed {
            port,
            pids: pids.clone(),
        })
        .await;

    tokio::time::sleep(Duration::from_secs(1)).await;
    pids
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pids() {
        assert_eq!(parse_pids("1234\n5678\n"), vec![1234, 5678]);
    }

    #[test]
    fn test_parse_pids_skips_garbage() {
        assert_eq!(parse_pids("  90\nnot-a-pid\n\n12\n"), vec![90, 12]);
    }

    #[test]
    fn test_parse_pids_empty() {
        assert!(parse_pids("").is_empty());
    }

    #[tokio::test]
    async fn test_kill_pid_rejects_dead_process() {
        // PID 4194304 is above the default kernel pid_max; kill must fail.
        assert!(!kill_pid(4_194_304, false).await);
    }
}
