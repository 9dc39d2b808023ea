//! Terminal rendering of launch events and summaries.

use colored::Colorize;
use sk_core::config::LauncherConfig;
use sk_core::events::LaunchEvent;
use sk_core::service::Service;
use tokio::sync::mpsc::Receiver;
use tokio::task::JoinHandle;

/// Width of the banner rules, matching the launcher's historical output.
const RULE_WIDTH: usize = 50;

/// Print a section banner.
pub fn banner(title: &str) {
    println!("{}", "=".repeat(RULE_WIDTH));
    println!("{}", title.bold());
    println!("{}", "=".repeat(RULE_WIDTH));
}

/// Consume launch events from the core and print them as they arrive.
///
/// The task ends when the last event sender is dropped; callers await
/// the handle to flush pending output before exiting.
pub fn spawn_event_printer(mut rx: Receiver<LaunchEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            print_event(&event);
        }
    })
}

fn print_event(event: &LaunchEvent) {
    match event {
        LaunchEvent::PortFreed { port, pids } => {
            println!(
                "{} port {} was occupied, killed {}",
                "!".yellow().bold(),
                port,
                pids.iter()
                    .map(|p| p.to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            );
        }
        LaunchEvent::ServiceSpawned { name, pid, .. } => {
            println!("{}", format!("  {} spawned (PID: {})", name, pid).dimmed());
        }
        LaunchEvent::ServiceReady { name, url, .. } => {
            println!("{} {} ready at {}", "✓".green().bold(), name, url);
        }
        LaunchEvent::ServiceRunning { name, .. } => {
            println!("{} {} running", "✓".green().bold(), name);
        }
        LaunchEvent::ServiceExited { name, code, .. } => {
            match code {
                Some(code) => println!("  {} exited with code {}", name, code),
                None => println!("  {} terminated", name),
            }
        }
        LaunchEvent::ServiceFailed { name, error, .. } => {
            eprintln!("{} {} failed: {}", "✗".red().bold(), name, error);
        }
        LaunchEvent::LogTail { name, path, lines } => {
            if lines.is_empty() {
                eprintln!(
                    "{} is empty, the process may have exited before starting",
                    path.display()
                );
                return;
            }
            eprintln!("------ {} log ------", name);
            for line in lines {
                eprintln!("{}", line);
            }
            eprintln!("----------------------");
        }
    }
}

/// Print the post-launch summary: service list, credentials, log files.
pub fn summary(config: &LauncherConfig, services: &[Service]) {
    println!();
    banner("All services started!");

    println!("\nServices:");
    for service in services {
        let pid = service.pid.map_or_else(|| "?".to_string(), |p| p.to_string());
        match config.backend.port {
            Some(port) if service.name == config.backend.name => {
                println!(
                    "  - {}: http://localhost:{} (PID: {})",
                    service.name, port, pid
                );
            }
            _ => println!("  - {} (PID: {})", service.name, pid),
        }
    }

    println!("\nCredentials:");
    println!("  username: {}", config.health.username);
    println!("  password: {}", config.health.password);

    println!("\nLog files:");
    for service in services {
        println!("  - {}", service.log_path.display());
    }

    println!("\nPress Ctrl+C to stop all services\n");
}
