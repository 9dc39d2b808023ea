//! `svckit start`: launch the development stack and supervise it.

use crate::render;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use sk_core::config::load_config;
use sk_core::engine::{LaunchEngine, SHUTDOWN_GRACE};
use sk_core::events::LaunchEvent;
use sk_core::service::Supervisor;
use std::path::Path;
use tokio::sync::mpsc;
use tokio::sync::mpsc::Sender;
use tokio::task::JoinHandle;

/// Close the event channel and wait for the printer to drain.
///
/// The supervisor holds a sender clone, so it must be dropped along with
/// the local sender or the printer task would never see the channel
/// close.
async fn flush_events(printer: JoinHandle<()>, supervisor: Supervisor, tx: Sender<LaunchEvent>) {
    drop(supervisor);
    drop(tx);
    let _ = printer.await;
}

/// Run the development launcher.
///
/// Mirrors the historical one-shot start flow: dependency check, backend
/// with readiness poll, optional simulator, summary, then supervision
/// until every child exits or Ctrl+C arrives.
pub async fn run(root: &Path, no_simulator: bool, prompt_simulator: bool) -> Result<()> {
    let config = load_config(root).await?;

    render::banner("Configuration stack launcher");

    println!("Checking dependencies...");
    let engine = LaunchEngine::new(config.clone(), root.to_path_buf());
    engine.ensure_dependencies().await.map_err(|e| eyre!(e))?;

    let (tx, rx) = mpsc::channel(256);
    let printer = render::spawn_event_printer(rx);
    let mut supervisor = Supervisor::new(tx.clone());

    if let Some(port) = config.backend.port {
        println!("\nStarting {} (port {})...", config.backend.name, port);
    }
    let backend = match engine.start_backend(&tx).await {
        Ok(backend) => backend,
        Err(e) => {
            flush_events(printer, supervisor, tx).await;
            return Err(eyre!(e));
        }
    };
    supervisor.adopt(backend);

    let start_sim = if no_simulator {
        false
    } else if prompt_simulator {
        match inquire::Confirm::new("Start the app simulator?")
            .with_default(false)
            .prompt()
        {
            Ok(answer) => answer,
            Err(_) => {
                // Interrupted at the prompt: tear down what already runs.
                println!("\nStopping all services...");
                supervisor.shutdown(SHUTDOWN_GRACE).await;
                flush_events(printer, supervisor, tx).await;
                return Ok(());
            }
        }
    } else {
        true
    };

    if start_sim {
        println!("\nStarting {}...", config.simulator.name);
        match engine.start_simulator(&tx).await {
            Ok(Some(simulator)) => {
                supervisor.adopt(simulator);
            }
            Ok(None) => {
                // Failure was already reported through the event channel;
                // the backend stays up.
            }
            Err(e) => {
                supervisor.shutdown(SHUTDOWN_GRACE).await;
                flush_events(printer, supervisor, tx).await;
                return Err(eyre!(e));
            }
        }
    } else if no_simulator {
        println!("Skipping app simulator (--no-simulator)");
    }

    // Let the event printer drain before the summary block.
    tokio::task::yield_now().await;
    render::summary(&config, &supervisor.services());

    // Stay up until every child has exited on its own, or Ctrl+C.
    let mut interrupted = false;
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            interrupted = true;
        }
        _ = async {
            while supervisor.wait_any().await.is_some() {}
        } => {}
    }

    if interrupted {
        println!("\nStopping all services...");
    } else {
        println!("\nAll services have exited");
    }
    supervisor.shutdown(SHUTDOWN_GRACE).await;

    flush_events(printer, supervisor, tx).await;
    Ok(())
}
