//! `svckit deploy`: provision the backend as a systemd unit.

use crate::render;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use colored::Colorize;
use sk_core::config::load_config;
use sk_core::deploy::{deploy, DeployStep};
use std::path::Path;

fn step_label(step: DeployStep) -> &'static str {
    match step {
        DeployStep::Preconditions => "Checking interpreter and entry point",
        DeployStep::Dependencies => "Installing python dependencies",
        DeployStep::UnitFile => "Writing systemd unit",
        DeployStep::Restart => "Restarting unit",
        DeployStep::HealthCheck => "Waiting for the service to become ready",
    }
}

/// Run the production deployment.
pub async fn run(root: &Path) -> Result<()> {
    if !is_root::is_root() {
        return Err(eyre!(
            "deploy writes to /etc/systemd/system and must run as root"
        ));
    }

    let config = load_config(root).await?;

    render::banner("Deploying configuration backend");

    deploy(&config, root, |step| {
        println!("→ {}...", step_label(step));
    })
    .await
    .map_err(|e| eyre!(e))?;

    println!(
        "\n{} {} deployed, listening on port {}",
        "✓".green().bold(),
        config.deploy.service_name,
        config.deploy.port
    );
    println!("  unit file: {}", config.deploy.unit_path.display());
    Ok(())
}
