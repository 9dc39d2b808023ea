//! `svckit stop`: stop the deployed systemd unit.

use color_eyre::eyre::eyre;
use color_eyre::Result;
use colored::Colorize;
use sk_core::config::load_config;
use sk_core::deploy::systemctl;
use std::path::Path;

/// Stop the deployed backend through systemctl.
pub async fn run(root: &Path) -> Result<()> {
    let config = load_config(root).await?;

    systemctl::stop(&config.deploy.service_name)
        .await
        .map_err(|e| eyre!(e))?;

    println!(
        "{} {} stopped",
        "✓".green().bold(),
        config.deploy.service_name
    );
    Ok(())
}
