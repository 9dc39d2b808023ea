mod commands;
mod render;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "svckit",
    version,
    about = "Lifecycle launcher for the configuration backend stack"
)]
struct Cli {
    /// Project root containing the service scripts and svckit.toml
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the development stack and supervise it until Ctrl+C
    Start {
        /// Do not start the app simulator
        #[arg(long)]
        no_simulator: bool,

        /// Ask before starting the app simulator
        #[arg(long, conflicts_with = "no_simulator")]
        prompt_simulator: bool,
    },

    /// Install dependencies, write the systemd unit and start the backend
    Deploy,

    /// Stop the deployed systemd unit
    Stop,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Start {
            no_simulator,
            prompt_simulator,
        } => commands::start::run(&cli.root, no_simulator, prompt_simulator).await,
        Commands::Deploy => commands::deploy::run(&cli.root).await,
        Commands::Stop => commands::stop::run(&cli.root).await,
    }
}
