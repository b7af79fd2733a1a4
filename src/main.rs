use anyhow::Result;
use clap::Parser;
use tokio::signal;

use docchat::cli::commands::{handle_chat, handle_ingest};
use docchat::cli::{Cli, Commands};
use docchat::models::Config;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::from_env();

    tokio::select! {
        result = run_command(cli.command, &config) => {
            result?;
        }
        _ = shutdown_signal() => {
            eprintln!("\nReceived shutdown signal, exiting...");
        }
    }

    Ok(())
}

async fn run_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Ingest { dir } => handle_ingest(&dir, config).await,
        Commands::Chat => handle_chat(config).await,
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
