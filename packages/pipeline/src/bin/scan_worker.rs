use clap::Parser;
use tracing_subscriber::EnvFilter;

use camt_pipeline::cli::Cli;
use camt_pipeline::config::ScanConfig;
use camt_pipeline::worker::run_scan_worker;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = match ScanConfig::from_env() {
        Ok(config) => cli.apply(config),
        Err(e) => {
            tracing::error!(error = %e, "failed to load configuration");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_scan_worker(config).await {
        tracing::error!(error = %e, "scan worker exited with error");
        std::process::exit(1);
    }
}
