//! ble-sniffer - passive BLE advertisement capture
//!
//! Needs raw radio access; run with elevated privileges.

use clap::Parser;
use tracing::{error, info};

use sniffer_cli::{app::SnifferApp, cli::Cli, config::AppConfig};

#[tokio::main]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Configuration decides verbosity, so resolve it before logging starts
    let config = AppConfig::resolve(&cli);
    let verbose = config
        .as_ref()
        .map(|config| config.logging.verbose)
        .unwrap_or(cli.verbose);
    setup_logging(verbose);

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(2);
        }
    };

    match SnifferApp::new(config).run().await {
        Ok(stats) => info!("Sniffer exited: {}", stats),
        Err(e) => {
            error!("Sniffer stopped: {}", e);
            std::process::exit(1);
        }
    }
}

/// Setup logging based on verbosity level
fn setup_logging(verbose: bool) {
    let log_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
