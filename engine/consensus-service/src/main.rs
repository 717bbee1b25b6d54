//! Consensus Rankings Service
//!
//! Serves `/api/wr-consensus`, which scrapes every enabled ranking source on
//! each request and returns the merged consensus list.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::info;

use consensus_service::{
    create_routes, graceful_shutdown, initialize_logging, load_config, setup_signal_handlers,
    ServiceState,
};

#[derive(Parser, Debug)]
#[command(name = "consensus-service", version, about = "Consensus fantasy football rankings")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on (overrides config file and PORT)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    dotenv::dotenv().ok();

    // Load configuration
    let config =
        load_config(cli.config.as_deref(), cli.port).context("Failed to load configuration")?;

    // Initialize logging
    initialize_logging(&config.logging)?;

    info!("Starting Consensus Rankings Service v{}", env!("CARGO_PKG_VERSION"));

    let addr = config.server.socket_addr()?;
    let shutdown_timeout = config.server.shutdown_timeout();

    // Create service state
    let state = Arc::new(ServiceState::new(config)?);
    info!("Service state initialized with {} sources", state.source_count());

    // Setup signal handlers for graceful shutdown
    let mut shutdown_signal = setup_signal_handlers()?;

    let routes = create_routes(state);
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let (bound_addr, server) = warp::serve(routes)
        .try_bind_with_graceful_shutdown(addr, async move {
            let _ = stop_rx.await;
        })
        .context("Failed to bind HTTP server")?;

    let server_handle = tokio::spawn(server);
    info!("Server running on {}", bound_addr);

    // Wait for shutdown signal
    shutdown_signal.recv().await;

    info!("Shutdown signal received. Initiating graceful shutdown...");
    graceful_shutdown(stop_tx, server_handle, shutdown_timeout).await?;

    info!("Consensus Rankings Service shutdown complete");
    Ok(())
}
