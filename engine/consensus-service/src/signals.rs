//! Signal handling for graceful shutdown

use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{error, info, warn};

use crate::error::Result;

/// Setup signal handlers for graceful shutdown
///
/// The returned receiver yields once Ctrl+C or SIGTERM arrives.
pub fn setup_signal_handlers() -> Result<mpsc::Receiver<()>> {
    let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

    // Handle Ctrl+C (SIGINT)
    let ctrl_c_tx = shutdown_tx.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C signal: {}", e);
            return;
        }

        info!("Ctrl+C signal received");
        let _ = ctrl_c_tx.send(()).await;
    });

    // Handle SIGTERM (Unix only)
    #[cfg(unix)]
    {
        use signal_hook::consts::SIGTERM;
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;

        let shutdown_flag = Arc::new(AtomicBool::new(false));
        signal_hook::flag::register(SIGTERM, shutdown_flag.clone())?;

        tokio::spawn(async move {
            // Poll for signal
            loop {
                if shutdown_flag.load(Ordering::Relaxed) {
                    info!("SIGTERM signal received");
                    let _ = shutdown_tx.send(()).await;
                    break;
                }
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
        });
    }

    Ok(shutdown_rx)
}

/// Stop the HTTP server and wait for in-flight requests, up to `shutdown_timeout`
pub async fn graceful_shutdown(
    stop_server: oneshot::Sender<()>,
    server_handle: JoinHandle<()>,
    shutdown_timeout: Duration,
) -> Result<()> {
    info!("Starting graceful shutdown...");

    if stop_server.send(()).is_err() {
        warn!("HTTP server already stopped");
    }

    match timeout(shutdown_timeout, server_handle).await {
        Ok(Ok(())) => {
            info!("HTTP server stopped gracefully");
        }
        Ok(Err(e)) => {
            error!("HTTP server task failed: {}", e);
        }
        Err(_) => {
            warn!("HTTP server did not stop within timeout, forcing shutdown");
        }
    }

    info!("Graceful shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_graceful_shutdown_stops_server_task() {
        let (stop_tx, stop_rx) = oneshot::channel();
        let handle = tokio::spawn(async move {
            let _ = stop_rx.await;
        });

        graceful_shutdown(stop_tx, handle, Duration::from_secs(1)).await.unwrap();
    }

    #[tokio::test]
    async fn test_graceful_shutdown_times_out() {
        let (stop_tx, _stop_rx) = oneshot::channel();
        let handle = tokio::spawn(async {
            tokio::time::sleep(Duration::from_secs(60)).await;
        });

        let started = std::time::Instant::now();
        graceful_shutdown(stop_tx, handle, Duration::from_millis(50)).await.unwrap();
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
