//! REST API endpoints for the consensus service
//!
//! Serves the consensus rankings, a health check, and the static frontend.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::error;
use warp::http::StatusCode;
use warp::Filter;

use crate::service::ServiceState;

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Build the consensus from live sources and return it as JSON
pub async fn get_wr_consensus(
    state: Arc<ServiceState>,
) -> Result<impl warp::Reply, warp::Rejection> {
    match state.consensus().await {
        Ok(response) => Ok(warp::reply::with_status(warp::reply::json(&response), StatusCode::OK)),
        Err(e) => {
            // Cause stays in the logs; the client only sees a generic message
            error!("Failed to build consensus: {}", e);
            let body = ErrorResponse { error: "Failed to fetch rankings".to_string() };
            Ok(warp::reply::with_status(
                warp::reply::json(&body),
                StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }
}

/// Create all routes
pub fn create_routes(
    state: Arc<ServiceState>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let static_dir: PathBuf = state.config.server.static_dir.clone();
    let state_filter = warp::any().map(move || state.clone());

    // Consensus endpoint
    let wr_consensus = warp::path!("api" / "wr-consensus")
        .and(warp::get())
        .and(state_filter)
        .and_then(get_wr_consensus);

    // Health check endpoint
    let health = warp::path("health").and(warp::path::end()).and(warp::get()).map(|| {
        warp::reply::json(&serde_json::json!({
            "status": "healthy",
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    });

    // Frontend files
    let static_files = warp::get().and(warp::fs::dir(static_dir));

    wr_consensus
        .or(health)
        .or(static_files)
        .with(warp::cors().allow_any_origin().allow_methods(vec!["GET", "OPTIONS"]))
}
