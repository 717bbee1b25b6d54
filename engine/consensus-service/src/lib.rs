//! Consensus Rankings Service Library
//!
//! HTTP front end for the consensus builder: configuration, logging, the warp
//! routes, and graceful shutdown handling.

pub mod config;
pub mod error;
pub mod logging;
pub mod rest_api;
pub mod service;
pub mod signals;

pub use self::config::{load_config, ServiceConfig};
pub use error::{Result, ServiceError};
pub use logging::initialize_logging;
pub use rest_api::create_routes;
pub use service::ServiceState;
pub use signals::{graceful_shutdown, setup_signal_handlers};
