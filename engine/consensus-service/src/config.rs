//! Service configuration management

use ranking_scraper::{default_sources, ScraperSettings, SourceConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::error::{Result, ServiceError};

/// Main service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// HTTP server configuration
    pub server: ServerSettings,

    /// HTTP client settings for the ranking sources
    pub scraper: ScraperSettings,

    /// Ranking sources to aggregate
    pub sources: Vec<SourceConfig>,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Interface to bind
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Directory served for paths outside the API
    pub static_dir: PathBuf,

    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout_secs: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (json, pretty)
    pub format: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            scraper: ScraperSettings::default(),
            sources: default_sources(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            static_dir: PathBuf::from("public"),
            shutdown_timeout_secs: 10,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: "pretty".to_string() }
    }
}

impl ServerSettings {
    /// Address the server binds to
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port).parse().map_err(|e| {
            ServiceError::Config(format!("Invalid listen address {}:{}: {}", self.host, self.port, e))
        })
    }

    pub fn shutdown_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.shutdown_timeout_secs)
    }
}

impl ServiceConfig {
    /// Sources that will be fetched
    pub fn enabled_sources(&self) -> impl Iterator<Item = &SourceConfig> {
        self.sources.iter().filter(|source| source.enabled)
    }
}

/// Load configuration from an optional file and environment variables
///
/// Precedence, lowest first: defaults, config file, environment, `port_override`.
pub fn load_config(config_file: Option<&Path>, port_override: Option<u16>) -> Result<ServiceConfig> {
    let mut config = match config_file {
        Some(path) => {
            tracing::debug!("Loading configuration from file: {:?}", path);
            load_from_file(path)?
        }
        None => ServiceConfig::default(),
    };

    // Override with environment variables
    load_from_env(&mut config)?;

    if let Some(port) = port_override {
        config.server.port = port;
    }

    // Validate configuration
    validate_config(&config)?;

    Ok(config)
}

/// Load configuration from a TOML (or any format `config` understands) file
fn load_from_file(path: &Path) -> Result<ServiceConfig> {
    if !path.exists() {
        return Err(ServiceError::Config(format!("Config file not found: {}", path.display())));
    }

    let settings =
        ::config::Config::builder().add_source(::config::File::from(path.to_path_buf())).build()?;

    Ok(settings.try_deserialize()?)
}

/// Load configuration from environment variables
fn load_from_env(config: &mut ServiceConfig) -> Result<()> {
    if let Ok(port) = std::env::var("PORT") {
        config.server.port = port
            .parse()
            .map_err(|_| ServiceError::Config(format!("Invalid PORT value: {port}")))?;
    }

    if let Ok(host) = std::env::var("CONSENSUS_HOST") {
        config.server.host = host;
    }

    if let Ok(static_dir) = std::env::var("CONSENSUS_STATIC_DIR") {
        config.server.static_dir = PathBuf::from(static_dir);
    }

    if let Ok(level) = std::env::var("CONSENSUS_LOG_LEVEL") {
        config.logging.level = level;
    }

    if let Ok(format) = std::env::var("CONSENSUS_LOG_FORMAT") {
        config.logging.format = format;
    }

    Ok(())
}

/// Validate configuration
pub fn validate_config(config: &ServiceConfig) -> Result<()> {
    // Validate log level
    match config.logging.level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => {
            return Err(ServiceError::Config(format!("Invalid log level: {}", config.logging.level)))
        }
    }

    // Validate log format
    match config.logging.format.as_str() {
        "json" | "pretty" => {}
        _ => {
            return Err(ServiceError::Config(format!(
                "Invalid log format: {}",
                config.logging.format
            )))
        }
    }

    if config.server.port == 0 {
        return Err(ServiceError::Config("Invalid server port: 0".to_string()));
    }

    config.server.socket_addr()?;

    // Source ids become keys in every player's ranks, so they must be distinct
    let mut seen = HashSet::new();
    for source in &config.sources {
        if source.id.trim().is_empty() {
            return Err(ServiceError::Config("Ranking source with empty id".to_string()));
        }
        if !seen.insert(source.id.as_str()) {
            return Err(ServiceError::Config(format!("Duplicate ranking source: {}", source.id)));
        }
        if source.enabled && source.url.trim().is_empty() {
            return Err(ServiceError::Config(format!(
                "Ranking source '{}' is enabled but has no url",
                source.id
            )));
        }
    }

    if config.enabled_sources().next().is_none() {
        return Err(ServiceError::Config("No ranking sources enabled".to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = ServiceConfig::default();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.static_dir, PathBuf::from("public"));
        assert_eq!(config.enabled_sources().count(), 1);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_socket_addr() {
        let settings = ServerSettings { host: "127.0.0.1".to_string(), ..Default::default() };
        assert_eq!(settings.socket_addr().unwrap(), "127.0.0.1:3000".parse().unwrap());

        let bad = ServerSettings { host: "not a host".to_string(), ..Default::default() };
        assert!(bad.socket_addr().is_err());
    }

    #[test]
    fn test_rejects_invalid_log_level() {
        let mut config = ServiceConfig::default();
        config.logging.level = "verbose".to_string();
        assert!(matches!(validate_config(&config), Err(ServiceError::Config(_))));
    }

    #[test]
    fn test_rejects_invalid_log_format() {
        let mut config = ServiceConfig::default();
        config.logging.format = "xml".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_rejects_duplicate_sources() {
        let mut config = ServiceConfig::default();
        config.sources.push(SourceConfig::new("cbs", "https://example.com/other"));

        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("Duplicate ranking source: cbs"));
    }

    #[test]
    fn test_rejects_no_enabled_sources() {
        let mut config = ServiceConfig::default();
        for source in &mut config.sources {
            source.enabled = false;
        }
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_rejects_enabled_source_without_url() {
        let mut config = ServiceConfig::default();
        config.sources[1].enabled = true;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            r#"
[server]
port = 8080
static_dir = "site"

[logging]
level = "debug"

[[sources]]
id = "cbs"
url = "https://www.cbssports.com/fantasy/football/rankings/ppr/WR/"

[[sources]]
id = "fp"
url = "https://example.com/fp"
rank_column = 0
name_column = 2
team_column = 3
"#
        )
        .unwrap();

        let config = load_from_file(file.path()).unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.static_dir, PathBuf::from("site"));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.sources.len(), 2);
        assert_eq!(config.sources[1].name_column, 2);
        assert!(config.sources[1].enabled);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_missing_config_file() {
        let result = load_from_file(Path::new("/nonexistent/consensus.toml"));
        assert!(matches!(result, Err(ServiceError::Config(_))));
    }

    // The only test touching process env; it restores every variable it sets
    #[test]
    fn test_load_config_env_overrides() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            r#"
[server]
port = 8080

[logging]
format = "pretty"
"#
        )
        .unwrap();

        std::env::set_var("PORT", "8081");
        std::env::set_var("CONSENSUS_LOG_FORMAT", "json");
        let from_env = load_config(Some(file.path()), None);
        let from_cli = load_config(Some(file.path()), Some(9000));

        std::env::set_var("PORT", "abc");
        let bad_port = load_config(Some(file.path()), None);

        std::env::remove_var("PORT");
        std::env::set_var("CONSENSUS_LOG_LEVEL", "verbose");
        let bad_level = load_config(Some(file.path()), None);

        std::env::remove_var("CONSENSUS_LOG_LEVEL");
        std::env::remove_var("CONSENSUS_LOG_FORMAT");

        let from_env = from_env.unwrap();
        assert_eq!(from_env.server.port, 8081);
        assert_eq!(from_env.logging.format, "json");
        assert_eq!(from_cli.unwrap().server.port, 9000);
        assert!(matches!(bad_port, Err(ServiceError::Config(ref msg)) if msg.contains("abc")));
        assert!(matches!(bad_level, Err(ServiceError::Config(ref msg)) if msg.contains("verbose")));
    }
}
