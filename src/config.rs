//! Configuration loading and constants.
//!
//! Loads application configuration from a TOML file and defines the defaults used
//! when a value (or the whole file) is absent. `AppConfig` is the root configuration
//! struct; deployment overrides for host and port are applied on top of it.

use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use const_format::formatcp;
use serde::Deserialize;

use crate::catalog::builtin_quotes;

// =============================================================================
// HTTP Response Cache Control
// =============================================================================

/// Every quote response is a fresh draw, so nothing may be cached upstream.
pub const CACHE_CONTROL_NO_STORE: &str = "no-store";

/// Response header carrying the per-request correlation id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Log target of this crate
const CRATE_NAME: &str = env!("CARGO_CRATE_NAME");

/// Default log filter when neither --log-level nor RUST_LOG is set
pub const DEFAULT_LOG_FILTER: &str = formatcp!("{}=debug,tower_http=info", CRATE_NAME);

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

/// Default listen address (all interfaces, so the container port can be published)
pub const DEFAULT_HTTP_HOST: &str = "0.0.0.0";

/// Default listen port
pub const DEFAULT_HTTP_PORT: u16 = 8080;

/// Maximum time in seconds to drain in-flight requests on shutdown
pub const DEFAULT_SHUTDOWN_GRACE_SECS: u64 = 30;

/// Log formats accepted by `[logging] format`
const LOG_FORMATS: [&str; 2] = ["text", "json"];

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// Quote catalog configuration
    #[serde(default)]
    pub quotes: QuotesConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// File the configuration was read from, `None` when running on defaults
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: String,
    #[serde(default = "HttpServerConfig::default_port")]
    pub port: u16,
    /// Path answering liveness probes. Unset means every path serves quotes.
    pub health_path: Option<String>,
    /// Seconds to wait for in-flight requests after SIGINT/SIGTERM
    #[serde(default = "HttpServerConfig::default_shutdown_grace")]
    pub shutdown_grace_seconds: u64,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            health_path: None,
            shutdown_grace_seconds: Self::default_shutdown_grace(),
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> String {
        DEFAULT_HTTP_HOST.to_string()
    }

    fn default_port() -> u16 {
        DEFAULT_HTTP_PORT
    }

    fn default_shutdown_grace() -> u64 {
        DEFAULT_SHUTDOWN_GRACE_SECS
    }

    /// Socket address to bind, built from `host` and `port`.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.host.parse().map_err(|_| {
            ConfigError::Validation(format!(
                "http.host must be an IP address, got '{}'",
                self.host
            ))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Quote catalog configuration
#[derive(Debug, Clone, Deserialize)]
pub struct QuotesConfig {
    /// Quotes to serve. Defaults to the built-in list when the key is absent.
    #[serde(default = "QuotesConfig::default_catalog")]
    pub catalog: Vec<String>,
    /// Fixed seed for the selector. Unset seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for QuotesConfig {
    fn default() -> Self {
        Self {
            catalog: Self::default_catalog(),
            seed: None,
        }
    }
}

impl QuotesConfig {
    fn default_catalog() -> Vec<String> {
        builtin_quotes()
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    #[serde(default = "LoggingConfig::default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl LoggingConfig {
    fn default_format() -> String {
        DEFAULT_LOG_FORMAT.to_string()
    }

    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}

impl AppConfig {
    /// Load configuration from `path`.
    ///
    /// A missing file is not an error: the defaults are returned so the service
    /// can run without a mounted config. Unreadable or malformed files are.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                let mut config = Self::from_toml(&contents)?;
                config.source = Some(path.to_path_buf());
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply deployment overrides (CLI flags or environment) on top of the file.
    pub fn apply_overrides(
        &mut self,
        host: Option<String>,
        port: Option<u16>,
    ) -> Result<(), ConfigError> {
        if let Some(host) = host {
            self.http.host = host;
        }
        if let Some(port) = port {
            self.http.port = port;
        }
        self.validate()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::Validation(format!(
                "logging.format must be one of {:?}, got '{}'",
                LOG_FORMATS, self.logging.format
            )));
        }

        if let Some(path) = &self.http.health_path {
            if !is_literal_subpath(path) {
                return Err(ConfigError::Validation(format!(
                    "http.health_path must be a literal path below '/', got '{}'",
                    path
                )));
            }
        }

        self.http.socket_addr()?;
        Ok(())
    }
}

/// A route path with no capture or wildcard segments that is not the root.
///
/// The root belongs to the quote handler, and axum panics on `:`/`*` segments.
fn is_literal_subpath(path: &str) -> bool {
    let Some(rest) = path.strip_prefix('/') else {
        return false;
    };
    !rest.is_empty()
        && !path.contains(['{', '}'])
        && rest
            .split('/')
            .all(|segment| !segment.starts_with(':') && !segment.starts_with('*'))
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}
