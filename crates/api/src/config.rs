//! Application configuration loaded from environment variables.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Errors found while reading configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown SERVICE {0:?}: expected cart, pricing, wallet, inventory or catalog")]
    UnknownService(String),

    #[error("unknown LOG_FORMAT {0:?}: expected pretty or json")]
    UnknownLogFormat(String),

    #[error("{0} must be set for the {1} service")]
    Missing(&'static str, ServiceKind),
}

/// Which of the storefront services this process serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServiceKind {
    #[default]
    Cart,
    Pricing,
    Wallet,
    Inventory,
    Catalog,
}

impl ServiceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceKind::Cart => "cart",
            ServiceKind::Pricing => "pricing",
            ServiceKind::Wallet => "wallet",
            ServiceKind::Inventory => "inventory",
            ServiceKind::Catalog => "catalog",
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cart" => Ok(ServiceKind::Cart),
            "pricing" => Ok(ServiceKind::Pricing),
            "wallet" => Ok(ServiceKind::Wallet),
            "inventory" => Ok(ServiceKind::Inventory),
            "catalog" => Ok(ServiceKind::Catalog),
            _ => Err(ConfigError::UnknownService(s.to_string())),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::UnknownLogFormat(s.to_string())),
        }
    }
}

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `SERVICE`: which service to run (default: `"cart"`)
/// - `HOST`: bind address (default: `"0.0.0.0"`)
/// - `PORT`: listen port (default: `8080`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `LOG_FORMAT`: `pretty` or `json` (default: `pretty`)
/// - `PRICING_URL`: pricing service base URL (default:
///   `http://localhost:{PRICING_PORT}`, with `PRICING_PORT` defaulting to `8080`)
/// - `DOWNSTREAM_TIMEOUT_MS`: bound on each outbound call (default: `5000`)
/// - `DATABASE_URL`: PostgreSQL URL, required by inventory, optional for catalog
#[derive(Debug, Clone)]
pub struct Config {
    pub service: ServiceKind,
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_format: LogFormat,
    pub pricing_url: String,
    pub downstream_timeout: Duration,
    pub database_url: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let service = match var("SERVICE") {
            Some(s) => s.parse()?,
            None => defaults.service,
        };
        let log_format = match var("LOG_FORMAT") {
            Some(s) => s.parse()?,
            None => defaults.log_format,
        };
        let pricing_port: u16 = var("PRICING_PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let config = Self {
            service,
            host: var("HOST").unwrap_or(defaults.host),
            port: var("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            log_level: var("RUST_LOG").unwrap_or(defaults.log_level),
            log_format,
            pricing_url: var("PRICING_URL")
                .unwrap_or_else(|| format!("http://localhost:{pricing_port}")),
            downstream_timeout: var("DOWNSTREAM_TIMEOUT_MS")
                .and_then(|t| t.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.downstream_timeout),
            database_url: var("DATABASE_URL"),
        };

        if config.service == ServiceKind::Inventory && config.database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL", config.service));
        }

        Ok(config)
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceKind::Cart,
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            pricing_url: "http://localhost:8080".to_string(),
            downstream_timeout: Duration::from_millis(5000),
            database_url: None,
        }
    }
}
