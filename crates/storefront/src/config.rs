//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_ROOT_DOMAIN` - Platform root domain; subdomains of this
//!   resolve to spaces (default: merchspace.shop)
//! - `STOREFRONT_DEV_HOSTS` - Comma-separated host names on which the
//!   `_space` query override is honored (default: localhost,127.0.0.1)
//! - `SPACES_DIR` - Directory of per-space config files (default: spaces)
//! - `SPACE_CACHE_TTL_SECS` - Registry cache TTL (default: 300)
//! - `CATALOG_API_URL` - Upstream commerce API base URL (default: <http://127.0.0.1:8000>)
//! - `CATALOG_TIMEOUT_SECS` - Upstream request timeout (default: 5)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Sentry error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Sentry trace sample rate (default: 0.1)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Platform root domain; `{label}.{root_domain}` resolves to space `label`
    pub root_domain: String,
    /// Host names on which the `_space` query override is honored
    pub dev_hosts: Vec<String>,
    /// Space registry configuration
    pub spaces: SpacesConfig,
    /// Upstream commerce API configuration
    pub catalog: CatalogConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Sentry error event sample rate
    pub sentry_sample_rate: f32,
    /// Sentry performance trace sample rate
    pub sentry_traces_sample_rate: f32,
}

/// Space registry configuration.
#[derive(Debug, Clone)]
pub struct SpacesConfig {
    /// Directory containing `<id>/space.yaml` config files
    pub dir: PathBuf,
    /// Time-to-live for cached space configs, in seconds
    pub cache_ttl_secs: u64,
}

/// Upstream commerce API configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the commerce API (products, carts)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;
        let base_url = get_required_env("STOREFRONT_BASE_URL")?;
        let root_domain =
            normalize_domain(&get_env_or_default("STOREFRONT_ROOT_DOMAIN", "merchspace.shop"));
        let dev_hosts = parse_host_list(&get_env_or_default(
            "STOREFRONT_DEV_HOSTS",
            "localhost,127.0.0.1",
        ));

        let spaces = SpacesConfig {
            dir: PathBuf::from(get_env_or_default("SPACES_DIR", "spaces")),
            cache_ttl_secs: parse_env_or_default("SPACE_CACHE_TTL_SECS", 300)?,
        };

        let catalog = CatalogConfig {
            base_url: get_env_or_default("CATALOG_API_URL", "http://127.0.0.1:8000")
                .trim_end_matches('/')
                .to_string(),
            timeout_secs: parse_env_or_default("CATALOG_TIMEOUT_SECS", 5)?,
        };

        Ok(Self {
            host,
            port,
            base_url,
            root_domain,
            dev_hosts,
            spaces,
            catalog,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_env_or_default("SENTRY_SAMPLE_RATE", 1.0)?,
            sentry_traces_sample_rate: parse_env_or_default("SENTRY_TRACES_SAMPLE_RATE", 0.1)?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get an environment variable parsed to `T`, with a default value.
fn parse_env_or_default<T: std::str::FromStr>(key: &str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(value) => value
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        Err(_) => Ok(default),
    }
}

/// Normalize a configured domain: lowercase, no scheme, no leading dot.
fn normalize_domain(domain: &str) -> String {
    domain
        .trim()
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_start_matches('.')
        .trim_end_matches('/')
        .to_lowercase()
}

/// Parse a comma-separated host list: trimmed, lowercased, empties dropped.
fn parse_host_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|h| h.trim().to_lowercase())
        .filter(|h| !h.is_empty())
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_host_list() {
        assert_eq!(
            parse_host_list("localhost, 127.0.0.1 ,Dev.Local,"),
            vec!["localhost", "127.0.0.1", "dev.local"]
        );
        assert!(parse_host_list("").is_empty());
    }

    #[test]
    fn test_normalize_domain() {
        assert_eq!(normalize_domain("Merchspace.Shop"), "merchspace.shop");
        assert_eq!(normalize_domain("https://merchspace.shop/"), "merchspace.shop");
        assert_eq!(normalize_domain(".merchspace.shop"), "merchspace.shop");
    }

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            root_domain: "merchspace.shop".to_string(),
            dev_hosts: vec!["localhost".to_string()],
            spaces: SpacesConfig {
                dir: PathBuf::from("spaces"),
                cache_ttl_secs: 300,
            },
            catalog: CatalogConfig {
                base_url: "http://127.0.0.1:8000".to_string(),
                timeout_secs: 5,
            },
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.1,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }
}
