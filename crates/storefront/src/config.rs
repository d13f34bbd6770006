//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CATALOG_API_URL` - Base URL of the catalog service (e.g., `https://dummyjson.com`)
//!
//! ## Optional
//! - `CATALOG_USER_ID` - User id sent when creating carts (default: 1)
//! - `CATALOG_TIMEOUT_SECS` - Per-request timeout in seconds (default: 10)
//! - `STOREFRONT_PAGE_SIZE` - Products revealed per page (default: 10)
//! - `STOREFRONT_STATE_DIR` - Directory holding persisted state (default: `.cartwheel`)
//! - `STOREFRONT_PERSIST_SLICES` - Comma-separated persistence whitelist
//!   (default: `products,cart,theme`; `search` is never persisted)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Duration;

use cartwheel_core::UserId;
use thiserror::Error;
use url::Url;

use crate::persist::{PersistConfig, SliceName};

const DEFAULT_USER_ID: &str = "1";
const DEFAULT_TIMEOUT_SECS: &str = "10";
const DEFAULT_PAGE_SIZE: &str = "10";
const DEFAULT_STATE_DIR: &str = ".cartwheel";
const DEFAULT_PERSIST_SLICES: &str = "products,cart,theme";

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
    /// Catalog service connection settings
    pub catalog: CatalogConfig,
    /// Number of products revealed per page
    pub page_size: usize,
    /// Directory the file storage adapter writes to
    pub state_dir: PathBuf,
    /// Which slices survive restarts
    pub persist: PersistConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Catalog service connection settings.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the REST API
    pub base_url: Url,
    /// User the active cart is created for
    pub user_id: UserId,
    /// Per-request timeout
    pub timeout: Duration,
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

        let catalog = CatalogConfig::from_env()?;
        let page_size = parse_page_size(&get_env_or_default(
            "STOREFRONT_PAGE_SIZE",
            DEFAULT_PAGE_SIZE,
        ))
        .map_err(|e| ConfigError::InvalidEnvVar("STOREFRONT_PAGE_SIZE".to_string(), e))?;
        let state_dir = PathBuf::from(get_env_or_default("STOREFRONT_STATE_DIR", DEFAULT_STATE_DIR));
        let whitelist = parse_whitelist(&get_env_or_default(
            "STOREFRONT_PERSIST_SLICES",
            DEFAULT_PERSIST_SLICES,
        ))
        .map_err(|e| ConfigError::InvalidEnvVar("STOREFRONT_PERSIST_SLICES".to_string(), e))?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            catalog,
            page_size,
            state_dir,
            persist: PersistConfig {
                whitelist,
                ..PersistConfig::default()
            },
            sentry_dsn,
        })
    }
}

impl CatalogConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = parse_base_url(&get_required_env("CATALOG_API_URL")?)
            .map_err(|e| ConfigError::InvalidEnvVar("CATALOG_API_URL".to_string(), e))?;
        let user_id = get_env_or_default("CATALOG_USER_ID", DEFAULT_USER_ID)
            .parse::<UserId>()
            .map_err(|e| ConfigError::InvalidEnvVar("CATALOG_USER_ID".to_string(), e.to_string()))?;
        let timeout_secs = get_env_or_default("CATALOG_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("CATALOG_TIMEOUT_SECS".to_string(), e.to_string())
            })?;

        Ok(Self {
            base_url,
            user_id,
            timeout: Duration::from_secs(timeout_secs),
        })
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
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse the catalog base URL. Only absolute http(s) URLs with a host are accepted.
fn parse_base_url(value: &str) -> Result<Url, String> {
    let url = Url::parse(value.trim()).map_err(|e| e.to_string())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme '{}'", url.scheme()));
    }
    if url.host_str().is_none() {
        return Err("URL must have a host".to_string());
    }
    Ok(url)
}

/// Parse the page size. Zero would make pagination meaningless.
fn parse_page_size(value: &str) -> Result<usize, String> {
    let size = value.trim().parse::<usize>().map_err(|e| e.to_string())?;
    if size == 0 {
        return Err("must be at least 1".to_string());
    }
    Ok(size)
}

/// Parse a comma-separated persistence whitelist.
fn parse_whitelist(value: &str) -> Result<BTreeSet<SliceName>, String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::parse::<SliceName>)
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_base_url_valid() {
        let url = parse_base_url("https://dummyjson.com").unwrap();
        assert_eq!(url.host_str(), Some("dummyjson.com"));
    }

    #[test]
    fn test_parse_base_url_trailing_slash() {
        assert!(parse_base_url("https://dummyjson.com/").is_ok());
    }

    #[test]
    fn test_parse_base_url_rejects_other_schemes() {
        let err = parse_base_url("ftp://dummyjson.com").unwrap_err();
        assert!(err.contains("unsupported scheme"));
    }

    #[test]
    fn test_parse_base_url_rejects_garbage() {
        assert!(parse_base_url("not a url").is_err());
    }

    #[test]
    fn test_parse_page_size() {
        assert_eq!(parse_page_size("10"), Ok(10));
        assert!(parse_page_size("0").is_err());
        assert!(parse_page_size("-1").is_err());
    }

    #[test]
    fn test_parse_whitelist() {
        let slices = parse_whitelist("products, cart").unwrap();
        assert!(slices.contains(&SliceName::Products));
        assert!(slices.contains(&SliceName::Cart));
        assert!(!slices.contains(&SliceName::Theme));
    }

    #[test]
    fn test_parse_whitelist_empty_disables_persistence() {
        assert!(parse_whitelist("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_whitelist_rejects_search() {
        let err = parse_whitelist("products,search").unwrap_err();
        assert!(err.contains("search"));
    }

    #[test]
    fn test_parse_whitelist_rejects_unknown() {
        assert!(parse_whitelist("products,wishlist").is_err());
    }
}
