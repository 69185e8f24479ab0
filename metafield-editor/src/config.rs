use shared::models::DEFAULT_PAGE_SIZE;
use shop_client::ClientConfig;
use shop_client::config::DEFAULT_API_VERSION;
use thiserror::Error;

/// Definitions fetched per load
pub const DEFAULT_DEFINITIONS_LIMIT: u32 = 250;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
}

/// Editor configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | SHOP_DOMAIN | required | shop domain, e.g. my-shop.myshopify.com |
/// | SHOP_ACCESS_TOKEN | required | Admin API access token |
/// | SHOP_API_VERSION | 2025-10 | Admin API version |
/// | REQUEST_TIMEOUT_MS | 30000 | HTTP timeout (ms) |
/// | PAGE_SIZE | 50 | catalog page size |
/// | DEFINITIONS_LIMIT | 250 | definitions fetched per load |
/// | LOG_LEVEL | info | filter used when RUST_LOG is unset |
/// | LOG_DIR | unset | enables daily-rolling file logs |
#[derive(Debug, Clone)]
pub struct Config {
    pub shop_domain: String,
    pub access_token: String,
    pub api_version: String,
    pub request_timeout_ms: u64,
    pub page_size: u32,
    pub definitions_limit: u32,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`; unset and blank values are treated alike
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let required = |name: &'static str| var(name).ok_or(ConfigError::Missing(name));

        Ok(Self {
            shop_domain: required("SHOP_DOMAIN")?,
            access_token: required("SHOP_ACCESS_TOKEN")?,
            api_version: var("SHOP_API_VERSION").unwrap_or_else(|| DEFAULT_API_VERSION.into()),
            request_timeout_ms: var("REQUEST_TIMEOUT_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(30000),
            page_size: var("PAGE_SIZE")
                .and_then(|v| v.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_PAGE_SIZE),
            definitions_limit: var("DEFINITIONS_LIMIT")
                .and_then(|v| v.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_DEFINITIONS_LIMIT),
            log_level: var("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: var("LOG_DIR"),
        })
    }

    /// Admin API client configuration
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(&self.shop_domain)
            .with_token(&self.access_token)
            .with_api_version(&self.api_version)
            .with_timeout(self.request_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[
            ("SHOP_DOMAIN", "demo.myshopify.com"),
            ("SHOP_ACCESS_TOKEN", "shpat_x"),
        ])
        .unwrap();
        assert_eq!(config.api_version, "2025-10");
        assert_eq!(config.request_timeout_ms, 30000);
        assert_eq!(config.page_size, 50);
        assert_eq!(config.definitions_limit, 250);
        assert_eq!(config.log_level, "info");
        assert!(config.log_dir.is_none());
        assert_eq!(
            config.client_config().graphql_url(),
            "https://demo.myshopify.com/admin/api/2025-10/graphql.json"
        );
    }

    #[test]
    fn test_required_and_invalid_values() {
        assert_eq!(
            load(&[("SHOP_ACCESS_TOKEN", "x")]).unwrap_err(),
            ConfigError::Missing("SHOP_DOMAIN")
        );
        assert_eq!(
            load(&[("SHOP_DOMAIN", "demo"), ("SHOP_ACCESS_TOKEN", "  ")]).unwrap_err(),
            ConfigError::Missing("SHOP_ACCESS_TOKEN")
        );

        let config = load(&[
            ("SHOP_DOMAIN", "demo"),
            ("SHOP_ACCESS_TOKEN", "x"),
            ("PAGE_SIZE", "0"),
            ("REQUEST_TIMEOUT_MS", "soon"),
            ("SHOP_API_VERSION", "2024-07"),
        ])
        .unwrap();
        assert_eq!(config.page_size, 50);
        assert_eq!(config.request_timeout_ms, 30000);
        assert_eq!(config.api_version, "2024-07");
    }
}
