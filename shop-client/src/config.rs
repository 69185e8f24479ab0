//! Client configuration

/// Admin API version used when none is configured
pub const DEFAULT_API_VERSION: &str = "2025-10";

/// Header carrying the Admin API access token
pub const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Client configuration for the Admin GraphQL API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Shop domain (e.g., "my-shop.myshopify.com")
    pub shop_domain: String,

    /// Admin API access token
    pub access_token: Option<String>,

    /// Admin API version (e.g., "2025-10")
    pub api_version: String,

    /// Request timeout in milliseconds
    pub timeout_ms: u64,

    /// Full GraphQL endpoint, overriding the one derived from the shop domain
    pub endpoint: Option<String>,
}

impl ClientConfig {
    /// Create a configuration for a shop domain
    pub fn new(shop_domain: impl Into<String>) -> Self {
        Self {
            shop_domain: shop_domain.into(),
            access_token: None,
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout_ms: 30_000,
            endpoint: None,
        }
    }

    /// Set the access token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Set the Admin API version
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, millis: u64) -> Self {
        self.timeout_ms = millis;
        self
    }

    /// Point the client at a specific GraphQL endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// GraphQL endpoint URL
    pub fn graphql_url(&self) -> String {
        if let Some(endpoint) = &self.endpoint {
            return endpoint.clone();
        }
        let domain = self
            .shop_domain
            .trim()
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .trim_end_matches('/');
        format!(
            "https://{}/admin/api/{}/graphql.json",
            domain, self.api_version
        )
    }
}
