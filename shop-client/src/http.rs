//! GraphQL-over-HTTP transport

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::ACCESS_TOKEN_HEADER;
use crate::{ClientConfig, ClientError, ClientResult};

#[derive(Serialize)]
struct GraphqlRequest<'a, V: ?Sized> {
    query: &'a str,
    variables: &'a V,
}

/// Top-level GraphQL error entry
#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlError {
    pub message: String,
    #[serde(default)]
    pub extensions: Option<serde_json::Value>,
}

impl GraphqlError {
    fn code(&self) -> Option<&str> {
        self.extensions.as_ref()?.get("code")?.as_str()
    }
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Option<GraphqlErrors>,
}

/// The Admin API reports errors either as a list or, for auth failures, as a bare string
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GraphqlErrors {
    List(Vec<GraphqlError>),
    Message(String),
}

/// HTTP client for the Admin GraphQL endpoint
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    url: String,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &config.access_token {
            let value = HeaderValue::from_str(token)
                .map_err(|e| ClientError::Config(format!("access token: {e}")))?;
            headers.insert(ACCESS_TOKEN_HEADER, value);
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            url: config.graphql_url(),
        })
    }

    /// GraphQL endpoint this client posts to
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Run a query or mutation and decode its `data`
    pub async fn graphql<T, V>(&self, query: &str, variables: &V) -> ClientResult<T>
    where
        T: DeserializeOwned,
        V: Serialize + ?Sized,
    {
        let body = GraphqlRequest { query, variables };
        let response = self.client.post(&self.url).json(&body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::warn!(status = %status, "Admin API request failed");
            return Err(match status {
                StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
                StatusCode::FORBIDDEN => ClientError::Forbidden(text),
                StatusCode::NOT_FOUND => ClientError::NotFound(text),
                StatusCode::TOO_MANY_REQUESTS => ClientError::Throttled(text),
                _ => ClientError::Internal(format!("{status}: {text}")),
            });
        }

        decode_graphql(&text)
    }
}

/// Decode a GraphQL response body
///
/// Any top-level error fails the whole call with the first error's message.
pub fn decode_graphql<T: DeserializeOwned>(body: &str) -> ClientResult<T> {
    let response: GraphqlResponse<T> = serde_json::from_str(body)?;

    match response.errors {
        Some(GraphqlErrors::List(errors)) if !errors.is_empty() => {
            let first = &errors[0];
            if first.code() == Some("THROTTLED") {
                return Err(ClientError::Throttled(first.message.clone()));
            }
            return Err(ClientError::Graphql(first.message.clone()));
        }
        Some(GraphqlErrors::Message(message)) => return Err(ClientError::Graphql(message)),
        _ => {}
    }

    response
        .data
        .ok_or_else(|| ClientError::InvalidResponse("Missing data".to_string()))
}
