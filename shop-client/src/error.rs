//! Client error types

use shared::error::{ErrorCode, SyncError};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Client could not be built from its configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Access token missing or rejected
    #[error("Authentication required")]
    Unauthorized,

    /// Access scope does not cover the request
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request was throttled
    #[error("Throttled: {0}")]
    Throttled(String),

    /// Top-level GraphQL error; the message is the remote's own
    #[error("{0}")]
    Graphql(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Unauthorized => ErrorCode::NotAuthenticated,
            Self::Forbidden(_) => ErrorCode::PermissionDenied,
            Self::NotFound(_) => ErrorCode::ProductNotFound,
            Self::Throttled(_) => ErrorCode::Throttled,
            Self::InvalidResponse(_) | Self::Serialization(_) => ErrorCode::InvalidResponse,
            Self::Config(_) => ErrorCode::InvalidRequest,
            Self::Http(_) | Self::Graphql(_) | Self::Internal(_) => ErrorCode::TransportFailed,
        }
    }
}

/// Every client failure is a transport error to the editor
impl From<ClientError> for SyncError {
    fn from(err: ClientError) -> Self {
        SyncError::transport_with_code(err.code(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_sync_error_keeps_message() {
        let err: SyncError = ClientError::Graphql("Field 'x' doesn't exist".into()).into();
        assert_eq!(err.to_string(), "Field 'x' doesn't exist");
        assert_eq!(err.code(), ErrorCode::TransportFailed);

        let err: SyncError = ClientError::Unauthorized.into();
        assert_eq!(err.code(), ErrorCode::NotAuthenticated);
        assert!(matches!(err, SyncError::Transport { .. }));
    }
}
