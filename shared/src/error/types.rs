//! Sync error type

use super::codes::ErrorCode;
use thiserror::Error;

/// Failure of a catalog or metafield operation
///
/// Value-level validation rejections never appear here: the
/// reconciliation step counts and drops them instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// No record id in context; raised before any remote call
    #[error("Missing product ID")]
    MissingIdentifier,

    /// Network or remote-service failure, surfaced verbatim
    #[error("{message}")]
    Transport { code: ErrorCode, message: String },
}

impl SyncError {
    /// Transport failure with the generic code
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            code: ErrorCode::TransportFailed,
            message: message.into(),
        }
    }

    /// Transport failure with a specific code
    pub fn transport_with_code(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Transport {
            code,
            message: message.into(),
        }
    }

    /// Error code for this failure
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::MissingIdentifier => ErrorCode::RequiredField,
            Self::Transport { code, .. } => *code,
        }
    }
}

/// Result type for sync operations
pub type SyncResult<T> = Result<T, SyncError>;
