//! Error codes for the metafield editor
//!
//! Codes are grouped by range:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 6xxx: Metafield errors
//! - 9xxx: Remote/system errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Represented as `u16` on the wire so the host UI can map codes to
/// localized messages without parsing free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Invalid request
    InvalidRequest = 5,
    /// Required identifier missing
    RequiredField = 7,

    // ==================== 1xxx: Auth ====================
    /// Access token missing or rejected
    NotAuthenticated = 1001,

    // ==================== 2xxx: Permission ====================
    /// Access scope does not cover the operation
    PermissionDenied = 2001,

    // ==================== 6xxx: Metafield ====================
    /// Product does not exist
    ProductNotFound = 6003,

    // ==================== 9xxx: System ====================
    /// Network or remote-service failure
    TransportFailed = 9001,
    /// Remote service throttled the request
    Throttled = 9002,
    /// Remote response could not be decoded
    InvalidResponse = 9003,
}

impl ErrorCode {
    /// Numeric value of the code
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Default human-readable message
    pub const fn message(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "Invalid request",
            Self::RequiredField => "Missing product ID",
            Self::NotAuthenticated => "Authentication required",
            Self::PermissionDenied => "Permission denied",
            Self::ProductNotFound => "Product not found",
            Self::TransportFailed => "Failed to load",
            Self::Throttled => "Too many requests",
            Self::InvalidResponse => "Invalid response from remote service",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Returned when a `u16` does not name a known [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            5 => Ok(Self::InvalidRequest),
            7 => Ok(Self::RequiredField),
            1001 => Ok(Self::NotAuthenticated),
            2001 => Ok(Self::PermissionDenied),
            6003 => Ok(Self::ProductNotFound),
            9001 => Ok(Self::TransportFailed),
            9002 => Ok(Self::Throttled),
            9003 => Ok(Self::InvalidResponse),
            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}
