//! Error system for the metafield editor
//!
//! - [`ErrorCode`]: stable numeric codes for every failure class
//! - [`SyncError`]: the error returned by catalog and metafield operations
//!
//! # Example
//!
//! ```
//! use shared::error::{ErrorCode, SyncError};
//!
//! let err = SyncError::transport("Internal error. Looks like something went wrong on our end.");
//! assert_eq!(err.code(), ErrorCode::TransportFailed);
//! assert_eq!(SyncError::MissingIdentifier.code(), ErrorCode::RequiredField);
//! ```

mod codes;
mod types;

pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{SyncError, SyncResult};
