//! Shared types for the metafield editor
//!
//! Domain models, the error taxonomy, the pure metafield pipeline
//! (codec, schema merge, reconciliation) and the collaborator traits
//! implemented by `shop-client` and consumed by `metafield-editor`.

pub mod error;
pub mod metafield;
pub mod models;
pub mod source;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{ErrorCode, SyncError, SyncResult};
pub use metafield::{Reconciliation, Rejected, WriteBatch, merge, normalize, reconcile};
pub use models::{
    AttributeDefinition, AttributeType, AttributeValue, EditableEntry, PageInfo, PageQuery,
    ProductRecord, WriteCandidate,
};
