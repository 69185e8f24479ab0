//! Data models
//!
//! Shared between the remote client and the editor. Field names
//! serialize in camelCase, matching what the host UI consumes.

pub mod file;
pub mod metafield;
pub mod page;
pub mod product;

// Re-exports
pub use file::*;
pub use metafield::*;
pub use page::*;
pub use product::*;
