//! Collaborator interfaces
//!
//! Remote reads and writes the editor depends on. `shop-client`
//! implements them over the Admin GraphQL API; tests use in-memory fakes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::SyncResult;
use crate::models::{
    AttributeDefinition, AttributeValue, Connection, FilePage, OwnerType, PageQuery,
    ProductHeader, ProductRecord, ReferenceKind, WriteCandidate,
};

/// Stored values of one record, with its header when the record exists
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordAttributes {
    pub product: Option<ProductHeader>,
    pub values: Vec<AttributeValue>,
}

/// Field-level rejection reported by a batch write
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserError {
    #[serde(default)]
    pub field: Vec<String>,
    pub message: String,
    pub code: Option<String>,
}

/// Response of a batch write
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetAttributesResult {
    pub accepted: Vec<AttributeValue>,
    pub user_errors: Vec<UserError>,
}

/// Catalog read
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch one page of products in the order the remote returns them
    async fn list_products(&self, query: &PageQuery) -> SyncResult<Connection<ProductRecord>>;
}

/// Schema read, value read and batch write
#[async_trait]
pub trait MetafieldSource: Send + Sync {
    async fn list_definitions(
        &self,
        owner_type: OwnerType,
        limit: u32,
    ) -> SyncResult<Vec<AttributeDefinition>>;

    async fn record_attributes(&self, record_id: &str) -> SyncResult<RecordAttributes>;

    async fn set_attributes(&self, candidates: &[WriteCandidate])
    -> SyncResult<SetAttributesResult>;
}

/// File listing for file reference pickers
#[async_trait]
pub trait FileSource: Send + Sync {
    async fn list_files(&self, first: u32, after: Option<&str>) -> SyncResult<FilePage>;
}

/// Host-provided modal picker for product/collection/variant references
#[async_trait]
pub trait ResourcePicker: Send + Sync {
    /// Selected resource id, or `None` when the operator picked nothing
    async fn pick(&self, kind: ReferenceKind) -> Option<String>;
}
