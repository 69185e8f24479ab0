//! Admin API client
//!
//! Implements the shared collaborator traits over GraphQL.

use async_trait::async_trait;
use serde_json::json;

use shared::error::SyncResult;
use shared::models::{
    AttributeDefinition, Connection, FilePage, OwnerType, PageQuery, ProductRecord,
    WriteCandidate,
};
use shared::source::{
    CatalogSource, FileSource, MetafieldSource, RecordAttributes, SetAttributesResult,
};

use crate::queries::{
    DEFINITIONS_QUERY, FILES_QUERY, METAFIELDS_SET_MUTATION, PRODUCT_METAFIELDS_QUERY,
    products_backward, products_forward,
};
use crate::wire::{DefinitionsData, FilesData, MetafieldsSetData, ProductMetafieldsData, ProductsData};
use crate::{ClientConfig, ClientResult, HttpClient};

/// Stored values fetched per product
pub const METAFIELDS_PER_PRODUCT: u32 = 250;

/// Client for one shop's Admin GraphQL API
#[derive(Debug, Clone)]
pub struct AdminClient {
    http: HttpClient,
}

impl AdminClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self {
            http: HttpClient::new(config)?,
        })
    }
}

#[async_trait]
impl CatalogSource for AdminClient {
    async fn list_products(&self, query: &PageQuery) -> SyncResult<Connection<ProductRecord>> {
        let data: ProductsData = match query {
            PageQuery::Forward { first, after } => {
                tracing::debug!(first, after = ?after, "Fetching products");
                self.http
                    .graphql(&products_forward(), &json!({ "first": first, "after": after }))
                    .await?
            }
            PageQuery::Backward { last, before } => {
                tracing::debug!(last, before = %before, "Fetching products backward");
                self.http
                    .graphql(&products_backward(), &json!({ "last": last, "before": before }))
                    .await?
            }
        };
        Ok(data.into())
    }
}

#[async_trait]
impl MetafieldSource for AdminClient {
    async fn list_definitions(
        &self,
        owner_type: OwnerType,
        limit: u32,
    ) -> SyncResult<Vec<AttributeDefinition>> {
        let variables = json!({ "ownerType": owner_type.as_str(), "first": limit });
        let data: DefinitionsData = self.http.graphql(DEFINITIONS_QUERY, &variables).await?;
        let definitions: Vec<AttributeDefinition> = data.into();
        tracing::debug!(count = definitions.len(), "Fetched metafield definitions");
        Ok(definitions)
    }

    async fn record_attributes(&self, record_id: &str) -> SyncResult<RecordAttributes> {
        let variables = json!({ "id": record_id, "first": METAFIELDS_PER_PRODUCT });
        let data: ProductMetafieldsData =
            self.http.graphql(PRODUCT_METAFIELDS_QUERY, &variables).await?;
        let record: RecordAttributes = data.into();
        tracing::debug!(
            record_id,
            found = record.product.is_some(),
            count = record.values.len(),
            "Fetched product metafields"
        );
        Ok(record)
    }

    async fn set_attributes(
        &self,
        candidates: &[WriteCandidate],
    ) -> SyncResult<SetAttributesResult> {
        let variables = json!({ "metafields": candidates });
        let data: MetafieldsSetData = self.http.graphql(METAFIELDS_SET_MUTATION, &variables).await?;
        let result: SetAttributesResult = data.into();
        if !result.user_errors.is_empty() {
            tracing::warn!(count = result.user_errors.len(), "metafieldsSet reported user errors");
        }
        Ok(result)
    }
}

#[async_trait]
impl FileSource for AdminClient {
    async fn list_files(&self, first: u32, after: Option<&str>) -> SyncResult<FilePage> {
        let variables = json!({ "first": first, "after": after });
        let data: FilesData = self.http.graphql(FILES_QUERY, &variables).await?;
        Ok(data.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::{ErrorCode, SyncError};

    #[test]
    fn test_candidates_serialize_as_set_input() {
        let candidates = vec![WriteCandidate {
            owner_id: "gid://shopify/Product/1".into(),
            namespace: "custom".into(),
            key: "color".into(),
            value: "blue".into(),
            ty: shared::AttributeType::Text,
        }];
        let variables = json!({ "metafields": candidates });
        assert_eq!(
            variables,
            json!({"metafields": [{
                "ownerId": "gid://shopify/Product/1",
                "namespace": "custom",
                "key": "color",
                "value": "blue",
                "type": "single_line_text_field"
            }]})
        );
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let config = ClientConfig::new("shop.invalid")
            .with_token("token")
            .with_endpoint("http://127.0.0.1:9/graphql.json")
            .with_timeout(2_000);
        let client = AdminClient::new(&config).unwrap();

        let err = client
            .list_definitions(OwnerType::Product, 250)
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::Transport { code: ErrorCode::TransportFailed, .. }));
    }
}
