//! Admin GraphQL response shapes and their conversion into shared models

use chrono::{DateTime, Utc};
use serde::Deserialize;

use shared::models::{
    AttributeDefinition, AttributeType, AttributeValue, Connection, DefinitionValidation,
    FileItem, FilePage, FilePageInfo, ImageRef, Money, PageInfo, ProductHeader, ProductRecord,
};
use shared::source::{RecordAttributes, SetAttributesResult, UserError};

#[derive(Debug, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

#[derive(Debug, Deserialize)]
pub struct Edges<T> {
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
}

// =============================================================================
// Products
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct ProductsData {
    pub products: Option<ProductConnection>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductConnection {
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<ProductNode>>,
    #[serde(default)]
    pub page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductNode {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub handle: String,
    #[serde(default)]
    pub status: String,
    pub total_inventory: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
    pub featured_image: Option<ImageRef>,
    pub price_range_v2: Option<PriceRange>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    pub min_variant_price: Option<Money>,
}

impl From<ProductNode> for ProductRecord {
    fn from(node: ProductNode) -> Self {
        Self {
            id: node.id,
            title: node.title,
            handle: node.handle,
            status: node.status,
            total_inventory: node.total_inventory.unwrap_or(0),
            created_at: node.created_at,
            featured_image: node.featured_image,
            min_price: node.price_range_v2.and_then(|p| p.min_variant_price),
        }
    }
}

impl From<ProductsData> for Connection<ProductRecord> {
    fn from(data: ProductsData) -> Self {
        match data.products {
            Some(conn) => Connection::new(
                conn.edges.into_iter().map(|e| e.node.into()).collect(),
                conn.page_info,
            ),
            None => Connection::empty(),
        }
    }
}

// =============================================================================
// Definitions
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinitionsData {
    pub metafield_definitions: Option<DefinitionNodes>,
}

#[derive(Debug, Deserialize)]
pub struct DefinitionNodes {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<DefinitionNode>,
}

#[derive(Debug, Deserialize)]
pub struct DefinitionNode {
    pub name: Option<String>,
    pub namespace: String,
    pub key: String,
    #[serde(rename = "type")]
    pub ty: Option<TypeName>,
    #[serde(default)]
    pub validations: Vec<DefinitionValidation>,
}

#[derive(Debug, Deserialize)]
pub struct TypeName {
    pub name: String,
}

impl From<DefinitionNode> for AttributeDefinition {
    fn from(node: DefinitionNode) -> Self {
        let ty = node
            .ty
            .map(|t| AttributeType::parse(&t.name))
            .unwrap_or_default();
        Self {
            namespace: node.namespace,
            key: node.key,
            display_name: node.name.unwrap_or_default(),
            ty,
            validations: node.validations,
        }
    }
}

impl From<DefinitionsData> for Vec<AttributeDefinition> {
    fn from(data: DefinitionsData) -> Self {
        data.metafield_definitions
            .map(|d| d.nodes.into_iter().map(Into::into).collect())
            .unwrap_or_default()
    }
}

// =============================================================================
// Stored values
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct MetafieldNode {
    pub id: Option<String>,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub key: String,
    pub value: Option<String>,
    #[serde(rename = "type")]
    pub ty: Option<String>,
}

impl From<MetafieldNode> for AttributeValue {
    fn from(node: MetafieldNode) -> Self {
        Self {
            id: node.id,
            namespace: node.namespace,
            key: node.key,
            raw_value: node.value.unwrap_or_default(),
            ty: node.ty.as_deref().map(AttributeType::parse).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ProductMetafieldsData {
    pub product: Option<ProductMetafieldsNode>,
}

#[derive(Debug, Deserialize)]
pub struct ProductMetafieldsNode {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub metafields: Option<Edges<MetafieldNode>>,
}

impl From<ProductMetafieldsData> for RecordAttributes {
    fn from(data: ProductMetafieldsData) -> Self {
        let Some(product) = data.product else {
            return RecordAttributes::default();
        };
        let values = product
            .metafields
            .map(|m| m.edges.into_iter().map(|e| e.node.into()).collect())
            .unwrap_or_default();
        RecordAttributes {
            product: Some(ProductHeader {
                id: product.id,
                title: product.title,
            }),
            values,
        }
    }
}

// =============================================================================
// Batch write
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetafieldsSetData {
    pub metafields_set: Option<MetafieldsSetPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetafieldsSetPayload {
    pub metafields: Option<Vec<MetafieldNode>>,
    #[serde(default)]
    pub user_errors: Vec<UserErrorNode>,
}

#[derive(Debug, Deserialize)]
pub struct UserErrorNode {
    pub field: Option<Vec<String>>,
    pub message: String,
    pub code: Option<String>,
}

impl From<MetafieldsSetData> for SetAttributesResult {
    fn from(data: MetafieldsSetData) -> Self {
        let Some(payload) = data.metafields_set else {
            return SetAttributesResult::default();
        };
        SetAttributesResult {
            accepted: payload
                .metafields
                .unwrap_or_default()
                .into_iter()
                .map(Into::into)
                .collect(),
            user_errors: payload
                .user_errors
                .into_iter()
                .map(|e| UserError {
                    field: e.field.unwrap_or_default(),
                    message: e.message,
                    code: e.code,
                })
                .collect(),
        }
    }
}

// =============================================================================
// Files
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct FilesData {
    pub files: Option<FileConnection>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileConnection {
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<FileNode>>,
    #[serde(default)]
    pub page_info: FilePageInfo,
}

/// Union of MediaImage, GenericFile and Video; other kinds arrive as `{}`
#[derive(Debug, Default, Deserialize)]
pub struct FileNode {
    pub id: Option<String>,
    pub alt: Option<String>,
    pub image: Option<UrlNode>,
    pub url: Option<String>,
    pub preview: Option<PreviewNode>,
}

#[derive(Debug, Deserialize)]
pub struct UrlNode {
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PreviewNode {
    pub image: Option<UrlNode>,
}

impl FileNode {
    /// Picker item; `None` for file kinds the query does not select
    pub fn into_item(self) -> Option<FileItem> {
        let id = self.id?;
        let alt = self.alt.filter(|a| !a.is_empty());

        let image_url = self.image.and_then(|i| i.url);
        let video_url = self.preview.and_then(|p| p.image).and_then(|i| i.url);

        let (preview_url, label) = if let Some(url) = image_url.or(self.url) {
            let label = alt
                .or_else(|| last_segment(&url))
                .unwrap_or_else(|| id.clone());
            (Some(url), label)
        } else if let Some(url) = video_url {
            (Some(url), alt.unwrap_or_else(|| "Video".to_string()))
        } else {
            (None, id.clone())
        };

        Some(FileItem {
            id,
            label,
            preview_url,
        })
    }
}

fn last_segment(url: &str) -> Option<String> {
    url.rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl From<FilesData> for FilePage {
    fn from(data: FilesData) -> Self {
        let Some(conn) = data.files else {
            return FilePage::default();
        };
        FilePage {
            files: conn
                .edges
                .into_iter()
                .filter_map(|e| e.node.into_item())
                .collect(),
            page_info: conn.page_info,
        }
    }
}
