//! Product Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Featured product image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRef {
    pub url: String,
    pub alt_text: Option<String>,
}

/// Amount with currency; the amount stays a decimal string as sent by the shop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    pub amount: String,
    pub currency_code: String,
}

/// Catalog list item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: String,
    pub title: String,
    pub handle: String,
    /// ACTIVE | ARCHIVED | DRAFT
    pub status: String,
    #[serde(default)]
    pub total_inventory: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub featured_image: Option<ImageRef>,
    /// Minimum variant price
    pub min_price: Option<Money>,
}

impl ProductRecord {
    /// Alt text for the thumbnail, falling back to the title
    pub fn image_alt(&self) -> Option<&str> {
        self.featured_image
            .as_ref()
            .map(|img| img.alt_text.as_deref().unwrap_or(&self.title))
    }
}

/// Product header shown above the edit form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductHeader {
    pub id: String,
    pub title: String,
}
