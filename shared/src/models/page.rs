//! Cursor pagination types

use serde::{Deserialize, Serialize};

/// Default catalog page size
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Shape of a cursor list query
///
/// The remote list accepts either `first/after` or `last/before`,
/// never a mix of both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageQuery {
    Forward { first: u32, after: Option<String> },
    Backward { last: u32, before: String },
}

impl PageQuery {
    pub fn is_backward(&self) -> bool {
        matches!(self, Self::Backward { .. })
    }
}

/// Page info returned with every catalog page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageInfo {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
}

/// Items of one page plus its page info
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    pub items: Vec<T>,
    pub page_info: PageInfo,
}

impl<T> Connection<T> {
    pub fn new(items: Vec<T>, page_info: PageInfo) -> Self {
        Self { items, page_info }
    }

    /// Empty page, used when the remote payload has no connection
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            page_info: PageInfo::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
