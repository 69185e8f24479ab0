//! Catalog pagination
//!
//! Forward pages use `first/after`; backward pages use `last/before` and are
//! reversed so callers always see the catalog in its natural order.

use serde::{Deserialize, Serialize};
use shared::error::SyncResult;
use shared::models::{Connection, DEFAULT_PAGE_SIZE, PageInfo, PageQuery, ProductRecord};
use shared::source::CatalogSource;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

/// Position in the catalog: a cursor and the direction to read from it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCursor {
    pub cursor: Option<String>,
    pub direction: Direction,
}

impl PageCursor {
    /// First page
    pub fn first() -> Self {
        Self::default()
    }

    /// Page after the one described by `info`
    pub fn next(info: &PageInfo) -> Self {
        Self {
            cursor: info.end_cursor.clone(),
            direction: Direction::Forward,
        }
    }

    /// Page before the one described by `info`; resets to the first page
    /// when there is no start cursor
    pub fn previous(info: &PageInfo) -> Self {
        match &info.start_cursor {
            Some(cursor) => Self {
                cursor: Some(cursor.clone()),
                direction: Direction::Backward,
            },
            None => Self::first(),
        }
    }

    /// Remote query shape for this position
    ///
    /// Backward without a cursor degrades to a forward first page.
    pub fn query(&self, page_size: u32) -> PageQuery {
        match (self.direction, &self.cursor) {
            (Direction::Backward, Some(before)) => PageQuery::Backward {
                last: page_size,
                before: before.clone(),
            },
            (Direction::Backward, None) => PageQuery::Forward {
                first: page_size,
                after: None,
            },
            (Direction::Forward, after) => PageQuery::Forward {
                first: page_size,
                after: after.clone(),
            },
        }
    }
}

/// Reads catalog pages from a [`CatalogSource`]
pub struct CatalogPager<C> {
    source: C,
    page_size: u32,
}

impl<C: CatalogSource> CatalogPager<C> {
    pub fn new(source: C) -> Self {
        Self::with_page_size(source, DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(source: C, page_size: u32) -> Self {
        Self {
            source,
            page_size: page_size.max(1),
        }
    }

    /// Fetch the page at `cursor`, in natural catalog order
    pub async fn page(&self, cursor: &PageCursor) -> SyncResult<Connection<ProductRecord>> {
        let query = cursor.query(self.page_size);
        let backward = query.is_backward();

        let mut page = self.source.list_products(&query).await?;
        if backward {
            page.items.reverse();
        }

        tracing::debug!(
            direction = ?cursor.direction,
            count = page.items.len(),
            has_next = page.page_info.has_next_page,
            has_previous = page.page_info.has_previous_page,
            "Catalog page loaded"
        );
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    fn product(id: &str) -> ProductRecord {
        ProductRecord {
            id: id.into(),
            title: id.to_uppercase(),
            handle: id.into(),
            status: "ACTIVE".into(),
            total_inventory: 0,
            created_at: None,
            featured_image: None,
            min_price: None,
        }
    }

    /// Returns items `a, b, c` as the remote would for the query shape:
    /// forward in natural order, backward nearest-cursor first.
    #[derive(Default)]
    struct FakeCatalog {
        queries: Mutex<Vec<PageQuery>>,
    }

    #[async_trait]
    impl CatalogSource for FakeCatalog {
        async fn list_products(&self, query: &PageQuery) -> SyncResult<Connection<ProductRecord>> {
            self.queries.lock().unwrap().push(query.clone());
            let mut items = vec![product("a"), product("b"), product("c")];
            if query.is_backward() {
                items.reverse();
            }
            Ok(Connection::new(
                items,
                PageInfo {
                    has_next_page: true,
                    has_previous_page: true,
                    start_cursor: Some("ca".into()),
                    end_cursor: Some("cc".into()),
                },
            ))
        }
    }

    #[test]
    fn test_transitions() {
        let info = PageInfo {
            has_next_page: true,
            has_previous_page: true,
            start_cursor: Some("s".into()),
            end_cursor: Some("e".into()),
        };
        assert_eq!(
            PageCursor::next(&info),
            PageCursor {
                cursor: Some("e".into()),
                direction: Direction::Forward
            }
        );
        assert_eq!(
            PageCursor::previous(&info),
            PageCursor {
                cursor: Some("s".into()),
                direction: Direction::Backward
            }
        );
        assert_eq!(PageCursor::previous(&PageInfo::default()), PageCursor::first());
    }

    #[test]
    fn test_query_shape() {
        assert_eq!(
            PageCursor::first().query(50),
            PageQuery::Forward {
                first: 50,
                after: None
            }
        );
        let backward = PageCursor {
            cursor: Some("s".into()),
            direction: Direction::Backward,
        };
        assert_eq!(
            backward.query(25),
            PageQuery::Backward {
                last: 25,
                before: "s".into()
            }
        );
        let dangling = PageCursor {
            cursor: None,
            direction: Direction::Backward,
        };
        assert!(!dangling.query(25).is_backward());
    }

    #[tokio::test]
    async fn test_backward_page_keeps_natural_order() {
        let pager = CatalogPager::new(FakeCatalog::default());

        let forward = pager.page(&PageCursor::first()).await.unwrap();
        let backward = pager
            .page(&PageCursor::previous(&forward.page_info))
            .await
            .unwrap();

        let ids = |page: &Connection<ProductRecord>| {
            page.items.iter().map(|p| p.id.clone()).collect::<Vec<_>>()
        };
        assert_eq!(ids(&forward), ["a", "b", "c"]);
        assert_eq!(ids(&backward), ["a", "b", "c"]);

        let queries = pager.source.queries.lock().unwrap();
        assert_eq!(
            queries[1],
            PageQuery::Backward {
                last: 50,
                before: "ca".into()
            }
        );
    }
}
