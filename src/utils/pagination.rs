//! Page/per_page query handling shared by list endpoints

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl PageQuery {
    /// 1-based page number
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.per_page())
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page() - 1) * self.limit()
    }
}

/// One page of a listing
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64, query: PageQuery) -> Self {
        Self {
            items,
            total,
            page: query.page(),
            per_page: query.per_page(),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let query = PageQuery::default();
        assert_eq!(query.page(), 1);
        assert_eq!(query.per_page(), DEFAULT_PAGE_SIZE);
        assert_eq!(query.offset(), 0);
    }

    #[test]
    fn test_clamping() {
        let query = PageQuery {
            page: Some(0),
            per_page: Some(1000),
        };
        assert_eq!(query.page(), 1);
        assert_eq!(query.per_page(), MAX_PAGE_SIZE);

        let query = PageQuery {
            page: Some(3),
            per_page: Some(0),
        };
        assert_eq!(query.per_page(), 1);
        assert_eq!(query.offset(), 2);
    }

    #[test]
    fn test_offset() {
        let query = PageQuery {
            page: Some(4),
            per_page: Some(25),
        };
        assert_eq!(query.limit(), 25);
        assert_eq!(query.offset(), 75);
    }

    #[test]
    fn test_map_keeps_metadata() {
        let page = Page::new(vec![1, 2, 3], 10, PageQuery::default()).map(|n| n * 2);
        assert_eq!(page.items, vec![2, 4, 6]);
        assert_eq!(page.total, 10);
        assert_eq!(page.page, 1);
    }
}
