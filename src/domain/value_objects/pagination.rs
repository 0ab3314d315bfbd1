//! Limit/offset window used by every list endpoint.

use serde::Deserialize;

/// Rows returned when the caller does not ask for a size.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Upper bound on a single page.
pub const MAX_PAGE_SIZE: i64 = 100;

/// A validated limit/offset pair. Lists are ordered by primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Page {
    /// Clamp raw query parameters into a usable window.
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Self {
        Self {
            limit: limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
            offset: offset.unwrap_or(0).max(0),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// `?limit=&offset=` query parameters.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl From<PageParams> for Page {
    fn from(params: PageParams) -> Self {
        Page::new(params.limit, params.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(None, None => (10, 0) ; "defaults")]
    #[test_case(Some(25), Some(50) => (25, 50) ; "explicit values")]
    #[test_case(Some(0), None => (1, 0) ; "zero limit clamps to one")]
    #[test_case(Some(1000), None => (100, 0) ; "large limit clamps to max")]
    #[test_case(None, Some(-5) => (10, 0) ; "negative offset clamps to zero")]
    fn test_page_new(limit: Option<i64>, offset: Option<i64>) -> (i64, i64) {
        let page = Page::new(limit, offset);
        (page.limit, page.offset)
    }

    #[test]
    fn test_page_from_params() {
        let page: Page = PageParams {
            limit: Some(5),
            offset: Some(10),
        }
        .into();
        assert_eq!(page, Page { limit: 5, offset: 10 });
    }
}
