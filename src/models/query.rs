//! List query parameters shared by every collection endpoint

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_PER_PAGE: i64 = 20;
pub const MAX_PER_PAGE: i64 = 100;
/// Highest page whose offset still fits an `i64`
pub const MAX_PAGE: i64 = i64::MAX / MAX_PER_PAGE;

/// Query string of a list request.
///
/// Repeated `ids[]` parameters restrict the result to those rows and
/// turn pagination off.
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    #[serde(rename = "ids[]", default)]
    pub ids: Vec<i32>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Slice of a result set to return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    All,
    Window { page: i64, per_page: i64 },
}

impl Page {
    pub fn new(ids: &[i32], page: Option<i64>, per_page: Option<i64>) -> Self {
        if !ids.is_empty() {
            return Page::All;
        }
        Page::Window {
            page: page.unwrap_or(1).clamp(1, MAX_PAGE),
            per_page: per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE),
        }
    }

    pub fn limit_offset(&self) -> Option<(i64, i64)> {
        match *self {
            Page::All => None,
            Page::Window { page, per_page } => Some((per_page, (page - 1).saturating_mul(per_page))),
        }
    }

    /// `(page, per_page)` as reported back to the client
    pub fn report(&self, total: i64) -> (i64, i64) {
        match *self {
            Page::All => (1, total),
            Page::Window { page, per_page } => (page, per_page),
        }
    }
}

impl ListQuery {
    pub fn page(&self) -> Page {
        Page::new(&self.ids, self.page, self.per_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let page = ListQuery::default().page();
        assert_eq!(page, Page::Window { page: 1, per_page: 20 });
        assert_eq!(page.limit_offset(), Some((20, 0)));
    }

    #[test]
    fn test_ids_disable_pagination() {
        let query = ListQuery {
            ids: vec![1, 2],
            page: Some(3),
            per_page: Some(5),
        };
        assert_eq!(query.page(), Page::All);
        assert_eq!(query.page().limit_offset(), None);
        assert_eq!(query.page().report(2), (1, 2));
    }

    #[test]
    fn test_window_is_clamped() {
        let page = Page::new(&[], Some(0), Some(1000));
        assert_eq!(page, Page::Window { page: 1, per_page: MAX_PER_PAGE });
        assert_eq!(Page::new(&[], Some(3), Some(10)).limit_offset(), Some((10, 20)));
    }

    #[test]
    fn test_huge_page_does_not_overflow() {
        let page = Page::new(&[], Some(i64::MAX), Some(100));
        assert_eq!(page, Page::Window { page: MAX_PAGE, per_page: 100 });

        let (limit, offset) = page.limit_offset().unwrap();
        assert_eq!(limit, 100);
        assert!(offset >= 0);
        assert_eq!(offset, (MAX_PAGE - 1) * 100);
    }
}
