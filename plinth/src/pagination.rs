//! Fixed-size page slicing
//!
//! Pages are 1-indexed and hold [`PAGE_SIZE`] items. A missing, non-numeric,
//! zero or negative `?page=` is treated as page 1. A page past the end of the
//! data is empty, and handlers answer an empty page with 404 via
//! [`require_page`].

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Items per page
pub const PAGE_SIZE: usize = 10;

/// `?page=` query parameter
///
/// Kept as a string so that garbage values fall back to page 1 instead of
/// failing extraction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageQuery {
    /// Raw page value
    #[serde(default)]
    pub page: Option<String>,
}

impl PageQuery {
    /// The effective 1-indexed page number
    ///
    /// ```rust
    /// use plinth::pagination::PageQuery;
    ///
    /// assert_eq!(PageQuery::default().page_number(), 1);
    /// assert_eq!(PageQuery { page: Some("3".into()) }.page_number(), 3);
    /// assert_eq!(PageQuery { page: Some("-2".into()) }.page_number(), 1);
    /// assert_eq!(PageQuery { page: Some("two".into()) }.page_number(), 1);
    /// ```
    pub fn page_number(&self) -> usize {
        self.page
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .filter(|page| *page >= 1)
            .and_then(|page| usize::try_from(page).ok())
            .unwrap_or(1)
    }
}

/// The items on `page`: offset `(page - 1) * PAGE_SIZE`, up to `PAGE_SIZE` long
pub fn page_slice<T>(items: &[T], page: usize) -> &[T] {
    let start = page.max(1).saturating_sub(1).saturating_mul(PAGE_SIZE);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(PAGE_SIZE).min(items.len());
    &items[start..end]
}

/// Like [`page_slice`], but an empty page is a 404
pub fn require_page<T: Clone>(items: &[T], page: usize) -> Result<Vec<T>> {
    let slice = page_slice(items, page);
    if slice.is_empty() {
        return Err(Error::resource_not_found());
    }
    Ok(slice.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<usize> {
        (1..=n).collect()
    }

    #[test]
    fn test_first_and_second_page() {
        let items = ids(12);
        assert_eq!(page_slice(&items, 1), &items[0..10]);
        assert_eq!(page_slice(&items, 2), &[11, 12]);
    }

    #[test]
    fn test_every_page_matches_offset_formula() {
        let items = ids(37);
        for page in 1..=5 {
            let start = ((page - 1) * PAGE_SIZE).min(items.len());
            let end = (page * PAGE_SIZE).min(items.len());
            assert_eq!(page_slice(&items, page), &items[start..end], "page {page}");
        }
    }

    #[test]
    fn test_page_beyond_data_is_empty() {
        let items = ids(12);
        assert!(page_slice(&items, 3).is_empty());
        assert!(page_slice(&items, usize::MAX).is_empty());
        assert!(page_slice::<usize>(&[], 1).is_empty());
    }

    #[test]
    fn test_page_zero_is_page_one() {
        let items = ids(3);
        assert_eq!(page_slice(&items, 0), &[1, 2, 3]);
    }

    #[test]
    fn test_require_page_not_found() {
        let items = ids(5);
        assert_eq!(require_page(&items, 1).unwrap(), items);
        assert!(matches!(require_page(&items, 2), Err(Error::NotFound(_))));
        assert!(matches!(require_page::<usize>(&[], 1), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_page_number_parsing() {
        let query = |raw: &str| PageQuery {
            page: Some(raw.to_string()),
        };
        assert_eq!(query("2").page_number(), 2);
        assert_eq!(query(" 4 ").page_number(), 4);
        assert_eq!(query("0").page_number(), 1);
        assert_eq!(query("1.5").page_number(), 1);
        assert_eq!(query("").page_number(), 1);
    }
}
