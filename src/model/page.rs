use serde::{Deserialize, Serialize};

/// Canonical paginated response every list read is normalized into
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, total: u64, page: u64, limit: u64) -> Self {
        Self {
            data,
            total,
            page,
            limit,
            total_pages: total_pages(total, limit),
        }
    }

    /// A bare array is a single page holding everything
    pub fn from_items(data: Vec<T>) -> Self {
        let len = data.len() as u64;
        Self::new(data, len, 1, len)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// `ceil(total / limit)`; an empty result has zero pages, and a zero limit
/// with items is a single page
pub fn total_pages(total: u64, limit: u64) -> u64 {
    match (total, limit) {
        (0, _) => 0,
        (_, 0) => 1,
        _ => total.div_ceil(limit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_items() {
        let page = Page::from_items(vec!["a", "b", "c"]);
        assert_eq!(page.total, 3);
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 3);
        assert_eq!(page.total_pages, 1);
        assert!(!page.has_next());
    }

    #[test]
    fn test_total_pages_rounding() {
        assert_eq!(total_pages(21, 10), 3);
        assert_eq!(total_pages(20, 10), 2);
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(5, 0), 1);
    }

    #[test]
    fn test_serializes_camel_case() {
        let page = Page::new(vec![1, 2], 12, 2, 2);
        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value["totalPages"], 6);
        assert!(page.has_next());
    }
}
