use serde::{Deserialize, Serialize};

/// A year that has data, used to populate the year pickers.
#[derive(Default, Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct Year {
    pub id: i64,
    pub year: i32,
}

/// One page of a paginated list response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub page: u32,
    pub limit: u32,
    pub total: u64,
}

impl<T> Page<T> {
    /// The number of pages needed to show `total` rows, at least 1.
    pub fn page_count(&self) -> u64 {
        if self.limit == 0 {
            return 1;
        }
        self.total.div_ceil(u64::from(self.limit)).max(1)
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.page) < self.page_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(page: u32, limit: u32, total: u64) -> Page<()> {
        Page {
            data: Vec::new(),
            page,
            limit,
            total,
        }
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page(1, 10, 0).page_count(), 1);
        assert_eq!(page(1, 10, 10).page_count(), 1);
        assert_eq!(page(1, 10, 11).page_count(), 2);
        assert_eq!(page(1, 0, 11).page_count(), 1);
    }

    #[test]
    fn test_has_next() {
        assert!(page(1, 10, 11).has_next());
        assert!(!page(2, 10, 11).has_next());
    }
}
