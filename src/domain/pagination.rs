// src/domain/pagination.rs
use crate::domain::errors::{DomainError, DomainResult};

/// One-based page request used by the admin listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl PageRequest {
    pub const MAX_PER_PAGE: u32 = 100;

    pub fn new(page: u32, per_page: u32) -> DomainResult<Self> {
        if per_page == 0 {
            return Err(DomainError::Validation(
                "page size must be positive".into(),
            ));
        }
        Ok(Self {
            page: page.max(1),
            per_page: per_page.min(Self::MAX_PER_PAGE),
        })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.per_page)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.per_page)
    }

    /// Number of pages needed to show `total` rows, never less than one.
    pub fn total_pages(&self, total: u64) -> u32 {
        let pages = total.div_ceil(u64::from(self.per_page)).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_zero_is_treated_as_first_page() {
        let request = PageRequest::new(0, 10).unwrap();
        assert_eq!(request.page(), 1);
        assert_eq!(request.offset(), 0);
    }

    #[test]
    fn offset_follows_page_number() {
        let request = PageRequest::new(3, 10).unwrap();
        assert_eq!(request.offset(), 20);
        assert_eq!(request.limit(), 10);
    }

    #[test]
    fn per_page_is_capped() {
        let request = PageRequest::new(1, 5000).unwrap();
        assert_eq!(request.per_page(), PageRequest::MAX_PER_PAGE);
    }

    #[test]
    fn zero_page_size_is_rejected() {
        assert!(matches!(
            PageRequest::new(1, 0),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn total_pages_rounds_up() {
        let request = PageRequest::new(1, 10).unwrap();
        assert_eq!(request.total_pages(0), 1);
        assert_eq!(request.total_pages(10), 1);
        assert_eq!(request.total_pages(11), 2);
    }
}
