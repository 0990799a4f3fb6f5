// src/domain/category/mod.rs
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::Slug;
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryId(pub i64);

impl CategoryId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation(
                "category id must be positive".into(),
            ))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<CategoryId> for i64 {
    fn from(value: CategoryId) -> Self {
        value.0
    }
}

#[derive(Debug, Clone)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: Slug,
}

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn list_all(&self) -> DomainResult<Vec<Category>>;
    /// Returns the subset of `ids` that exist.
    async fn existing_ids(&self, ids: &[CategoryId]) -> DomainResult<Vec<CategoryId>>;
}
