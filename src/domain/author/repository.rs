// src/domain/author/repository.rs
use crate::domain::author::entity::{Author, AuthorUpdate, NewAuthor};
use crate::domain::author::value_objects::AuthorId;
use crate::domain::errors::DomainResult;
use crate::domain::pagination::PageRequest;
use crate::domain::slug::Slug;
use async_trait::async_trait;

/// Result of the transactional author removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorRemoval {
    Removed,
    /// A story was attached between the check and the delete.
    StillReferenced,
    Missing,
}

#[async_trait]
pub trait AuthorWriteRepository: Send + Sync {
    async fn insert(&self, author: NewAuthor) -> DomainResult<Author>;
    async fn update(&self, update: AuthorUpdate) -> DomainResult<Author>;
    /// Deletes the author only if no story references it, inside one transaction.
    async fn remove_unreferenced(&self, id: AuthorId) -> DomainResult<AuthorRemoval>;
}

#[async_trait]
pub trait AuthorReadRepository: Send + Sync {
    async fn find_by_id(&self, id: AuthorId) -> DomainResult<Option<Author>>;
    async fn slug_exists(&self, slug: &Slug, exclude: Option<AuthorId>) -> DomainResult<bool>;
    async fn has_stories(&self, id: AuthorId) -> DomainResult<bool>;
    /// Newest-updated first. `slug_filter` matches as a substring of the slug.
    async fn list_page(
        &self,
        slug_filter: Option<&str>,
        page: PageRequest,
    ) -> DomainResult<(Vec<Author>, u64)>;
    async fn search_by_slug(&self, slug_filter: &str, limit: u32) -> DomainResult<Vec<Author>>;
}
