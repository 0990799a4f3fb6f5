// src/domain/story/repository.rs
use crate::domain::errors::DomainResult;
use crate::domain::pagination::PageRequest;
use crate::domain::slug::Slug;
use crate::domain::story::entity::{
    NewStory, Story, StoryDependents, StoryDetails, StoryRemovalPlan, StorySummary, StoryUpdate,
};
use crate::domain::story::value_objects::StoryId;
use async_trait::async_trait;

/// Result of the transactional story removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoryRemoval {
    Removed,
    /// Chapters were added between the check and the delete.
    HasChapters(u64),
    Missing,
}

#[async_trait]
pub trait StoryWriteRepository: Send + Sync {
    /// Inserts the photo row, the story and its category links atomically.
    async fn insert(&self, story: NewStory) -> DomainResult<Story>;
    async fn update(&self, update: StoryUpdate) -> DomainResult<Story>;
    /// Returns `false` when the story does not exist.
    async fn set_published(&self, id: StoryId, published: bool) -> DomainResult<bool>;
    async fn remove_with_dependents(&self, plan: StoryRemovalPlan) -> DomainResult<StoryRemoval>;
}

#[async_trait]
pub trait StoryReadRepository: Send + Sync {
    async fn find_by_id(&self, id: StoryId) -> DomainResult<Option<Story>>;
    async fn find_details(&self, id: StoryId) -> DomainResult<Option<StoryDetails>>;
    async fn find_with_dependents(&self, id: StoryId) -> DomainResult<Option<StoryDependents>>;
    async fn slug_exists(&self, slug: &Slug, exclude: Option<StoryId>) -> DomainResult<bool>;
    /// Newest-updated first. `slug_filter` matches as a substring of the slug.
    async fn list_page(
        &self,
        slug_filter: Option<&str>,
        page: PageRequest,
    ) -> DomainResult<(Vec<StorySummary>, u64)>;
}
