// src/application/commands/stories/service.rs
use std::sync::Arc;

use crate::{
    application::{
        error::{ApplicationError, ApplicationResult},
        ports::{storage::PhotoStorage, time::Clock},
    },
    domain::{
        author::{AuthorId, AuthorReadRepository},
        category::{CategoryId, CategoryRepository},
        story::{PhotoFileName, StoryReadRepository, StorySlugService, StoryWriteRepository},
    },
};

pub struct StoryCommandService {
    pub(super) write_repo: Arc<dyn StoryWriteRepository>,
    pub(super) read_repo: Arc<dyn StoryReadRepository>,
    pub(super) author_repo: Arc<dyn AuthorReadRepository>,
    pub(super) category_repo: Arc<dyn CategoryRepository>,
    pub(super) photo_storage: Arc<dyn PhotoStorage>,
    pub(super) slug_service: Arc<StorySlugService>,
    pub(super) clock: Arc<dyn Clock>,
}

impl StoryCommandService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        write_repo: Arc<dyn StoryWriteRepository>,
        read_repo: Arc<dyn StoryReadRepository>,
        author_repo: Arc<dyn AuthorReadRepository>,
        category_repo: Arc<dyn CategoryRepository>,
        photo_storage: Arc<dyn PhotoStorage>,
        slug_service: Arc<StorySlugService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            write_repo,
            read_repo,
            author_repo,
            category_repo,
            photo_storage,
            slug_service,
            clock,
        }
    }

    /// A story must name an existing author; `0` or absent means none was picked.
    pub(super) async fn require_author(&self, author_id: Option<i64>) -> ApplicationResult<AuthorId> {
        let raw = author_id
            .filter(|id| *id != 0)
            .ok_or_else(|| ApplicationError::validation("an author must be selected"))?;
        let id = AuthorId::new(raw)?;
        if self.author_repo.find_by_id(id).await?.is_none() {
            return Err(ApplicationError::validation(format!(
                "author {id} does not exist"
            )));
        }
        Ok(id)
    }

    pub(super) async fn require_categories(
        &self,
        raw_ids: &[i64],
    ) -> ApplicationResult<Vec<CategoryId>> {
        let mut ids: Vec<CategoryId> = Vec::with_capacity(raw_ids.len());
        for raw in raw_ids {
            let id = CategoryId::new(*raw)?;
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        if ids.is_empty() {
            return Ok(ids);
        }

        let known = self.category_repo.existing_ids(&ids).await?;
        let unknown: Vec<String> = ids
            .iter()
            .filter(|id| !known.contains(id))
            .map(|id| i64::from(*id).to_string())
            .collect();
        if !unknown.is_empty() {
            return Err(ApplicationError::validation(format!(
                "unknown category id(s): {}",
                unknown.join(", ")
            )));
        }
        Ok(ids)
    }

    /// Best-effort removal of a cover file that is no longer referenced.
    pub(super) async fn discard_photo_file(&self, file_name: &PhotoFileName) {
        if file_name.is_placeholder() {
            return;
        }
        if let Err(err) = self.photo_storage.delete(file_name).await {
            tracing::warn!(file = %file_name, error = %err, "failed to remove story photo file");
        }
    }
}
