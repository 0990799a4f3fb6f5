// src/domain/story/services.rs
use std::sync::Arc;

use crate::application::ports::util::SlugGenerator;
use crate::domain::errors::DomainResult;
use crate::domain::slug::{Slug, base_or_fallback, resolve_unique_slug};
use crate::domain::story::repository::StoryReadRepository;
use crate::domain::story::value_objects::{StoryId, StoryName};

/// Domain service producing unique story slugs.
pub struct StorySlugService {
    read_repo: Arc<dyn StoryReadRepository>,
    generator: Arc<dyn SlugGenerator>,
}

impl StorySlugService {
    pub fn new(
        read_repo: Arc<dyn StoryReadRepository>,
        generator: Arc<dyn SlugGenerator>,
    ) -> Self {
        Self {
            read_repo,
            generator,
        }
    }

    pub async fn generate_unique_slug(
        &self,
        name: &StoryName,
        ignore_id: Option<StoryId>,
    ) -> DomainResult<Slug> {
        let base = base_or_fallback(self.generator.slugify(name.as_str()), "story");
        let repo = &self.read_repo;
        resolve_unique_slug(&base, ignore_id, |candidate, exclude| async move {
            repo.slug_exists(&candidate, exclude).await
        })
        .await
    }
}
