// src/domain/author/services.rs
use std::sync::Arc;

use crate::application::ports::util::SlugGenerator;
use crate::domain::author::repository::AuthorReadRepository;
use crate::domain::author::value_objects::{AuthorId, AuthorName};
use crate::domain::errors::DomainResult;
use crate::domain::slug::{Slug, base_or_fallback, resolve_unique_slug};

/// Domain service producing unique author slugs.
pub struct AuthorSlugService {
    read_repo: Arc<dyn AuthorReadRepository>,
    generator: Arc<dyn SlugGenerator>,
}

impl AuthorSlugService {
    pub fn new(
        read_repo: Arc<dyn AuthorReadRepository>,
        generator: Arc<dyn SlugGenerator>,
    ) -> Self {
        Self {
            read_repo,
            generator,
        }
    }

    pub async fn generate_unique_slug(
        &self,
        name: &AuthorName,
        ignore_id: Option<AuthorId>,
    ) -> DomainResult<Slug> {
        let base = base_or_fallback(self.generator.slugify(name.as_str()), "author");
        let repo = &self.read_repo;
        resolve_unique_slug(&base, ignore_id, |candidate, exclude| async move {
            repo.slug_exists(&candidate, exclude).await
        })
        .await
    }
}
