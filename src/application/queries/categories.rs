// src/application/queries/categories.rs
use std::sync::Arc;

use crate::{
    application::{
        capability::ensure_capability,
        dto::{AuthenticatedUser, CategoryDto},
        error::ApplicationResult,
    },
    domain::category::CategoryRepository,
};

pub struct CategoryQueryService {
    repo: Arc<dyn CategoryRepository>,
}

impl CategoryQueryService {
    pub fn new(repo: Arc<dyn CategoryRepository>) -> Self {
        Self { repo }
    }

    /// Options for the story form's category multi-select.
    pub async fn list_categories(
        &self,
        actor: &AuthenticatedUser,
    ) -> ApplicationResult<Vec<CategoryDto>> {
        ensure_capability(actor, "categories", "read")?;
        let categories = self.repo.list_all().await?;
        Ok(categories.into_iter().map(Into::into).collect())
    }
}
