use super::StoryQueryService;
use crate::{
    application::{
        capability::ensure_capability,
        dto::{AuthenticatedUser, Page, StorySummaryDto},
        error::ApplicationResult,
    },
    domain::pagination::PageRequest,
};

pub struct ListStoriesQuery {
    pub search: Option<String>,
    pub page: u32,
}

impl StoryQueryService {
    pub async fn list_stories(
        &self,
        actor: &AuthenticatedUser,
        query: ListStoriesQuery,
    ) -> ApplicationResult<Page<StorySummaryDto>> {
        ensure_capability(actor, "stories", "read")?;

        let request = PageRequest::new(query.page, self.per_page)?;
        let key = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| self.slugger.slugify(s))
            .filter(|s| !s.is_empty());

        let (rows, total) = self.read_repo.list_page(key.as_deref(), request).await?;
        let items = rows.into_iter().map(Into::into).collect();
        Ok(Page::new(items, request, total))
    }
}
