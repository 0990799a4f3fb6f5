use super::AuthorQueryService;
use crate::{
    application::{
        capability::ensure_capability,
        dto::{AuthenticatedUser, AuthorDto, Page},
        error::ApplicationResult,
    },
    domain::pagination::PageRequest,
};

pub struct ListAuthorsQuery {
    pub search: Option<String>,
    pub page: u32,
}

impl AuthorQueryService {
    pub async fn list_authors(
        &self,
        actor: &AuthenticatedUser,
        query: ListAuthorsQuery,
    ) -> ApplicationResult<Page<AuthorDto>> {
        ensure_capability(actor, "authors", "read")?;

        let request = PageRequest::new(query.page, self.per_page)?;
        let key = self.search_key(query.search.as_deref());
        let (authors, total) = self.read_repo.list_page(key.as_deref(), request).await?;

        let items = authors.into_iter().map(Into::into).collect();
        Ok(Page::new(items, request, total))
    }
}
