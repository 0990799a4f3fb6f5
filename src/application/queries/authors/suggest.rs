use super::AuthorQueryService;
use crate::application::{
    capability::ensure_capability,
    dto::{AuthenticatedUser, AuthorOptionDto},
    error::ApplicationResult,
};

const SUGGESTION_LIMIT: u32 = 20;

pub struct SuggestAuthorsQuery {
    pub query: Option<String>,
}

impl AuthorQueryService {
    /// Author picker for the story form. An empty query lists the first authors.
    pub async fn suggest_authors(
        &self,
        actor: &AuthenticatedUser,
        query: SuggestAuthorsQuery,
    ) -> ApplicationResult<Vec<AuthorOptionDto>> {
        ensure_capability(actor, "authors", "read")?;

        let key = self.search_key(query.query.as_deref()).unwrap_or_default();
        let authors = self
            .read_repo
            .search_by_slug(&key, SUGGESTION_LIMIT)
            .await?;
        Ok(authors.into_iter().map(Into::into).collect())
    }
}
