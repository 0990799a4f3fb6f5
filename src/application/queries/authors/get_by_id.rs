use super::AuthorQueryService;
use crate::{
    application::{
        capability::ensure_capability,
        dto::{AuthenticatedUser, AuthorDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::author::AuthorId,
};

pub struct GetAuthorQuery {
    pub id: i64,
}

impl AuthorQueryService {
    pub async fn get_author(
        &self,
        actor: &AuthenticatedUser,
        query: GetAuthorQuery,
    ) -> ApplicationResult<AuthorDto> {
        ensure_capability(actor, "authors", "read")?;

        let id = AuthorId::new(query.id)?;
        let author = self
            .read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("author not found"))?;
        Ok(author.into())
    }
}
