use super::StoryQueryService;
use crate::{
    application::{
        capability::ensure_capability,
        dto::{AuthenticatedUser, StoryDetailDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::story::StoryId,
};

pub struct GetStoryQuery {
    pub id: i64,
}

impl StoryQueryService {
    pub async fn get_story(
        &self,
        actor: &AuthenticatedUser,
        query: GetStoryQuery,
    ) -> ApplicationResult<StoryDetailDto> {
        ensure_capability(actor, "stories", "read")?;

        let id = StoryId::new(query.id)?;
        let details = self
            .read_repo
            .find_details(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("story not found"))?;
        Ok(details.into())
    }
}
