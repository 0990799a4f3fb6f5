// src/application/commands/stories/publish.rs
use super::StoryCommandService;
use crate::{
    application::{
        capability::ensure_capability,
        dto::AuthenticatedUser,
        error::{ApplicationError, ApplicationResult},
    },
    domain::story::StoryId,
};

pub struct SetPublishedCommand {
    pub id: i64,
    pub published: bool,
}

impl StoryCommandService {
    /// Toggles reader visibility. Leaves `updated_at` alone so listings keep
    /// their order.
    pub async fn set_published(
        &self,
        actor: &AuthenticatedUser,
        command: SetPublishedCommand,
    ) -> ApplicationResult<()> {
        ensure_capability(actor, "stories", "publish")?;

        let id = StoryId::new(command.id)?;
        if !self.write_repo.set_published(id, command.published).await? {
            return Err(ApplicationError::not_found("story not found"));
        }
        tracing::info!(story_id = %id, published = command.published, "story visibility changed");
        Ok(())
    }
}
