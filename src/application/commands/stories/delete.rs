// src/application/commands/stories/delete.rs
use super::StoryCommandService;
use crate::{
    application::{
        capability::ensure_capability,
        dto::{AuthenticatedUser, DeletionOutcome},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        errors::DomainError,
        story::{Story, StoryId, StoryRemoval, StoryRemovalPlan},
    },
};

pub struct DeleteStoryCommand {
    pub id: i64,
}

fn blocked_by_chapters(story: &Story, chapters: u64) -> DeletionOutcome {
    DeletionOutcome::blocked(
        format!(
            "cannot delete story '{}' because it still has {chapters} chapter(s); \
             delete or reassign them first",
            story.name
        ),
        Some(chapters),
    )
}

fn failed(story: &Story, err: &DomainError) -> DeletionOutcome {
    if err.is_constraint_violation() {
        tracing::error!(story_id = %story.id, error = %err, "story delete hit a database constraint");
        DeletionOutcome::failed(format!(
            "cannot delete story '{}' because of a database constraint; check its other links",
            story.name
        ))
    } else {
        tracing::error!(story_id = %story.id, error = %err, "unexpected error deleting story");
        DeletionOutcome::failed(format!(
            "an unexpected error occurred while deleting story '{}'",
            story.name
        ))
    }
}

impl StoryCommandService {
    /// Removes a story without chapters together with its category links and
    /// cover row in one transaction. The cover file goes after the commit,
    /// except for the shared placeholder.
    pub async fn delete_story(
        &self,
        actor: &AuthenticatedUser,
        command: DeleteStoryCommand,
    ) -> ApplicationResult<DeletionOutcome> {
        ensure_capability(actor, "stories", "delete")?;

        let id = StoryId::new(command.id)?;
        let dependents = self
            .read_repo
            .find_with_dependents(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("story not found"))?;
        let story = dependents.story;

        if dependents.chapter_count > 0 {
            tracing::warn!(
                story_id = %id,
                chapters = dependents.chapter_count,
                "story delete blocked by chapters"
            );
            return Ok(blocked_by_chapters(&story, dependents.chapter_count));
        }

        let plan = StoryRemovalPlan::for_story(&story);
        match self.write_repo.remove_with_dependents(plan).await {
            Ok(StoryRemoval::Removed) => {
                if let Some(photo) = &story.photo {
                    self.discard_photo_file(&photo.file_name).await;
                }
                tracing::info!(story_id = %id, "story deleted");
                Ok(DeletionOutcome::committed(format!(
                    "story '{}' deleted",
                    story.name
                )))
            }
            Ok(StoryRemoval::HasChapters(count)) => {
                tracing::warn!(story_id = %id, chapters = count, "chapter added during story delete");
                Ok(blocked_by_chapters(&story, count))
            }
            Ok(StoryRemoval::Missing) => Err(ApplicationError::not_found("story not found")),
            Err(err) => Ok(failed(&story, &err)),
        }
    }
}
