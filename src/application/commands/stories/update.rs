// src/application/commands/stories/update.rs
use super::{PhotoUpload, StoryCommandService};
use crate::{
    application::{
        capability::ensure_capability,
        commands::SLUG_WRITE_ATTEMPTS,
        dto::{AuthenticatedUser, StoryDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        errors::DomainError,
        slug::Slug,
        story::{Story, StoryId, StoryName, StoryUpdate},
    },
};

pub struct UpdateStoryCommand {
    pub id: i64,
    pub name: String,
    pub author_id: Option<i64>,
    pub description: String,
    pub source: String,
    pub completed: bool,
    pub category_ids: Vec<i64>,
    /// Replaces the current cover when present.
    pub photo: Option<PhotoUpload>,
}

impl StoryCommandService {
    pub async fn update_story(
        &self,
        actor: &AuthenticatedUser,
        command: UpdateStoryCommand,
    ) -> ApplicationResult<StoryDto> {
        ensure_capability(actor, "stories", "update")?;

        let id = StoryId::new(command.id)?;
        let story = self
            .read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("story not found"))?;

        let author_id = self.require_author(command.author_id).await?;
        let name = StoryName::new(command.name)?;
        let category_ids = self.require_categories(&command.category_ids).await?;

        // Stored once, ahead of the slug retries; only the row write below
        // can still fail, and then the new file is discarded.
        let new_photo = match command.photo {
            Some(upload) => Some(
                self.photo_storage
                    .store(&upload.original_name, upload.bytes)
                    .await?,
            ),
            None => None,
        };
        let replaced = new_photo.as_ref().and(story.photo.clone());

        let template = StoryUpdate {
            id,
            name,
            slug: story.slug.clone(),
            description: command.description,
            source: command.source,
            author_id,
            completed: command.completed,
            new_photo: new_photo.clone(),
            replaced_photo: replaced.as_ref().map(|photo| photo.id),
            categories: story.category_changes(&category_ids),
            original_updated_at: story.updated_at,
            updated_at: story.updated_at,
        };

        match self.write_with_fresh_slug(template).await {
            Ok(updated) => {
                if let Some(old) = replaced {
                    self.discard_photo_file(&old.file_name).await;
                }
                tracing::info!(story_id = %id, slug = %updated.slug, "story updated");
                Ok(updated.into())
            }
            Err(err) => {
                if let Some(file_name) = new_photo {
                    self.discard_photo_file(&file_name).await;
                }
                Err(err)
            }
        }
    }

    /// Regenerates the slug from the new name (excluding the story itself)
    /// and writes, retrying when a concurrent writer claims the same slug.
    async fn write_with_fresh_slug(&self, template: StoryUpdate) -> ApplicationResult<Story> {
        let id = template.id;

        for _ in 0..SLUG_WRITE_ATTEMPTS {
            let slug: Slug = self
                .slug_service
                .generate_unique_slug(&template.name, Some(id))
                .await?;
            let update = StoryUpdate {
                slug,
                updated_at: self.clock.now(),
                ..template.clone()
            };

            match self.write_repo.update(update).await {
                Ok(updated) => return Ok(updated),
                Err(DomainError::DuplicateSlug(msg)) => {
                    tracing::debug!(%msg, story_id = %id, "story slug taken concurrently, retrying");
                }
                Err(DomainError::Conflict(msg)) => {
                    // Stale `updated_at`: tell a concurrent delete apart from a concurrent edit.
                    if self.read_repo.find_by_id(id).await?.is_none() {
                        return Err(ApplicationError::not_found("story not found"));
                    }
                    return Err(ApplicationError::conflict(msg));
                }
                Err(other) => return Err(other.into()),
            }
        }

        Err(ApplicationError::conflict(
            "could not allocate a unique story slug, please retry",
        ))
    }
}
