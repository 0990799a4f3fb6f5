// src/application/commands/stories/create.rs
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
        story::{NewStory, PhotoFileName, StoryName},
    },
};

pub struct CreateStoryCommand {
    pub name: String,
    pub author_id: Option<i64>,
    pub description: String,
    pub source: String,
    pub category_ids: Vec<i64>,
    pub photo: Option<PhotoUpload>,
}

impl CreateStoryCommand {
    pub fn builder() -> CreateStoryCommandBuilder {
        CreateStoryCommandBuilder::default()
    }
}

#[derive(Default)]
pub struct CreateStoryCommandBuilder {
    name: Option<String>,
    author_id: Option<i64>,
    description: String,
    source: String,
    category_ids: Vec<i64>,
    photo: Option<PhotoUpload>,
}

impl CreateStoryCommandBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn author_id(mut self, author_id: i64) -> Self {
        self.author_id = Some(author_id);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn category_ids(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.category_ids = ids.into_iter().collect();
        self
    }

    pub fn photo(mut self, photo: PhotoUpload) -> Self {
        self.photo = Some(photo);
        self
    }

    pub fn build(self) -> Result<CreateStoryCommand, &'static str> {
        Ok(CreateStoryCommand {
            name: self.name.ok_or("name is required")?,
            author_id: self.author_id,
            description: self.description,
            source: self.source,
            category_ids: self.category_ids,
            photo: self.photo,
        })
    }
}

impl StoryCommandService {
    pub async fn create_story(
        &self,
        actor: &AuthenticatedUser,
        command: CreateStoryCommand,
    ) -> ApplicationResult<StoryDto> {
        ensure_capability(actor, "stories", "create")?;

        let author_id = self.require_author(command.author_id).await?;
        let name = StoryName::new(command.name)?;
        let category_ids = self.require_categories(&command.category_ids).await?;

        let photo_file_name = match command.photo {
            Some(upload) => {
                self.photo_storage
                    .store(&upload.original_name, upload.bytes)
                    .await?
            }
            None => PhotoFileName::placeholder(),
        };

        let now = self.clock.now();
        let mut last_error = ApplicationError::conflict(
            "could not allocate a unique story slug, please retry",
        );

        for _ in 0..SLUG_WRITE_ATTEMPTS {
            let slug = match self.slug_service.generate_unique_slug(&name, None).await {
                Ok(slug) => slug,
                Err(err) => {
                    last_error = err.into();
                    break;
                }
            };

            let new_story = NewStory {
                name: name.clone(),
                slug,
                description: command.description.clone(),
                source: command.source.clone(),
                author_id,
                photo_file_name: photo_file_name.clone(),
                category_ids: category_ids.clone(),
                created_at: now,
                updated_at: now,
            };

            match self.write_repo.insert(new_story).await {
                Ok(created) => {
                    tracing::info!(story_id = %created.id, slug = %created.slug, "story created");
                    return Ok(created.into());
                }
                Err(DomainError::DuplicateSlug(msg)) => {
                    tracing::debug!(%msg, "story slug taken concurrently, retrying");
                }
                Err(other) => {
                    last_error = other.into();
                    break;
                }
            }
        }

        self.discard_photo_file(&photo_file_name).await;
        Err(last_error)
    }
}
