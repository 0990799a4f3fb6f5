// src/application/commands/authors/create.rs
use super::AuthorCommandService;
use crate::{
    application::{
        capability::ensure_capability,
        commands::SLUG_WRITE_ATTEMPTS,
        dto::{AuthorDto, AuthenticatedUser},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        author::{AuthorName, NewAuthor},
        errors::DomainError,
    },
};

pub struct CreateAuthorCommand {
    pub name: String,
}

impl AuthorCommandService {
    pub async fn create_author(
        &self,
        actor: &AuthenticatedUser,
        command: CreateAuthorCommand,
    ) -> ApplicationResult<AuthorDto> {
        ensure_capability(actor, "authors", "create")?;

        let name = AuthorName::new(command.name)?;
        let now = self.clock.now();

        for _ in 0..SLUG_WRITE_ATTEMPTS {
            let slug = self.slug_service.generate_unique_slug(&name, None).await?;
            let new_author = NewAuthor {
                name: name.clone(),
                slug,
                created_at: now,
                updated_at: now,
            };

            match self.write_repo.insert(new_author).await {
                Ok(created) => {
                    tracing::info!(author_id = %created.id, slug = %created.slug, "author created");
                    return Ok(created.into());
                }
                Err(DomainError::DuplicateSlug(msg)) => {
                    tracing::debug!(%msg, "author slug taken concurrently, retrying");
                }
                Err(other) => return Err(other.into()),
            }
        }

        Err(ApplicationError::conflict(
            "could not allocate a unique author slug, please retry",
        ))
    }
}
