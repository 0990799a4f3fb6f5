// src/application/commands/authors/update.rs
use super::AuthorCommandService;
use crate::{
    application::{
        capability::ensure_capability,
        commands::SLUG_WRITE_ATTEMPTS,
        dto::{AuthorDto, AuthenticatedUser},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        author::{AuthorId, AuthorName, AuthorUpdate},
        errors::DomainError,
    },
};

pub struct UpdateAuthorCommand {
    pub id: i64,
    pub name: String,
}

impl AuthorCommandService {
    pub async fn update_author(
        &self,
        actor: &AuthenticatedUser,
        command: UpdateAuthorCommand,
    ) -> ApplicationResult<AuthorDto> {
        ensure_capability(actor, "authors", "update")?;

        let id = AuthorId::new(command.id)?;
        let name = AuthorName::new(command.name)?;
        let mut author = self
            .read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("author not found"))?;
        let original_updated_at = author.updated_at;

        for _ in 0..SLUG_WRITE_ATTEMPTS {
            let slug = self
                .slug_service
                .generate_unique_slug(&name, Some(id))
                .await?;
            author.rename(name.clone(), slug, self.clock.now());
            let update = AuthorUpdate::from_author(&author, original_updated_at);

            match self.write_repo.update(update).await {
                Ok(updated) => return Ok(updated.into()),
                Err(DomainError::DuplicateSlug(msg)) => {
                    tracing::debug!(%msg, author_id = %id, "author slug taken concurrently, retrying");
                }
                Err(DomainError::Conflict(msg)) => {
                    // Stale `updated_at`: tell a concurrent delete apart from a concurrent edit.
                    if self.read_repo.find_by_id(id).await?.is_none() {
                        return Err(ApplicationError::not_found("author not found"));
                    }
                    return Err(ApplicationError::conflict(msg));
                }
                Err(other) => return Err(other.into()),
            }
        }

        Err(ApplicationError::conflict(
            "could not allocate a unique author slug, please retry",
        ))
    }
}
