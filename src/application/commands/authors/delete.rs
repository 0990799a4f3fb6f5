// src/application/commands/authors/delete.rs
use super::AuthorCommandService;
use crate::{
    application::{
        capability::ensure_capability,
        dto::{AuthenticatedUser, DeletionOutcome},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        author::{Author, AuthorId, AuthorRemoval},
        errors::DomainError,
    },
};

pub struct DeleteAuthorCommand {
    pub id: i64,
}

fn blocked_by_stories(author: &Author) -> DeletionOutcome {
    DeletionOutcome::blocked(
        format!(
            "cannot delete author '{}' because stories still reference it; \
             remove the author from every story first",
            author.name
        ),
        None,
    )
}

fn failed(author: &Author, err: &DomainError) -> DeletionOutcome {
    if err.is_constraint_violation() {
        tracing::error!(author_id = %author.id, error = %err, "author delete hit a database constraint");
        DeletionOutcome::failed(format!(
            "cannot delete author '{}' because of a database constraint; check its other links",
            author.name
        ))
    } else {
        tracing::error!(author_id = %author.id, error = %err, "unexpected error deleting author");
        DeletionOutcome::failed(format!(
            "an unexpected error occurred while deleting author '{}'",
            author.name
        ))
    }
}

impl AuthorCommandService {
    /// Removes an author that no story references.
    ///
    /// Referenced authors yield `Blocked` without touching storage. Storage
    /// faults are logged and reported as `Failed`.
    pub async fn delete_author(
        &self,
        actor: &AuthenticatedUser,
        command: DeleteAuthorCommand,
    ) -> ApplicationResult<DeletionOutcome> {
        ensure_capability(actor, "authors", "delete")?;

        let id = AuthorId::new(command.id)?;
        let author = self
            .read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("author not found"))?;

        match self.read_repo.has_stories(id).await {
            Ok(true) => {
                tracing::warn!(author_id = %id, "author delete blocked by dependent stories");
                return Ok(blocked_by_stories(&author));
            }
            Ok(false) => {}
            Err(err) => return Ok(failed(&author, &err)),
        }

        match self.write_repo.remove_unreferenced(id).await {
            Ok(AuthorRemoval::Removed) => {
                tracing::info!(author_id = %id, "author deleted");
                Ok(DeletionOutcome::committed(format!(
                    "author '{}' deleted",
                    author.name
                )))
            }
            Ok(AuthorRemoval::StillReferenced) => {
                tracing::warn!(author_id = %id, "story attached during author delete");
                Ok(blocked_by_stories(&author))
            }
            Ok(AuthorRemoval::Missing) => Err(ApplicationError::not_found("author not found")),
            Err(err) => Ok(failed(&author, &err)),
        }
    }
}
