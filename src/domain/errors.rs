// src/domain/errors.rs
use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("conflict: {0}")]
    Conflict(String),
    /// The slug unique constraint rejected a write.
    #[error("duplicate slug: {0}")]
    DuplicateSlug(String),
    #[error("not found: {0}")]
    NotFound(String),
    /// A foreign key still points at the row being removed.
    #[error("still referenced: {0}")]
    Referenced(String),
    #[error("persistence error: {0}")]
    Persistence(String),
}

impl DomainError {
    /// True for storage-level constraint violations (unique or foreign key).
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            Self::Conflict(_) | Self::DuplicateSlug(_) | Self::Referenced(_)
        )
    }
}
