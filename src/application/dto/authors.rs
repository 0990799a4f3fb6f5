use crate::domain::author::Author;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthorDto {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Author> for AuthorDto {
    fn from(author: Author) -> Self {
        Self {
            id: author.id.into(),
            name: author.name.into_inner(),
            slug: author.slug.into_inner(),
            created_at: author.created_at,
            updated_at: author.updated_at,
        }
    }
}

/// Entry of the author picker on the story form.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthorOptionDto {
    pub id: i64,
    pub name: String,
}

impl From<Author> for AuthorOptionDto {
    fn from(author: Author) -> Self {
        Self {
            id: author.id.into(),
            name: author.name.into_inner(),
        }
    }
}
