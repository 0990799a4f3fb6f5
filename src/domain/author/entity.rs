// src/domain/author/entity.rs
use crate::domain::author::value_objects::{AuthorId, AuthorName};
use crate::domain::slug::Slug;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Author {
    pub id: AuthorId,
    pub name: AuthorName,
    pub slug: Slug,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Author {
    /// Renaming always carries a regenerated slug.
    pub fn rename(&mut self, name: AuthorName, slug: Slug, now: DateTime<Utc>) {
        self.name = name;
        self.slug = slug;
        self.updated_at = now;
    }
}

#[derive(Debug, Clone)]
pub struct NewAuthor {
    pub name: AuthorName,
    pub slug: Slug,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct AuthorUpdate {
    pub id: AuthorId,
    pub name: AuthorName,
    pub slug: Slug,
    pub original_updated_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AuthorUpdate {
    pub fn from_author(author: &Author, original_updated_at: DateTime<Utc>) -> Self {
        Self {
            id: author.id,
            name: author.name.clone(),
            slug: author.slug.clone(),
            original_updated_at,
            updated_at: author.updated_at,
        }
    }
}
