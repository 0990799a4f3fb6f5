// src/infrastructure/repositories/postgres_category.rs
use super::map_sqlx;
use crate::domain::category::{Category, CategoryId, CategoryRepository};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::Slug;
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

#[derive(Clone)]
pub struct PostgresCategoryRepository {
    pool: PgPool,
}

impl PostgresCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CategoryRow {
    id: i64,
    name: String,
    slug: String,
}

impl TryFrom<CategoryRow> for Category {
    type Error = DomainError;

    fn try_from(row: CategoryRow) -> Result<Self, Self::Error> {
        Ok(Category {
            id: CategoryId::new(row.id)?,
            name: row.name,
            slug: Slug::new(row.slug)?,
        })
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn list_all(&self) -> DomainResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, slug FROM categories ORDER BY name ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(Category::try_from).collect()
    }

    async fn existing_ids(&self, ids: &[CategoryId]) -> DomainResult<Vec<CategoryId>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let raw: Vec<i64> = ids.iter().copied().map(i64::from).collect();
        let found: Vec<i64> = sqlx::query_scalar("SELECT id FROM categories WHERE id = ANY($1)")
            .bind(raw)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        found.into_iter().map(CategoryId::new).collect()
    }
}
