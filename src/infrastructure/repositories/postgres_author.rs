// src/infrastructure/repositories/postgres_author.rs
use super::map_sqlx;
use crate::domain::author::{
    Author, AuthorId, AuthorName, AuthorReadRepository, AuthorRemoval, AuthorUpdate,
    AuthorWriteRepository, NewAuthor,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::pagination::PageRequest;
use crate::domain::slug::Slug;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

const AUTHOR_COLUMNS: &str = "id, name, slug, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresAuthorWriteRepository {
    pool: PgPool,
}

impl PostgresAuthorWriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Clone)]
pub struct PostgresAuthorReadRepository {
    pool: PgPool,
}

impl PostgresAuthorReadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AuthorRow {
    id: i64,
    name: String,
    slug: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AuthorRow> for Author {
    type Error = DomainError;

    fn try_from(row: AuthorRow) -> Result<Self, Self::Error> {
        Ok(Author {
            id: AuthorId::new(row.id)?,
            name: AuthorName::new(row.name)?,
            slug: Slug::new(row.slug)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn push_slug_filter<'a>(builder: &mut QueryBuilder<'a, Postgres>, slug_filter: Option<&'a str>) {
    if let Some(filter) = slug_filter {
        builder.push(" WHERE slug LIKE '%' || ");
        builder.push_bind(filter);
        builder.push(" || '%'");
    }
}

#[async_trait]
impl AuthorWriteRepository for PostgresAuthorWriteRepository {
    async fn insert(&self, author: NewAuthor) -> DomainResult<Author> {
        let NewAuthor {
            name,
            slug,
            created_at,
            updated_at,
        } = author;

        let row = sqlx::query_as::<_, AuthorRow>(&format!(
            "INSERT INTO authors (name, slug, created_at, updated_at)
             VALUES ($1, $2, $3, $4)
             RETURNING {AUTHOR_COLUMNS}"
        ))
        .bind(name.as_str())
        .bind(slug.as_str())
        .bind(created_at)
        .bind(updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Author::try_from(row)
    }

    async fn update(&self, update: AuthorUpdate) -> DomainResult<Author> {
        let AuthorUpdate {
            id,
            name,
            slug,
            original_updated_at,
            updated_at,
        } = update;

        let maybe_row = sqlx::query_as::<_, AuthorRow>(&format!(
            "UPDATE authors SET name = $1, slug = $2, updated_at = $3
             WHERE id = $4 AND updated_at = $5
             RETURNING {AUTHOR_COLUMNS}"
        ))
        .bind(name.as_str())
        .bind(slug.as_str())
        .bind(updated_at)
        .bind(i64::from(id))
        .bind(original_updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        let row = maybe_row
            .ok_or_else(|| DomainError::Conflict("author update conflict, please retry".into()))?;

        Author::try_from(row)
    }

    async fn remove_unreferenced(&self, id: AuthorId) -> DomainResult<AuthorRemoval> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        // The row lock conflicts with the key-share lock a new story's foreign
        // key check takes, so no story can attach until this commits.
        let locked: Option<i64> = sqlx::query_scalar("SELECT id FROM authors WHERE id = $1 FOR UPDATE")
            .bind(i64::from(id))
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_sqlx)?;
        if locked.is_none() {
            return Ok(AuthorRemoval::Missing);
        }

        let referenced: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM stories WHERE author_id = $1)")
                .bind(i64::from(id))
                .fetch_one(&mut *tx)
                .await
                .map_err(map_sqlx)?;
        if referenced {
            return Ok(AuthorRemoval::StillReferenced);
        }

        sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(i64::from(id))
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        tx.commit().await.map_err(map_sqlx)?;
        Ok(AuthorRemoval::Removed)
    }
}

#[async_trait]
impl AuthorReadRepository for PostgresAuthorReadRepository {
    async fn find_by_id(&self, id: AuthorId) -> DomainResult<Option<Author>> {
        let row = sqlx::query_as::<_, AuthorRow>(&format!(
            "SELECT {AUTHOR_COLUMNS} FROM authors WHERE id = $1"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Author::try_from).transpose()
    }

    async fn slug_exists(&self, slug: &Slug, exclude: Option<AuthorId>) -> DomainResult<bool> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM authors WHERE slug = $1 AND ($2::BIGINT IS NULL OR id <> $2))",
        )
        .bind(slug.as_str())
        .bind(exclude.map(i64::from))
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)
    }

    async fn has_stories(&self, id: AuthorId) -> DomainResult<bool> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM stories WHERE author_id = $1)")
            .bind(i64::from(id))
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)
    }

    async fn list_page(
        &self,
        slug_filter: Option<&str>,
        page: PageRequest,
    ) -> DomainResult<(Vec<Author>, u64)> {
        let mut count: QueryBuilder<Postgres> = QueryBuilder::new("SELECT COUNT(*) FROM authors");
        push_slug_filter(&mut count, slug_filter);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {AUTHOR_COLUMNS} FROM authors"));
        push_slug_filter(&mut builder, slug_filter);
        builder.push(" ORDER BY updated_at DESC, id DESC LIMIT ");
        builder.push_bind(page.limit());
        builder.push(" OFFSET ");
        builder.push_bind(page.offset());

        let rows = builder
            .build_query_as::<AuthorRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let authors = rows
            .into_iter()
            .map(Author::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((authors, u64::try_from(total).unwrap_or_default()))
    }

    async fn search_by_slug(&self, slug_filter: &str, limit: u32) -> DomainResult<Vec<Author>> {
        let rows = sqlx::query_as::<_, AuthorRow>(&format!(
            "SELECT {AUTHOR_COLUMNS} FROM authors
             WHERE slug LIKE '%' || $1 || '%'
             ORDER BY name ASC, id ASC
             LIMIT $2"
        ))
        .bind(slug_filter)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(Author::try_from).collect()
    }
}
