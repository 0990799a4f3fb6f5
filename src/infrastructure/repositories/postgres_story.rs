// src/infrastructure/repositories/postgres_story.rs
use super::map_sqlx;
use crate::domain::author::AuthorId;
use crate::domain::category::CategoryId;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::pagination::PageRequest;
use crate::domain::slug::Slug;
use crate::domain::story::{
    NewStory, PhotoFileName, PhotoId, Story, StoryDependents, StoryDetails, StoryId, StoryName,
    StoryPhoto, StoryReadRepository, StoryRemoval, StoryRemovalPlan, StorySummary, StoryUpdate,
    StoryWriteRepository,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection, PgPool, Postgres, QueryBuilder};

const STORY_SELECT: &str = "SELECT s.id, s.name, s.slug, s.description, s.source, s.author_id, \
     s.completed, s.published, s.view_count, s.latest_chapter_order, s.created_at, s.updated_at, \
     s.photo_id, p.file_name AS photo_file_name \
     FROM stories s LEFT JOIN story_photos p ON p.id = s.photo_id";

#[derive(Clone)]
pub struct PostgresStoryWriteRepository {
    pool: PgPool,
}

impl PostgresStoryWriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Clone)]
pub struct PostgresStoryReadRepository {
    pool: PgPool,
}

impl PostgresStoryReadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct StoryRow {
    id: i64,
    name: String,
    slug: String,
    description: String,
    source: String,
    author_id: i64,
    completed: bool,
    published: bool,
    view_count: i64,
    latest_chapter_order: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    photo_id: Option<i64>,
    photo_file_name: Option<String>,
}

impl StoryRow {
    fn into_story(self, category_ids: Vec<CategoryId>) -> DomainResult<Story> {
        let photo = match (self.photo_id, self.photo_file_name) {
            (Some(id), Some(file_name)) => Some(StoryPhoto {
                id: PhotoId::new(id)?,
                file_name: PhotoFileName::new(file_name)?,
            }),
            _ => None,
        };

        Ok(Story {
            id: StoryId::new(self.id)?,
            name: StoryName::new(self.name)?,
            slug: Slug::new(self.slug)?,
            description: self.description,
            source: self.source,
            author_id: AuthorId::new(self.author_id)?,
            completed: self.completed,
            published: self.published,
            view_count: self.view_count,
            latest_chapter_order: self.latest_chapter_order,
            photo,
            category_ids,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct StoryDetailsRow {
    #[sqlx(flatten)]
    story: StoryRow,
    author_name: String,
}

#[derive(Debug, FromRow)]
struct StorySummaryRow {
    id: i64,
    photo_file_name: Option<String>,
    author_name: String,
    name: String,
    slug: String,
    completed: bool,
    view_count: i64,
    latest_chapter_order: i32,
    updated_at: DateTime<Utc>,
    published: bool,
}

impl TryFrom<StorySummaryRow> for StorySummary {
    type Error = DomainError;

    fn try_from(row: StorySummaryRow) -> Result<Self, Self::Error> {
        Ok(StorySummary {
            id: StoryId::new(row.id)?,
            photo_file_name: row.photo_file_name,
            author_name: row.author_name,
            name: row.name,
            slug: row.slug,
            completed: row.completed,
            view_count: row.view_count,
            latest_chapter_order: row.latest_chapter_order,
            updated_at: row.updated_at,
            published: row.published,
        })
    }
}

async fn load_category_ids(conn: &mut PgConnection, id: StoryId) -> DomainResult<Vec<CategoryId>> {
    let raw: Vec<i64> = sqlx::query_scalar(
        "SELECT category_id FROM story_categories WHERE story_id = $1 ORDER BY category_id",
    )
    .bind(i64::from(id))
    .fetch_all(conn)
    .await
    .map_err(map_sqlx)?;

    raw.into_iter().map(CategoryId::new).collect()
}

async fn load_story(conn: &mut PgConnection, id: StoryId) -> DomainResult<Option<Story>> {
    let row = sqlx::query_as::<_, StoryRow>(&format!("{STORY_SELECT} WHERE s.id = $1"))
        .bind(i64::from(id))
        .fetch_optional(&mut *conn)
        .await
        .map_err(map_sqlx)?;

    match row {
        Some(row) => {
            let category_ids = load_category_ids(conn, id).await?;
            row.into_story(category_ids).map(Some)
        }
        None => Ok(None),
    }
}

async fn insert_photo(conn: &mut PgConnection, file_name: &PhotoFileName) -> DomainResult<i64> {
    sqlx::query_scalar("INSERT INTO story_photos (file_name) VALUES ($1) RETURNING id")
        .bind(file_name.as_str())
        .fetch_one(conn)
        .await
        .map_err(map_sqlx)
}

async fn link_categories(
    conn: &mut PgConnection,
    story_id: StoryId,
    category_ids: &[CategoryId],
) -> DomainResult<()> {
    if category_ids.is_empty() {
        return Ok(());
    }

    let mut builder: QueryBuilder<Postgres> =
        QueryBuilder::new("INSERT INTO story_categories (story_id, category_id) ");
    builder.push_values(category_ids, |mut row, category_id| {
        row.push_bind(i64::from(story_id))
            .push_bind(i64::from(*category_id));
    });
    builder.push(" ON CONFLICT DO NOTHING");

    builder
        .build()
        .execute(conn)
        .await
        .map_err(map_sqlx)?;
    Ok(())
}

async fn count_chapters(conn: &mut PgConnection, id: StoryId) -> DomainResult<u64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM chapters WHERE story_id = $1")
        .bind(i64::from(id))
        .fetch_one(conn)
        .await
        .map_err(map_sqlx)?;
    Ok(u64::try_from(count).unwrap_or_default())
}

fn push_slug_filter<'a>(builder: &mut QueryBuilder<'a, Postgres>, slug_filter: Option<&'a str>) {
    if let Some(filter) = slug_filter {
        builder.push(" WHERE s.slug LIKE '%' || ");
        builder.push_bind(filter);
        builder.push(" || '%'");
    }
}

#[async_trait]
impl StoryWriteRepository for PostgresStoryWriteRepository {
    async fn insert(&self, story: NewStory) -> DomainResult<Story> {
        let NewStory {
            name,
            slug,
            description,
            source,
            author_id,
            photo_file_name,
            category_ids,
            created_at,
            updated_at,
        } = story;

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let photo_id = insert_photo(&mut tx, &photo_file_name).await?;

        let story_id: i64 = sqlx::query_scalar(
            "INSERT INTO stories (name, slug, description, source, author_id, photo_id,
                                  completed, published, view_count, latest_chapter_order,
                                  created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, FALSE, FALSE, 0, 0, $7, $8)
             RETURNING id",
        )
        .bind(name.as_str())
        .bind(slug.as_str())
        .bind(&description)
        .bind(&source)
        .bind(i64::from(author_id))
        .bind(photo_id)
        .bind(created_at)
        .bind(updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;
        let story_id = StoryId::new(story_id)?;

        link_categories(&mut tx, story_id, &category_ids).await?;

        tx.commit().await.map_err(map_sqlx)?;

        Ok(Story {
            id: story_id,
            name,
            slug,
            description,
            source,
            author_id,
            completed: false,
            published: false,
            view_count: 0,
            latest_chapter_order: 0,
            photo: Some(StoryPhoto {
                id: PhotoId::new(photo_id)?,
                file_name: photo_file_name,
            }),
            category_ids,
            created_at,
            updated_at,
        })
    }

    async fn update(&self, update: StoryUpdate) -> DomainResult<Story> {
        let StoryUpdate {
            id,
            name,
            slug,
            description,
            source,
            author_id,
            completed,
            new_photo,
            replaced_photo,
            categories,
            original_updated_at,
            updated_at,
        } = update;

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let new_photo_id = match &new_photo {
            Some(file_name) => Some(insert_photo(&mut tx, file_name).await?),
            None => None,
        };

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE stories SET name = ");
        builder.push_bind(name.as_str());
        builder.push(", slug = ");
        builder.push_bind(slug.as_str());
        builder.push(", description = ");
        builder.push_bind(description.as_str());
        builder.push(", source = ");
        builder.push_bind(source.as_str());
        builder.push(", author_id = ");
        builder.push_bind(i64::from(author_id));
        builder.push(", completed = ");
        builder.push_bind(completed);
        builder.push(", updated_at = ");
        builder.push_bind(updated_at);
        if let Some(photo_id) = new_photo_id {
            builder.push(", photo_id = ");
            builder.push_bind(photo_id);
        }
        builder.push(" WHERE id = ");
        builder.push_bind(i64::from(id));
        builder.push(" AND updated_at = ");
        builder.push_bind(original_updated_at);
        builder.push(" RETURNING id");

        let touched: Option<i64> = builder
            .build_query_scalar()
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_sqlx)?;
        if touched.is_none() {
            return Err(DomainError::Conflict(
                "story update conflict, please retry".into(),
            ));
        }

        if let Some(old_photo) = replaced_photo {
            sqlx::query("DELETE FROM story_photos WHERE id = $1")
                .bind(i64::from(old_photo))
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx)?;
        }

        if !categories.remove.is_empty() {
            let removed: Vec<i64> = categories.remove.iter().copied().map(i64::from).collect();
            sqlx::query("DELETE FROM story_categories WHERE story_id = $1 AND category_id = ANY($2)")
                .bind(i64::from(id))
                .bind(removed)
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx)?;
        }
        link_categories(&mut tx, id, &categories.add).await?;

        let story = load_story(&mut tx, id)
            .await?
            .ok_or_else(|| DomainError::NotFound("story not found".into()))?;

        tx.commit().await.map_err(map_sqlx)?;
        Ok(story)
    }

    async fn set_published(&self, id: StoryId, published: bool) -> DomainResult<bool> {
        let result = sqlx::query("UPDATE stories SET published = $1 WHERE id = $2")
            .bind(published)
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(result.rows_affected() > 0)
    }

    async fn remove_with_dependents(&self, plan: StoryRemovalPlan) -> DomainResult<StoryRemoval> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        // Holding the row lock keeps new chapters (whose foreign key check
        // needs a key-share lock on this row) out until commit.
        let locked: Option<Option<i64>> =
            sqlx::query_scalar("SELECT photo_id FROM stories WHERE id = $1 FOR UPDATE")
                .bind(i64::from(plan.id))
                .fetch_optional(&mut *tx)
                .await
                .map_err(map_sqlx)?;
        let Some(photo_id) = locked else {
            return Ok(StoryRemoval::Missing);
        };
        if photo_id != plan.photo_id.map(i64::from) {
            return Err(DomainError::Conflict(
                "story photo changed while deleting, please retry".into(),
            ));
        }

        let chapters = count_chapters(&mut tx, plan.id).await?;
        if chapters > 0 {
            return Ok(StoryRemoval::HasChapters(chapters));
        }

        sqlx::query("DELETE FROM story_categories WHERE story_id = $1")
            .bind(i64::from(plan.id))
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        sqlx::query("DELETE FROM stories WHERE id = $1")
            .bind(i64::from(plan.id))
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        if let Some(photo_id) = photo_id {
            sqlx::query("DELETE FROM story_photos WHERE id = $1")
                .bind(photo_id)
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx)?;
        }

        tx.commit().await.map_err(map_sqlx)?;
        Ok(StoryRemoval::Removed)
    }
}

#[async_trait]
impl StoryReadRepository for PostgresStoryReadRepository {
    async fn find_by_id(&self, id: StoryId) -> DomainResult<Option<Story>> {
        let mut conn = self.pool.acquire().await.map_err(map_sqlx)?;
        load_story(&mut conn, id).await
    }

    async fn find_details(&self, id: StoryId) -> DomainResult<Option<StoryDetails>> {
        let mut conn = self.pool.acquire().await.map_err(map_sqlx)?;

        let row = sqlx::query_as::<_, StoryDetailsRow>(&format!(
            "SELECT q.*, a.name AS author_name
             FROM ({STORY_SELECT} WHERE s.id = $1) q
             JOIN authors a ON a.id = q.author_id"
        ))
        .bind(i64::from(id))
        .fetch_optional(&mut *conn)
        .await
        .map_err(map_sqlx)?;

        let Some(row) = row else {
            return Ok(None);
        };
        let category_ids = load_category_ids(&mut conn, id).await?;
        Ok(Some(StoryDetails {
            story: row.story.into_story(category_ids)?,
            author_name: row.author_name,
        }))
    }

    async fn find_with_dependents(&self, id: StoryId) -> DomainResult<Option<StoryDependents>> {
        let mut conn = self.pool.acquire().await.map_err(map_sqlx)?;

        let Some(story) = load_story(&mut conn, id).await? else {
            return Ok(None);
        };
        let chapter_count = count_chapters(&mut conn, id).await?;
        Ok(Some(StoryDependents {
            story,
            chapter_count,
        }))
    }

    async fn slug_exists(&self, slug: &Slug, exclude: Option<StoryId>) -> DomainResult<bool> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM stories WHERE slug = $1 AND ($2::BIGINT IS NULL OR id <> $2))",
        )
        .bind(slug.as_str())
        .bind(exclude.map(i64::from))
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)
    }

    async fn list_page(
        &self,
        slug_filter: Option<&str>,
        page: PageRequest,
    ) -> DomainResult<(Vec<StorySummary>, u64)> {
        let mut count: QueryBuilder<Postgres> = QueryBuilder::new("SELECT COUNT(*) FROM stories s");
        push_slug_filter(&mut count, slug_filter);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT s.id, p.file_name AS photo_file_name, a.name AS author_name, s.name, s.slug, \
             s.completed, s.view_count, s.latest_chapter_order, s.updated_at, s.published \
             FROM stories s \
             JOIN authors a ON a.id = s.author_id \
             LEFT JOIN story_photos p ON p.id = s.photo_id",
        );
        push_slug_filter(&mut builder, slug_filter);
        builder.push(" ORDER BY s.updated_at DESC, s.id DESC LIMIT ");
        builder.push_bind(page.limit());
        builder.push(" OFFSET ");
        builder.push_bind(page.offset());

        let rows = builder
            .build_query_as::<StorySummaryRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let summaries = rows
            .into_iter()
            .map(StorySummary::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((summaries, u64::try_from(total).unwrap_or_default()))
    }
}
