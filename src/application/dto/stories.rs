use crate::domain::story::{Story, StoryDetails, StorySummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StoryDto {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub source: String,
    pub author_id: i64,
    pub completed: bool,
    pub published: bool,
    pub view_count: i64,
    pub latest_chapter_order: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_file_name: Option<String>,
    pub category_ids: Vec<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Story> for StoryDto {
    fn from(story: Story) -> Self {
        Self {
            id: story.id.into(),
            name: story.name.into_inner(),
            slug: story.slug.into_inner(),
            description: story.description,
            source: story.source,
            author_id: story.author_id.into(),
            completed: story.completed,
            published: story.published,
            view_count: story.view_count,
            latest_chapter_order: story.latest_chapter_order,
            photo_file_name: story.photo.map(|photo| photo.file_name.into_inner()),
            category_ids: story.category_ids.into_iter().map(Into::into).collect(),
            created_at: story.created_at,
            updated_at: story.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StoryDetailDto {
    #[serde(flatten)]
    pub story: StoryDto,
    pub author_name: String,
}

impl From<StoryDetails> for StoryDetailDto {
    fn from(details: StoryDetails) -> Self {
        Self {
            story: details.story.into(),
            author_name: details.author_name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StorySummaryDto {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_file_name: Option<String>,
    pub author_name: String,
    pub name: String,
    pub slug: String,
    pub completed: bool,
    pub view_count: i64,
    pub latest_chapter_order: i32,
    pub updated_at: DateTime<Utc>,
    pub published: bool,
}

impl From<StorySummary> for StorySummaryDto {
    fn from(summary: StorySummary) -> Self {
        Self {
            id: summary.id.into(),
            photo_file_name: summary.photo_file_name,
            author_name: summary.author_name,
            name: summary.name,
            slug: summary.slug,
            completed: summary.completed,
            view_count: summary.view_count,
            latest_chapter_order: summary.latest_chapter_order,
            updated_at: summary.updated_at,
            published: summary.published,
        }
    }
}

/// Cover image sent inline with a create or edit request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PhotoUploadDto {
    pub file_name: String,
    /// Standard base64 of the file bytes.
    pub content_base64: String,
}
