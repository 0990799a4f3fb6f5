// src/presentation/http/controllers/stories.rs
use crate::application::{
    commands::stories::{
        CreateStoryCommand, DeleteStoryCommand, PhotoUpload, SetPublishedCommand,
        UpdateStoryCommand,
    },
    dto::{DeletionOutcome, PhotoUploadDto, StoryDetailDto, StoryDto},
    error::ApplicationError,
    queries::stories::{GetStoryQuery, ListStoriesQuery},
};
use crate::presentation::http::error::{ErrorBody, HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::openapi::StoryListResponse;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

fn default_page() -> u32 {
    1
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct StoryListParams {
    /// Free text, matched against story slugs.
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default = "default_page")]
    pub page: u32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateStoryRequest {
    pub name: String,
    /// `0` or absent means no author was picked.
    #[serde(default)]
    pub author_id: Option<i64>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub category_ids: Vec<i64>,
    #[serde(default)]
    pub photo: Option<PhotoUploadDto>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStoryRequest {
    pub name: String,
    #[serde(default)]
    pub author_id: Option<i64>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub category_ids: Vec<i64>,
    /// Replaces the current cover when present.
    #[serde(default)]
    pub photo: Option<PhotoUploadDto>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PublishRequest {
    pub published: bool,
}

fn decode_photo(photo: Option<PhotoUploadDto>) -> HttpResult<Option<PhotoUpload>> {
    photo.map(PhotoUpload::decode).transpose().into_http()
}

#[utoipa::path(
    get,
    path = "/api/v1/stories",
    params(StoryListParams),
    responses(
        (status = 200, description = "Page of stories, most recently updated first.", body = StoryListResponse),
        (status = 401, body = ErrorBody)
    ),
    tag = "Stories"
)]
pub async fn list_stories(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Query(params): Query<StoryListParams>,
) -> HttpResult<Json<StoryListResponse>> {
    let query = ListStoriesQuery {
        search: params.q,
        page: params.page,
    };

    state
        .services
        .story_queries
        .list_stories(&user, query)
        .await
        .into_http()
        .map(|page| Json(page.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/stories/{id}",
    params(("id" = i64, Path, description = "Story id")),
    responses(
        (status = 200, body = StoryDetailDto),
        (status = 404, body = ErrorBody)
    ),
    tag = "Stories"
)]
pub async fn get_story(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<StoryDetailDto>> {
    state
        .services
        .story_queries
        .get_story(&user, GetStoryQuery { id })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/stories",
    request_body = CreateStoryRequest,
    responses(
        (status = 201, body = StoryDto),
        (status = 400, body = ErrorBody),
        (status = 409, body = ErrorBody)
    ),
    tag = "Stories"
)]
pub async fn create_story(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Json(payload): Json<CreateStoryRequest>,
) -> HttpResult<(StatusCode, Json<StoryDto>)> {
    let mut builder = CreateStoryCommand::builder()
        .name(payload.name)
        .description(payload.description)
        .source(payload.source)
        .category_ids(payload.category_ids);
    if let Some(author_id) = payload.author_id {
        builder = builder.author_id(author_id);
    }
    if let Some(photo) = decode_photo(payload.photo)? {
        builder = builder.photo(photo);
    }
    let command = builder
        .build()
        .map_err(|msg| HttpError::from_error(ApplicationError::validation(msg)))?;

    state
        .services
        .story_commands
        .create_story(&user, command)
        .await
        .into_http()
        .map(|story| (StatusCode::CREATED, Json(story)))
}

#[utoipa::path(
    put,
    path = "/api/v1/stories/{id}",
    params(("id" = i64, Path, description = "Story id")),
    request_body = UpdateStoryRequest,
    responses(
        (status = 200, body = StoryDto),
        (status = 400, body = ErrorBody),
        (status = 404, body = ErrorBody),
        (status = 409, body = ErrorBody)
    ),
    tag = "Stories"
)]
pub async fn update_story(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateStoryRequest>,
) -> HttpResult<Json<StoryDto>> {
    let command = UpdateStoryCommand {
        id,
        name: payload.name,
        author_id: payload.author_id,
        description: payload.description,
        source: payload.source,
        completed: payload.completed,
        category_ids: payload.category_ids,
        photo: decode_photo(payload.photo)?,
    };

    state
        .services
        .story_commands
        .update_story(&user, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    put,
    path = "/api/v1/stories/{id}/published",
    params(("id" = i64, Path, description = "Story id")),
    request_body = PublishRequest,
    responses(
        (status = 204, description = "Visibility updated."),
        (status = 404, body = ErrorBody)
    ),
    tag = "Stories"
)]
pub async fn set_published(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<PublishRequest>,
) -> HttpResult<StatusCode> {
    let command = SetPublishedCommand {
        id,
        published: payload.published,
    };

    state
        .services
        .story_commands
        .set_published(&user, command)
        .await
        .into_http()?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/v1/stories/{id}",
    params(("id" = i64, Path, description = "Story id")),
    responses(
        (status = 200, description = "Story, cover and category links deleted.", body = DeletionOutcome),
        (status = 404, body = ErrorBody),
        (status = 409, description = "The story still has chapters.", body = DeletionOutcome),
        (status = 500, description = "Storage failure; nothing was removed.", body = DeletionOutcome)
    ),
    tag = "Stories"
)]
pub async fn delete_story(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<DeletionOutcome> {
    state
        .services
        .story_commands
        .delete_story(&user, DeleteStoryCommand { id })
        .await
        .into_http()
}
