// src/presentation/http/controllers/authors.rs
use crate::application::{
    commands::authors::{CreateAuthorCommand, DeleteAuthorCommand, UpdateAuthorCommand},
    dto::{AuthorDto, AuthorOptionDto, DeletionOutcome},
    queries::authors::{GetAuthorQuery, ListAuthorsQuery, SuggestAuthorsQuery},
};
use crate::presentation::http::error::{ErrorBody, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::openapi::AuthorListResponse;
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
pub struct AuthorListParams {
    /// Free text, matched against author slugs.
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default = "default_page")]
    pub page: u32,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SuggestParams {
    #[serde(default)]
    pub q: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AuthorRequest {
    pub name: String,
}

#[utoipa::path(
    get,
    path = "/api/v1/authors",
    params(AuthorListParams),
    responses(
        (status = 200, description = "Page of authors, most recently updated first.", body = AuthorListResponse),
        (status = 401, body = ErrorBody),
        (status = 403, body = ErrorBody)
    ),
    tag = "Authors"
)]
pub async fn list_authors(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Query(params): Query<AuthorListParams>,
) -> HttpResult<Json<AuthorListResponse>> {
    let query = ListAuthorsQuery {
        search: params.q,
        page: params.page,
    };

    state
        .services
        .author_queries
        .list_authors(&user, query)
        .await
        .into_http()
        .map(|page| Json(page.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/authors/suggest",
    params(SuggestParams),
    responses(
        (status = 200, description = "Author picker options.", body = [AuthorOptionDto]),
        (status = 401, body = ErrorBody)
    ),
    tag = "Authors"
)]
pub async fn suggest_authors(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Query(params): Query<SuggestParams>,
) -> HttpResult<Json<Vec<AuthorOptionDto>>> {
    state
        .services
        .author_queries
        .suggest_authors(&user, SuggestAuthorsQuery { query: params.q })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/authors/{id}",
    params(("id" = i64, Path, description = "Author id")),
    responses(
        (status = 200, body = AuthorDto),
        (status = 404, body = ErrorBody)
    ),
    tag = "Authors"
)]
pub async fn get_author(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<AuthorDto>> {
    state
        .services
        .author_queries
        .get_author(&user, GetAuthorQuery { id })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/authors",
    request_body = AuthorRequest,
    responses(
        (status = 201, body = AuthorDto),
        (status = 400, body = ErrorBody),
        (status = 409, body = ErrorBody)
    ),
    tag = "Authors"
)]
pub async fn create_author(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Json(payload): Json<AuthorRequest>,
) -> HttpResult<(StatusCode, Json<AuthorDto>)> {
    let command = CreateAuthorCommand { name: payload.name };

    state
        .services
        .author_commands
        .create_author(&user, command)
        .await
        .into_http()
        .map(|author| (StatusCode::CREATED, Json(author)))
}

#[utoipa::path(
    put,
    path = "/api/v1/authors/{id}",
    params(("id" = i64, Path, description = "Author id")),
    request_body = AuthorRequest,
    responses(
        (status = 200, body = AuthorDto),
        (status = 400, body = ErrorBody),
        (status = 404, body = ErrorBody),
        (status = 409, body = ErrorBody)
    ),
    tag = "Authors"
)]
pub async fn update_author(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<AuthorRequest>,
) -> HttpResult<Json<AuthorDto>> {
    let command = UpdateAuthorCommand {
        id,
        name: payload.name,
    };

    state
        .services
        .author_commands
        .update_author(&user, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/authors/{id}",
    params(("id" = i64, Path, description = "Author id")),
    responses(
        (status = 200, description = "Author deleted.", body = DeletionOutcome),
        (status = 404, body = ErrorBody),
        (status = 409, description = "Stories still reference the author.", body = DeletionOutcome),
        (status = 500, description = "Storage failure; nothing was removed.", body = DeletionOutcome)
    ),
    tag = "Authors"
)]
pub async fn delete_author(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<DeletionOutcome> {
    state
        .services
        .author_commands
        .delete_author(&user, DeleteAuthorCommand { id })
        .await
        .into_http()
}
