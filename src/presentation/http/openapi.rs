// src/presentation/http/openapi.rs
use crate::application::dto::{AuthorDto, Page, StorySummaryDto};
use axum::{Router, response::Redirect, routing::get};
use serde::{Deserialize, Serialize};
use std::{env, fs::File, io::BufWriter, path::Path};
use utoipa::openapi::{
    Components,
    security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa::{Modify, OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

const DEFAULT_SNAPSHOT_PATH: &str = "spec/openapi.json";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthorListResponse {
    pub items: Vec<AuthorDto>,
    pub page: u32,
    pub page_size: u32,
    pub total_items: u64,
    pub total_pages: u32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StoryListResponse {
    pub items: Vec<StorySummaryDto>,
    pub page: u32,
    pub page_size: u32,
    pub total_items: u64,
    pub total_pages: u32,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::controllers::authors::list_authors,
        crate::presentation::http::controllers::authors::suggest_authors,
        crate::presentation::http::controllers::authors::get_author,
        crate::presentation::http::controllers::authors::create_author,
        crate::presentation::http::controllers::authors::update_author,
        crate::presentation::http::controllers::authors::delete_author,
        crate::presentation::http::controllers::stories::list_stories,
        crate::presentation::http::controllers::stories::get_story,
        crate::presentation::http::controllers::stories::create_story,
        crate::presentation::http::controllers::stories::update_story,
        crate::presentation::http::controllers::stories::set_published,
        crate::presentation::http::controllers::stories::delete_story,
        crate::presentation::http::controllers::categories::list_categories,
        super::routes::health
    ),
    components(
        schemas(
            StatusResponse,
            AuthorListResponse,
            StoryListResponse,
            crate::presentation::http::error::ErrorBody,
            crate::presentation::http::controllers::authors::AuthorRequest,
            crate::presentation::http::controllers::stories::CreateStoryRequest,
            crate::presentation::http::controllers::stories::UpdateStoryRequest,
            crate::presentation::http::controllers::stories::PublishRequest,
            crate::application::dto::AuthorDto,
            crate::application::dto::AuthorOptionDto,
            crate::application::dto::CategoryDto,
            crate::application::dto::DeletionOutcome,
            crate::application::dto::PhotoUploadDto,
            crate::application::dto::StoryDto,
            crate::application::dto::StoryDetailDto,
            crate::application::dto::StorySummaryDto
        )
    ),
    tags(
        (name = "Authors", description = "Author management endpoints"),
        (name = "Stories", description = "Story management endpoints"),
        (name = "Categories", description = "Category lookup for the story form"),
        (name = "System", description = "System level endpoints")
    ),
    modifiers(&ApiDocCustomizer),
    security(("bearerAuth" = [])),
    info(
        title = "Story Desk API",
        description = "Back-office for authors and stories",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

struct ApiDocCustomizer;

impl Modify for ApiDocCustomizer {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Components::default);
        let mut http = Http::new(HttpAuthScheme::Bearer);
        http.bearer_format = Some("Biscuit".into());
        components.add_security_scheme("bearerAuth", SecurityScheme::Http(http));
    }
}

pub fn docs_router() -> Router {
    let swagger = SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi());
    Router::new()
        .merge(swagger)
        .route("/", get(|| async { Redirect::permanent("/docs") }))
}

/// Writes the document to `OPENAPI_SNAPSHOT_PATH` and returns the path used.
pub fn write_openapi_snapshot() -> std::io::Result<String> {
    let spec = ApiDoc::openapi();
    let output_path =
        env::var("OPENAPI_SNAPSHOT_PATH").unwrap_or_else(|_| DEFAULT_SNAPSHOT_PATH.to_string());
    let path = Path::new(&output_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &spec)?;
    Ok(output_path)
}

impl From<Page<AuthorDto>> for AuthorListResponse {
    fn from(page: Page<AuthorDto>) -> Self {
        Self {
            items: page.items,
            page: page.page,
            page_size: page.page_size,
            total_items: page.total_items,
            total_pages: page.total_pages,
        }
    }
}

impl From<Page<StorySummaryDto>> for StoryListResponse {
    fn from(page: Page<StorySummaryDto>) -> Self {
        Self {
            items: page.items,
            page: page.page,
            page_size: page.page_size,
            total_items: page.total_items,
            total_pages: page.total_pages,
        }
    }
}
