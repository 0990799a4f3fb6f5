// tests/e2e_http.rs
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde_json::{Value, json};
use story_desk::application::commands::stories::MAX_PHOTO_BYTES;
use tower::util::ServiceExt as _;

mod support;

use support::{
    ADMIN_TOKEN, EDITOR_TOKEN, EXPIRED_TOKEN, READER_TOKEN, TEST_ORIGIN, assert_error_response,
    authed, backend, json_body, make_test_router,
};

async fn post_author(app: &axum::Router, name: &str) -> Value {
    let resp = app
        .clone()
        .oneshot(authed(
            "POST",
            "/api/v1/authors",
            ADMIN_TOKEN,
            Some(json!({ "name": name })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    json_body(resp).await
}

async fn post_story(app: &axum::Router, name: &str, author_id: i64) -> Value {
    let resp = app
        .clone()
        .oneshot(authed(
            "POST",
            "/api/v1/stories",
            EDITOR_TOKEN,
            Some(json!({
                "name": name,
                "author_id": author_id,
                "description": "",
                "source": "",
                "category_ids": [1],
                "photo": { "file_name": "cover.png", "content_base64": "aGVsbG8=" }
            })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    json_body(resp).await
}

#[tokio::test]
async fn health_is_public() {
    let backend = backend();
    let app = make_test_router(&backend);

    let req = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["status"], "ok");
}

#[tokio::test]
async fn missing_token_returns_401() {
    let backend = backend();
    let app = make_test_router(&backend);

    let req = Request::builder()
        .method("GET")
        .uri("/api/v1/authors")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_error_response(resp, StatusCode::UNAUTHORIZED, "Unauthorized").await;
}

#[tokio::test]
async fn expired_token_returns_401() {
    let backend = backend();
    let app = make_test_router(&backend);

    let resp = app
        .oneshot(authed("GET", "/api/v1/stories", EXPIRED_TOKEN, None))
        .await
        .unwrap();

    assert_error_response(resp, StatusCode::UNAUTHORIZED, "Unauthorized").await;
}

#[tokio::test]
async fn reader_is_forbidden() {
    let backend = backend();
    let app = make_test_router(&backend);

    let resp = app
        .oneshot(authed(
            "POST",
            "/api/v1/authors",
            READER_TOKEN,
            Some(json!({ "name": "Kim Dung" })),
        ))
        .await
        .unwrap();

    assert_error_response(resp, StatusCode::FORBIDDEN, "Forbidden").await;
}

#[tokio::test]
async fn create_then_list_authors() {
    let backend = backend();
    let app = make_test_router(&backend);

    let created = post_author(&app, "Kim Dung").await;
    assert_eq!(created["slug"], "kim-dung");

    let resp = app
        .oneshot(authed("GET", "/api/v1/authors?q=kim", EDITOR_TOKEN, None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let page = json_body(resp).await;
    assert_eq!(page["total_items"], 1);
    assert_eq!(page["items"][0]["name"], "Kim Dung");
}

#[tokio::test]
async fn blank_author_name_is_400() {
    let backend = backend();
    let app = make_test_router(&backend);

    let resp = app
        .oneshot(authed(
            "POST",
            "/api/v1/authors",
            ADMIN_TOKEN,
            Some(json!({ "name": "" })),
        ))
        .await
        .unwrap();

    assert_error_response(resp, StatusCode::BAD_REQUEST, "Bad Request").await;
}

#[tokio::test]
async fn unknown_author_is_404() {
    let backend = backend();
    let app = make_test_router(&backend);

    let resp = app
        .oneshot(authed("GET", "/api/v1/authors/41", ADMIN_TOKEN, None))
        .await
        .unwrap();

    assert_error_response(resp, StatusCode::NOT_FOUND, "Not Found").await;
}

#[tokio::test]
async fn deleting_referenced_author_is_409_then_200_once_free() {
    let backend = backend();
    let app = make_test_router(&backend);
    let author = post_author(&app, "Kim Dung").await;
    let author_id = author["id"].as_i64().unwrap();
    let story = post_story(&app, "Lộc Đỉnh Ký", author_id).await;
    let story_id = story["id"].as_i64().unwrap();

    let resp = app
        .clone()
        .oneshot(authed(
            "DELETE",
            &format!("/api/v1/authors/{author_id}"),
            ADMIN_TOKEN,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(json_body(resp).await["status"], "blocked");

    let resp = app
        .clone()
        .oneshot(authed(
            "DELETE",
            &format!("/api/v1/stories/{story_id}"),
            ADMIN_TOKEN,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["status"], "committed");

    let resp = app
        .oneshot(authed(
            "DELETE",
            &format!("/api/v1/authors/{author_id}"),
            ADMIN_TOKEN,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(backend.catalog.author(author_id).is_none());
    assert_eq!(backend.photos.deleted(), vec!["photo-1.png".to_string()]);
}

#[tokio::test]
async fn story_with_chapters_delete_is_409_with_count() {
    let backend = backend();
    let app = make_test_router(&backend);
    let author = post_author(&app, "Kim Dung").await;
    let story = post_story(&app, "Lộc Đỉnh Ký", author["id"].as_i64().unwrap()).await;
    let story_id = story["id"].as_i64().unwrap();
    backend.catalog.set_chapter_count(story_id, 12);

    let resp = app
        .oneshot(authed(
            "DELETE",
            &format!("/api/v1/stories/{story_id}"),
            ADMIN_TOKEN,
            None,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body = json_body(resp).await;
    assert_eq!(body["dependents"], 12);
    assert!(body["message"].as_str().unwrap().contains("12"));
}

#[tokio::test]
async fn failed_delete_is_500_with_outcome_body() {
    let backend = backend();
    let app = make_test_router(&backend);
    let author = post_author(&app, "Kim Dung").await;
    backend.catalog.fail_removals();

    let resp = app
        .oneshot(authed(
            "DELETE",
            &format!("/api/v1/authors/{}", author["id"]),
            ADMIN_TOKEN,
            None,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(resp).await["status"], "failed");
}

#[tokio::test]
async fn publish_returns_204_and_detail_shows_it() {
    let backend = backend();
    let app = make_test_router(&backend);
    let author = post_author(&app, "Kim Dung").await;
    let story = post_story(&app, "Lộc Đỉnh Ký", author["id"].as_i64().unwrap()).await;
    let story_id = story["id"].as_i64().unwrap();

    let resp = app
        .clone()
        .oneshot(authed(
            "PUT",
            &format!("/api/v1/stories/{story_id}/published"),
            EDITOR_TOKEN,
            Some(json!({ "published": true })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = app
        .oneshot(authed(
            "GET",
            &format!("/api/v1/stories/{story_id}"),
            EDITOR_TOKEN,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let detail = json_body(resp).await;
    assert_eq!(detail["published"], true);
    assert_eq!(detail["author_name"], "Kim Dung");
}

#[tokio::test]
async fn bad_photo_encoding_is_400() {
    let backend = backend();
    let app = make_test_router(&backend);
    let author = post_author(&app, "Kim Dung").await;

    let resp = app
        .oneshot(authed(
            "POST",
            "/api/v1/stories",
            ADMIN_TOKEN,
            Some(json!({
                "name": "Lộc Đỉnh Ký",
                "author_id": author["id"],
                "photo": { "file_name": "cover.png", "content_base64": "%%%" }
            })),
        ))
        .await
        .unwrap();

    assert_error_response(resp, StatusCode::BAD_REQUEST, "Bad Request").await;
    assert!(backend.photos.stored().is_empty());
}

fn story_with_cover(author_id: &Value, cover_len: usize) -> Value {
    json!({
        "name": "Lộc Đỉnh Ký",
        "author_id": author_id,
        "category_ids": [1],
        "photo": {
            "file_name": "cover.jpg",
            "content_base64": STANDARD.encode(vec![0xAB; cover_len]),
        }
    })
}

#[tokio::test]
async fn cover_just_under_limit_is_accepted() {
    let backend = backend();
    let app = make_test_router(&backend);
    let author = post_author(&app, "Kim Dung").await;

    let resp = app
        .oneshot(authed(
            "POST",
            "/api/v1/stories",
            EDITOR_TOKEN,
            Some(story_with_cover(&author["id"], MAX_PHOTO_BYTES - 1024)),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(backend.photos.stored(), vec!["photo-1.jpg".to_string()]);
}

#[tokio::test]
async fn oversized_cover_is_400_not_413() {
    let backend = backend();
    let app = make_test_router(&backend);
    let author = post_author(&app, "Kim Dung").await;

    let resp = app
        .oneshot(authed(
            "POST",
            "/api/v1/stories",
            EDITOR_TOKEN,
            Some(story_with_cover(&author["id"], MAX_PHOTO_BYTES + 1)),
        ))
        .await
        .unwrap();

    assert_error_response(resp, StatusCode::BAD_REQUEST, "Bad Request").await;
    assert!(backend.photos.stored().is_empty());
}

#[tokio::test]
async fn story_listing_reports_author_names() {
    let backend = backend();
    let app = make_test_router(&backend);
    let author = post_author(&app, "Kim Dung").await;
    post_story(&app, "Lộc Đỉnh Ký", author["id"].as_i64().unwrap()).await;

    let resp = app
        .oneshot(authed("GET", "/api/v1/stories?page=1", ADMIN_TOKEN, None))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let page = json_body(resp).await;
    assert_eq!(page["items"][0]["author_name"], "Kim Dung");
    assert_eq!(page["items"][0]["slug"], "loc-dinh-ky");
}

#[tokio::test]
async fn cors_preflight_allows_configured_origin() {
    let backend = backend();
    let app = make_test_router(&backend);

    let req = Request::builder()
        .method("OPTIONS")
        .uri("/api/v1/authors")
        .header(header::ORIGIN, TEST_ORIGIN)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some(TEST_ORIGIN)
    );
}

#[tokio::test]
async fn openapi_document_is_served() {
    let backend = backend();
    let app = make_test_router(&backend);

    let req = Request::builder()
        .method("GET")
        .uri("/openapi.json")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let doc = json_body(resp).await;
    assert!(doc["paths"].get("/api/v1/stories/{id}").is_some());
}
