//! Video API tests.
//!
//! Run with: `cargo test -p vidshelf-api --test videos_test`

mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use helpers::{setup_test_app, setup_test_app_with_limit, video_bytes, video_form, video_part};
use serde_json::Value;

fn is_generated_name(filename: &str, ext: &str) -> bool {
    let Some(stem) = filename.strip_suffix(ext) else {
        return false;
    };
    let mut parts = stem.splitn(2, '-');
    let millis = parts.next().unwrap_or_default();
    let random = parts.next().unwrap_or_default();
    !millis.is_empty()
        && !random.is_empty()
        && millis.chars().all(|c| c.is_ascii_digit())
        && random.chars().all(|c| c.is_ascii_digit())
}

#[tokio::test]
async fn test_upload_cat_video_then_list() {
    let app = setup_test_app().await;
    let client = app.client();
    let data = video_bytes(5 * 1024);

    let response = client
        .post("/api/videos")
        .multipart(
            MultipartForm::new()
                .add_text("title", "Cat video")
                .add_text("description", "funny cat")
                .add_part("video", video_part(data.clone(), "cat.mp4", "video/mp4")),
        )
        .await;

    assert_eq!(response.status_code(), 201);
    let body: Value = response.json();
    assert_eq!(body["title"], "Cat video");
    assert_eq!(body["description"], "funny cat");
    let filename = body["filename"].as_str().unwrap().to_string();
    assert!(is_generated_name(&filename, ".mp4"), "got {}", filename);
    let video_url = body["videoUrl"].as_str().unwrap();
    assert!(video_url.starts_with("http://"));
    assert!(video_url.ends_with(&format!("/uploads/{}", filename)));
    assert!(body["id"].is_string());
    assert!(body["createdAt"].is_string());

    let listed: Value = client.get("/api/videos").await.json();
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["filename"], filename.as_str());

    let served = client.get(&format!("/uploads/{}", filename)).await;
    assert_eq!(served.status_code(), 200);
    assert_eq!(served.as_bytes().as_ref(), data.as_slice());
    assert_eq!(app.stored_files(), vec![filename]);
}

#[tokio::test]
async fn test_fields_after_file_are_accepted() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/api/videos")
        .multipart(
            MultipartForm::new()
                .add_part("video", video_part(video_bytes(128), "late.webm", "video/webm"))
                .add_text("title", "Late fields")
                .add_text("description", "text after file"),
        )
        .await;

    assert_eq!(response.status_code(), 201);
    let body: Value = response.json();
    assert!(is_generated_name(body["filename"].as_str().unwrap(), ".webm"));
}

#[tokio::test]
async fn test_missing_title_leaves_directory_unchanged() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/api/videos")
        .multipart(
            MultipartForm::new()
                .add_part("video", video_part(video_bytes(256), "a.mp4", "video/mp4"))
                .add_text("description", "no title here"),
        )
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["message"], "Title and description are required");
    assert!(app.stored_files().is_empty());
    assert!(app.repo.is_empty().await);
}

#[tokio::test]
async fn test_empty_description_rejected() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/api/videos")
        .multipart(video_form("Title", "", video_bytes(64)))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["message"], "Title and description are required");
    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn test_missing_file_rejected() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/api/videos")
        .multipart(
            MultipartForm::new()
                .add_text("title", "No file")
                .add_text("description", "nothing attached"),
        )
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["message"], "Video file is required");
    assert!(app.repo.is_empty().await);
}

#[tokio::test]
async fn test_oversize_upload_rejected_without_partial_file() {
    let app = setup_test_app_with_limit(1024).await;

    let response = app
        .client()
        .post("/api/videos")
        .multipart(video_form("Big", "too many bytes", video_bytes(200 * 1024)))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["message"], "File too large");
    assert!(app.stored_files().is_empty());
    assert!(app.repo.is_empty().await);
}

#[tokio::test]
async fn test_file_exactly_at_limit_accepted() {
    let app = setup_test_app_with_limit(1024).await;

    let response = app
        .client()
        .post("/api/videos")
        .multipart(video_form("Edge", "exactly the cap", video_bytes(1024)))
        .await;

    assert_eq!(response.status_code(), 201);
    assert_eq!(app.stored_files().len(), 1);
}

#[tokio::test]
async fn test_disallowed_type_creates_nothing() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/api/videos")
        .multipart(
            MultipartForm::new()
                .add_text("title", "Picture")
                .add_text("description", "not a video")
                .add_part("video", video_part(video_bytes(64), "cat.png", "image/png")),
        )
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(
        body["message"],
        "Invalid file type. Only MP4, WebM, Ogg, and QuickTime videos are allowed."
    );
    assert!(app.stored_files().is_empty());
    assert!(app.repo.is_empty().await);
}

#[tokio::test]
async fn test_media_type_parameters_are_ignored() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/api/videos")
        .multipart(
            MultipartForm::new()
                .add_text("title", "Codecs")
                .add_text("description", "declared with parameters")
                .add_part(
                    "video",
                    video_part(video_bytes(64), "clip.mov", "Video/QuickTime; codecs=avc1"),
                ),
        )
        .await;

    assert_eq!(response.status_code(), 201);
}

#[tokio::test]
async fn test_non_multipart_request_is_upload_error() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/api/videos")
        .json(&serde_json::json!({ "title": "x", "description": "y" }))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["message"], "File upload error");
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let app = setup_test_app().await;
    let client = app.client();

    let mut created = Vec::new();
    for i in 0..3 {
        let body: Value = client
            .post("/api/videos")
            .multipart(video_form(
                &format!("Video {}", i),
                "ordering",
                video_bytes(32),
            ))
            .await
            .json();
        created.push(body["filename"].as_str().unwrap().to_string());
    }

    let listed: Value = client.get("/api/videos").await.json();
    let names: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["filename"].as_str().unwrap())
        .collect();
    let expected: Vec<&str> = created.iter().rev().map(String::as_str).collect();
    assert_eq!(names, expected);
}

#[tokio::test]
async fn test_empty_list() {
    let app = setup_test_app().await;
    let response = app.client().get("/api/videos").await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>(), serde_json::json!([]));
}

#[tokio::test]
async fn test_list_failure_reports_fetch_error() {
    let app = setup_test_app().await;
    app.repo.set_unavailable(true);

    let response = app.client().get("/api/videos").await;

    assert_eq!(response.status_code(), 500);
    let body: Value = response.json();
    assert_eq!(body["message"], "Error fetching videos");
}

#[tokio::test]
async fn test_insert_failure_removes_stored_file() {
    let app = setup_test_app().await;
    app.repo.set_unavailable(true);

    let response = app
        .client()
        .post("/api/videos")
        .multipart(video_form("Orphan", "store is down", video_bytes(512)))
        .await;

    assert_eq!(response.status_code(), 500);
    let body: Value = response.json();
    assert_eq!(body["message"], "Failed to access database");
    assert!(body.get("details").is_none());
    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn test_missing_upload_is_not_found() {
    let app = setup_test_app().await;
    let response = app.client().get("/uploads/0-0.mp4").await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_empty_file_input_is_missing_file() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/api/videos")
        .multipart(
            MultipartForm::new()
                .add_text("title", "Empty input")
                .add_text("description", "no file chosen")
                .add_part(
                    "video",
                    Part::bytes(Vec::<u8>::new())
                        .file_name("")
                        .mime_type("application/octet-stream"),
                ),
        )
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["message"], "Video file is required");
    assert!(app.stored_files().is_empty());
    assert!(app.repo.is_empty().await);
}

#[tokio::test]
async fn test_text_video_field_is_missing_file() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/api/videos")
        .multipart(
            MultipartForm::new()
                .add_text("title", "Text only")
                .add_text("description", "video sent as a value")
                .add_text("video", "not a file"),
        )
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["message"], "Video file is required");
    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn test_body_over_request_limit_is_file_too_large() {
    let app = setup_test_app_with_limit(1024).await;
    let oversized_title = "t".repeat(2 * 1024 * 1024);

    let response = app
        .client()
        .post("/api/videos")
        .multipart(
            MultipartForm::new()
                .add_text("title", oversized_title)
                .add_text("description", "body larger than the request limit")
                .add_part("video", video_part(video_bytes(64), "clip.mp4", "video/mp4")),
        )
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["message"], "File too large");
    assert!(app.stored_files().is_empty());
    assert!(app.repo.is_empty().await);
}
