//! Test helpers: build AppState and router for API tests.
//!
//! The record store is the in-memory repository and the storage directory is a
//! fresh temp dir per test, so no database or Docker is needed.

#![allow(dead_code)]

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use vidshelf_api::setup::routes::setup_routes;
use vidshelf_api::AppState;
use vidshelf_core::{Config, LogFormat};
use vidshelf_db::test_helpers::InMemoryVideoRepository;
use vidshelf_storage::LocalStorage;

/// Per-file cap used by tests unless a test asks for another one.
pub const TEST_MAX_UPLOAD_BYTES: u64 = 64 * 1024;

/// Test application: server plus the resources behind it.
pub struct TestApp {
    pub server: TestServer,
    pub repo: Arc<InMemoryVideoRepository>,
    pub upload_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Names of the files currently in the storage directory.
    pub fn stored_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.upload_dir.path())
            .expect("Failed to read upload directory")
            .map(|entry| {
                entry
                    .expect("Failed to read directory entry")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        names.sort();
        names
    }
}

pub fn test_config(upload_dir: &Path, max_upload_size_bytes: u64) -> Config {
    Config {
        server_port: 5000,
        database_url: "postgres://localhost/vidshelf_test".to_string(),
        db_max_connections: 1,
        db_timeout_seconds: 1,
        upload_dir: upload_dir.to_path_buf(),
        max_upload_size_bytes,
        cors_origins: vec!["*".to_string()],
        environment: "test".to_string(),
        log_format: LogFormat::Compact,
    }
}

pub async fn setup_test_app() -> TestApp {
    setup_test_app_with_limit(TEST_MAX_UPLOAD_BYTES).await
}

pub async fn setup_test_app_with_limit(max_upload_size_bytes: u64) -> TestApp {
    let upload_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let config = test_config(upload_dir.path(), max_upload_size_bytes);

    let storage = LocalStorage::new(upload_dir.path())
        .await
        .expect("Failed to create local storage");
    let repo = Arc::new(InMemoryVideoRepository::new());

    let state = AppState::new(config.clone(), repo.clone(), Arc::new(storage));
    let router = setup_routes(&config, state).expect("Failed to build routes");
    let server = TestServer::new(router).expect("Failed to start test server");

    TestApp {
        server,
        repo,
        upload_dir,
    }
}

/// `len` bytes of deterministic, non-repeating-looking content.
pub fn video_bytes(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 31 % 251) as u8).collect()
}

pub fn video_part(data: Vec<u8>, file_name: &str, mime_type: &str) -> Part {
    Part::bytes(data).file_name(file_name).mime_type(mime_type)
}

/// Well-formed upload form: title, description, then the file.
pub fn video_form(title: &str, description: &str, data: Vec<u8>) -> MultipartForm {
    MultipartForm::new()
        .add_text("title", title)
        .add_text("description", description)
        .add_part("video", video_part(data, "clip.mp4", "video/mp4"))
}
