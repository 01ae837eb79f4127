//! In-memory repository for tests.

use crate::video::VideoRepository;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;
use validator::Validate;
use vidshelf_core::{
    models::{NewVideo, VideoRecord},
    AppError,
};

#[cfg(test)]
use vidshelf_core::ErrorMetadata;

/// Keeps records in insertion order and applies the same ordering rules as the
/// PostgreSQL repository.
#[derive(Default)]
pub struct InMemoryVideoRepository {
    records: RwLock<Vec<VideoRecord>>,
    unavailable: AtomicBool,
}

impl InMemoryVideoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail as if the database were unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    fn check_available(&self) -> Result<(), AppError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl VideoRepository for InMemoryVideoRepository {
    async fn insert(&self, video: NewVideo) -> Result<VideoRecord, AppError> {
        self.check_available()?;
        video.validate()?;

        let mut records = self.records.write().await;
        if records.iter().any(|r| r.filename == video.filename) {
            // Mirrors the unique constraint on videos.filename.
            return Err(AppError::Database(sqlx::Error::Protocol(format!(
                "duplicate key value violates unique constraint on filename {}",
                video.filename
            ))));
        }

        let record = video.into_record(Uuid::new_v4());
        records.push(record.clone());
        Ok(record)
    }

    async fn list_all(&self) -> Result<Vec<VideoRecord>, AppError> {
        self.check_available()?;

        let records = self.records.read().await;
        // Reverse insertion order first so the stable sort keeps later inserts
        // ahead of earlier ones with the same timestamp.
        let mut listed: Vec<VideoRecord> = records.iter().rev().cloned().collect();
        listed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(listed)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.check_available()
    }
}
