use async_trait::async_trait;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;
use validator::Validate;
use vidshelf_core::{
    models::{NewVideo, VideoRecord},
    AppError,
};

/// Persistence operations for video records.
#[async_trait]
pub trait VideoRepository: Send + Sync {
    /// Store a new record and return it with its generated id.
    async fn insert(&self, video: NewVideo) -> Result<VideoRecord, AppError>;

    /// Every record, newest first.
    async fn list_all(&self) -> Result<Vec<VideoRecord>, AppError>;

    /// Round-trip to the backing store.
    async fn ping(&self) -> Result<(), AppError>;
}

/// PostgreSQL-backed repository over the `videos` table
#[derive(Clone)]
pub struct PgVideoRepository {
    pool: PgPool,
}

impl PgVideoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VideoRepository for PgVideoRepository {
    #[tracing::instrument(skip(self, video), fields(db.table = "videos", db.operation = "insert", filename = %video.filename))]
    async fn insert(&self, video: NewVideo) -> Result<VideoRecord, AppError> {
        video.validate()?;

        let record = sqlx::query_as::<Postgres, VideoRecord>(
            r#"
            INSERT INTO videos (id, title, description, filename, video_url, created_at)
            VALUES ($1, $2, $3, $4, $5, COALESCE($6, now()))
            RETURNING id, title, description, filename, video_url, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&video.title)
        .bind(&video.description)
        .bind(&video.filename)
        .bind(&video.video_url)
        .bind(video.created_at)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(video_id = %record.id, "Video record inserted");

        Ok(record)
    }

    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "select"))]
    async fn list_all(&self) -> Result<Vec<VideoRecord>, AppError> {
        let videos = sqlx::query_as::<Postgres, VideoRecord>(
            r#"
            SELECT id, title, description, filename, video_url, created_at
            FROM videos
            ORDER BY created_at DESC, seq DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(videos)
    }

    #[tracing::instrument(skip(self), fields(db.operation = "ping"))]
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query_scalar::<Postgres, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}
