use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A stored video and its metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Name of the file inside the upload directory.
    pub filename: String,
    /// Absolute URL the file is served from.
    pub video_url: String,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for the record store.
#[derive(Debug, Clone, Validate)]
pub struct NewVideo {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: String,
    #[validate(length(min = 1, message = "filename must not be empty"))]
    pub filename: String,
    #[validate(length(min = 1, message = "video url must not be empty"))]
    pub video_url: String,
    /// Assigned by the store when absent.
    pub created_at: Option<DateTime<Utc>>,
}

impl NewVideo {
    pub fn new(title: String, description: String, filename: String, video_url: String) -> Self {
        Self {
            title,
            description,
            filename,
            video_url,
            created_at: None,
        }
    }

    /// Materialize the record with the given id, defaulting the creation time to now.
    pub fn into_record(self, id: Uuid) -> VideoRecord {
        VideoRecord {
            id,
            title: self.title,
            description: self.description,
            filename: self.filename,
            video_url: self.video_url,
            created_at: self.created_at.unwrap_or_else(Utc::now),
        }
    }
}
