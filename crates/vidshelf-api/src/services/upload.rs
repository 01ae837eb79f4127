//! Video upload pipeline
//!
//! Reads the multipart form, checks the declared media type of the `video` field,
//! and streams its bytes into storage under a freshly generated name while
//! enforcing the configured size cap. Nothing is buffered in memory beyond one
//! read chunk.

use axum::extract::multipart::{Field, Multipart, MultipartError};
use axum::http::StatusCode;
use futures::TryStreamExt;
use std::io;
use tokio_util::io::StreamReader;
use vidshelf_core::constants::{ALLOWED_VIDEO_CONTENT_TYPES, VIDEO_FIELD_NAME};
use vidshelf_core::{AppError, UploadRejection};
use vidshelf_storage::{generate_filename, Storage, StorageError};

use crate::error::storage_error_to_app;

/// A file that has been fully written to the storage directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub filename: String,
    pub content_type: String,
    pub size_bytes: u64,
}

/// Fields collected from one upload request.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub stored: Option<StoredFile>,
}

impl UploadForm {
    /// Title and description when both are present and non-empty.
    pub fn metadata(&self) -> Option<(&str, &str)> {
        match (self.title.as_deref(), self.description.as_deref()) {
            (Some(title), Some(description)) if !title.is_empty() && !description.is_empty() => {
                Some((title, description))
            }
            _ => None,
        }
    }
}

/// Strip media type parameters and lowercase (`Video/MP4; codecs=avc1` -> `video/mp4`).
pub fn normalize_content_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim()
        .to_ascii_lowercase()
}

/// Accept the declared media type if it is on the video allow-list.
pub fn check_declared_type(declared: Option<&str>) -> Result<String, UploadRejection> {
    let normalized = declared.map(normalize_content_type).unwrap_or_default();
    if ALLOWED_VIDEO_CONTENT_TYPES.contains(&normalized.as_str()) {
        Ok(normalized)
    } else {
        Err(UploadRejection::TypeRejected {
            content_type: declared.unwrap_or_default().to_string(),
        })
    }
}

/// Body-limit failures surface as 413 from the multipart parser; everything else
/// is a malformed request.
pub fn classify_multipart_error(err: &MultipartError, limit_bytes: u64) -> UploadRejection {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        UploadRejection::SizeRejected { limit_bytes }
    } else {
        UploadRejection::Malformed(err.body_text())
    }
}

fn classify_stream_error(err: &io::Error, limit_bytes: u64) -> UploadRejection {
    match err
        .get_ref()
        .and_then(|inner| inner.downcast_ref::<MultipartError>())
    {
        Some(multipart_err) => classify_multipart_error(multipart_err, limit_bytes),
        None => UploadRejection::Malformed(err.to_string()),
    }
}

/// Validate and store one `video` field.
pub async fn handle_upload(
    storage: &dyn Storage,
    field: Field<'_>,
    max_bytes: u64,
) -> Result<StoredFile, AppError> {
    let content_type = check_declared_type(field.content_type())?;
    let original_filename = field.file_name().unwrap_or_default().to_string();
    let filename = generate_filename(&original_filename);

    tracing::debug!(
        filename = %filename,
        original_filename = %original_filename,
        content_type = %content_type,
        "Receiving video upload"
    );

    let reader = StreamReader::new(field.map_err(io::Error::other));

    let size_bytes = storage
        .upload_stream(&filename, Box::pin(reader), max_bytes)
        .await
        .map_err(|e| match e {
            StorageError::StreamFailed(io_err) => {
                AppError::Upload(classify_stream_error(&io_err, max_bytes))
            }
            other => storage_error_to_app(other),
        })?;

    tracing::info!(
        filename = %filename,
        size_bytes,
        content_type = %content_type,
        "Video stored"
    );

    Ok(StoredFile {
        filename,
        content_type,
        size_bytes,
    })
}

/// Read every part of the form into `form`.
///
/// The file is written as soon as its part arrives, so `form.stored` may be set
/// even when this returns an error; the caller owns the cleanup.
pub async fn read_upload_form(
    storage: &dyn Storage,
    mut multipart: Multipart,
    max_bytes: u64,
    form: &mut UploadForm,
) -> Result<(), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Upload(classify_multipart_error(&e, max_bytes)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "title" => {
                form.title = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::Upload(classify_multipart_error(&e, max_bytes)))?,
                );
            }
            "description" => {
                form.description = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::Upload(classify_multipart_error(&e, max_bytes)))?,
                );
            }
            // A part without a filename is an empty file input or a plain text
            // value, not an upload.
            VIDEO_FIELD_NAME
                if form.stored.is_none() && field.file_name().is_some_and(|n| !n.is_empty()) =>
            {
                form.stored = Some(handle_upload(storage, field, max_bytes).await?);
            }
            other => {
                tracing::debug!(field = %other, "Ignoring multipart field");
            }
        }
    }

    Ok(())
}

/// Best-effort removal of a file that will not get a record.
pub async fn discard(storage: &dyn Storage, stored: &StoredFile) {
    if let Err(e) = storage.delete(&stored.filename).await {
        tracing::warn!(
            filename = %stored.filename,
            error = %e,
            "Failed to delete orphaned upload"
        );
    }
}
