use crate::error::{ErrorResponse, HttpAppError};
use crate::services::upload::{discard, read_upload_form, UploadForm};
use crate::state::AppState;
use crate::utils::request_origin::{file_url, request_origin};
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::{HeaderMap, StatusCode, Uri},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use vidshelf_core::constants::UPLOADS_MOUNT_PATH;
use vidshelf_core::models::{NewVideo, VideoRecord};
use vidshelf_core::AppError;

#[utoipa::path(
    post,
    path = "/api/videos",
    tag = "videos",
    request_body(content = inline(Object), content_type = "multipart/form-data",
        description = "Fields `title`, `description` and the file field `video`"),
    responses(
        (status = 201, description = "Video uploaded", body = VideoRecord),
        (status = 400, description = "Missing fields, rejected file type, file too large or malformed upload", body = ErrorResponse),
        (status = 500, description = "Storage or database failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(operation = "create_video"))]
pub async fn create_video(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    uri: Uri,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, HttpAppError> {
    let multipart = multipart?;
    let storage = state.storage.as_ref();

    let mut form = UploadForm::default();
    let result = read_upload_form(
        storage,
        multipart,
        state.config.max_upload_size_bytes,
        &mut form,
    )
    .await;

    let record = match result {
        Ok(()) => persist(&state, &headers, &uri, &form).await,
        Err(e) => Err(e),
    };

    match record {
        Ok(record) => {
            let (size_bytes, content_type) = form
                .stored
                .as_ref()
                .map(|s| (s.size_bytes, s.content_type.as_str()))
                .unwrap_or_default();
            tracing::info!(
                video_id = %record.id,
                filename = %record.filename,
                size_bytes,
                content_type = %content_type,
                "Video created"
            );
            Ok((StatusCode::CREATED, Json(record)))
        }
        Err(e) => {
            if let Some(stored) = &form.stored {
                discard(storage, stored).await;
            }
            Err(e.into())
        }
    }
}

async fn persist(
    state: &AppState,
    headers: &HeaderMap,
    uri: &Uri,
    form: &UploadForm,
) -> Result<VideoRecord, AppError> {
    let (title, description) = form.metadata().ok_or_else(|| {
        AppError::InvalidInput("Title and description are required".to_string())
    })?;

    let stored = form
        .stored
        .as_ref()
        .ok_or_else(|| AppError::InvalidInput("Video file is required".to_string()))?;

    let video_url = file_url(
        &request_origin(headers, uri),
        UPLOADS_MOUNT_PATH,
        &stored.filename,
    );

    state
        .videos
        .insert(NewVideo::new(
            title.to_string(),
            description.to_string(),
            stored.filename.clone(),
            video_url,
        ))
        .await
}

#[utoipa::path(
    get,
    path = "/api/videos",
    tag = "videos",
    responses(
        (status = 200, description = "All videos, newest first", body = Vec<VideoRecord>),
        (status = 500, description = "Record store unavailable", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(operation = "list_videos"))]
pub async fn list_videos(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let videos = state.videos.list_all().await.map_err(|e| {
        tracing::error!(error = %e.detailed_message(), "Failed to list videos");
        HttpAppError(AppError::Internal("Error fetching videos".to_string()))
    })?;

    Ok(Json(videos))
}
