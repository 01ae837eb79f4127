//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use vidshelf_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Vidshelf API",
        version = "0.1.0",
        description = "Upload videos with a title and description, list them newest first, and fetch the stored files under /uploads/."
    ),
    paths(
        handlers::videos::create_video,
        handlers::videos::list_videos,
        handlers::health::health_check,
        handlers::health::liveness_check,
    ),
    components(schemas(
        models::VideoRecord,
        error::ErrorResponse,
        handlers::health::HealthResponse,
    )),
    tags(
        (name = "videos", description = "Video upload and listing"),
        (name = "health", description = "Liveness and dependency checks")
    )
)]
pub struct ApiDoc;
