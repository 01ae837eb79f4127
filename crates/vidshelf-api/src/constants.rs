//! API route paths.

/// Collection endpoint for video records.
pub const VIDEOS_PATH: &str = "/api/videos";

/// Served OpenAPI document.
pub const OPENAPI_PATH: &str = "/api/openapi.json";

/// RapiDoc viewer.
pub const DOCS_PATH: &str = "/docs";

pub const HEALTH_PATH: &str = "/health";

pub const LIVENESS_PATH: &str = "/live";
