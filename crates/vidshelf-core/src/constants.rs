//! Constants shared across crates.

/// Declared media types accepted for uploaded videos.
pub const ALLOWED_VIDEO_CONTENT_TYPES: &[&str] =
    &["video/mp4", "video/webm", "video/ogg", "video/quicktime"];

/// Multipart field carrying the video file.
pub const VIDEO_FIELD_NAME: &str = "video";

/// URL path under which the storage directory is served.
pub const UPLOADS_MOUNT_PATH: &str = "/uploads";

/// Default per-file cap in MiB.
pub const DEFAULT_MAX_UPLOAD_SIZE_MB: u64 = 500;

/// Extra bytes allowed on the request body on top of the file cap, for
/// multipart boundaries and the text fields.
pub const MULTIPART_OVERHEAD_BYTES: u64 = 1024 * 1024;
