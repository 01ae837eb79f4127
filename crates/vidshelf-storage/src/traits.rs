//! Storage abstraction trait

use async_trait::async_trait;
use std::pin::Pin;
use thiserror::Error;
use tokio::io::AsyncRead;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    /// The incoming stream carried more bytes than allowed.
    #[error("File exceeds the limit of {limit_bytes} bytes")]
    TooLarge { limit_bytes: u64 },

    /// Reading from the incoming stream failed; the inner error is kept so
    /// callers can inspect what the producer reported.
    #[error("Failed to read upload stream: {0}")]
    StreamFailed(#[source] std::io::Error),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Byte source for a streamed upload.
pub type UploadReader<'r> = Pin<Box<dyn AsyncRead + Send + 'r>>;

/// Storage abstraction trait
///
/// Files are addressed by their stored filename, relative to the storage root.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Stream `reader` into a new file named `filename`.
    ///
    /// Reads until EOF and returns the number of bytes written. When more than
    /// `max_bytes` arrive, or reading/writing fails, the partial file is removed
    /// before the error is returned.
    async fn upload_stream<'r>(
        &self,
        filename: &str,
        reader: UploadReader<'r>,
        max_bytes: u64,
    ) -> StorageResult<u64>;

    /// Delete a stored file. Deleting a missing file succeeds.
    async fn delete(&self, filename: &str) -> StorageResult<()>;
}
