use crate::directory::ensure_directory;
use crate::traits::{Storage, StorageError, StorageResult, UploadReader};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Local filesystem storage implementation
#[derive(Clone, Debug)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at `base_path`, creating the directory
    /// (and its parents) if it does not exist yet.
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();
        ensure_directory(&base_path).await?;
        Ok(LocalStorage { base_path })
    }

    /// Root directory holding the stored files.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Convert a stored filename to its filesystem path.
    ///
    /// Stored files live directly under the root, so anything that could name
    /// another directory is rejected.
    fn key_to_path(&self, filename: &str) -> StorageResult<PathBuf> {
        if filename.is_empty()
            || filename.contains("..")
            || filename.contains('/')
            || filename.contains('\\')
        {
            return Err(StorageError::InvalidKey(format!(
                "'{}' is not a plain file name",
                filename
            )));
        }
        Ok(self.base_path.join(filename))
    }

    async fn remove_partial(path: &Path) {
        if let Err(e) = fs::remove_file(path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to remove partial upload"
                );
            }
        }
    }

    async fn copy_limited<'r>(
        path: &Path,
        mut reader: UploadReader<'r>,
        max_bytes: u64,
    ) -> StorageResult<u64> {
        let mut file = fs::File::create(path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        let mut buf = vec![0u8; COPY_BUFFER_SIZE];
        let mut written: u64 = 0;
        loop {
            let n = reader
                .read(&mut buf)
                .await
                .map_err(StorageError::StreamFailed)?;
            if n == 0 {
                break;
            }
            written += n as u64;
            if written > max_bytes {
                return Err(StorageError::TooLarge {
                    limit_bytes: max_bytes,
                });
            }
            file.write_all(&buf[..n]).await.map_err(|e| {
                StorageError::UploadFailed(format!(
                    "Failed to write file {}: {}",
                    path.display(),
                    e
                ))
            })?;
        }

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        Ok(written)
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn upload_stream<'r>(
        &self,
        filename: &str,
        reader: UploadReader<'r>,
        max_bytes: u64,
    ) -> StorageResult<u64> {
        let path = self.key_to_path(filename)?;
        let start = std::time::Instant::now();

        ensure_directory(&self.base_path).await?;

        match Self::copy_limited(&path, reader, max_bytes).await {
            Ok(size) => {
                tracing::info!(
                    path = %path.display(),
                    filename = %filename,
                    size_bytes = size,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Local storage stream upload successful"
                );
                Ok(size)
            }
            Err(e) => {
                Self::remove_partial(&path).await;
                tracing::debug!(
                    path = %path.display(),
                    filename = %filename,
                    error = %e,
                    "Local storage stream upload aborted"
                );
                Err(e)
            }
        }
    }

    async fn delete(&self, filename: &str) -> StorageResult<()> {
        let path = self.key_to_path(filename)?;

        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(path = %path.display(), filename = %filename, "Local storage delete successful");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::DeleteFailed(format!(
                "Failed to delete file {}: {}",
                path.display(),
                e
            ))),
        }
    }
}
