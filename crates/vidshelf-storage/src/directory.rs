//! Storage directory management.

use std::io;
use std::path::Path;
use tokio::fs;

/// Make sure `path` exists as a directory, creating it and any missing parents.
///
/// Succeeds without touching the filesystem when the directory is already there.
/// Fails when the path exists but is not a directory, or when creation is denied.
pub async fn ensure_directory(path: &Path) -> io::Result<()> {
    match fs::metadata(path).await {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(io::Error::other(format!(
            "{} exists and is not a directory",
            path.display()
        ))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(path).await?;
            tracing::info!(path = %path.display(), "Created storage directory");
            Ok(())
        }
        Err(e) => Err(e),
    }
}
