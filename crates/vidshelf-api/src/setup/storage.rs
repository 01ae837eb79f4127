//! Storage setup and initialization

use anyhow::{Context, Result};
use std::sync::Arc;
use vidshelf_core::Config;
use vidshelf_storage::{LocalStorage, Storage};

/// Create the storage directory if needed and return the storage handle.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    let storage = LocalStorage::new(&config.upload_dir)
        .await
        .with_context(|| {
            format!(
                "Failed to prepare upload directory {}",
                config.upload_dir.display()
            )
        })?;

    tracing::info!(
        upload_dir = %storage.base_path().display(),
        "Local storage initialized"
    );

    Ok(Arc::new(storage))
}
