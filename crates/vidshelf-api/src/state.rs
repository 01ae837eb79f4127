//! Shared application state handed to every handler.

use std::sync::Arc;
use vidshelf_core::Config;
use vidshelf_db::VideoRepository;
use vidshelf_storage::Storage;

/// Immutable per-process state. Both handles point at resources outside the
/// process, so no locking happens here.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub videos: Arc<dyn VideoRepository>,
    pub storage: Arc<dyn Storage>,
}

impl AppState {
    pub fn new(
        config: Config,
        videos: Arc<dyn VideoRepository>,
        storage: Arc<dyn Storage>,
    ) -> Arc<Self> {
        Arc::new(Self {
            config,
            videos,
            storage,
        })
    }
}
