//! Vidshelf Storage Library
//!
//! Local filesystem storage for uploaded videos.
//!
//! # Filename format
//!
//! Stored files live directly in the storage directory and are named
//! `{unix_millis}-{random}{ext}`, where `random` is drawn from `[0, 1e9)` and
//! `ext` is the original file's extension including the dot. Names never contain
//! path separators; generation lives in the `keys` module.

pub mod directory;
pub mod keys;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use directory::ensure_directory;
pub use keys::generate_filename;
pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult, UploadReader};
