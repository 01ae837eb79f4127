//! Vidshelf Core Library
//!
//! Domain models, error types, configuration and constants shared by the
//! storage, database and API crates.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{Config, LogFormat};
pub use error::{AppError, ErrorMetadata, LogLevel, UploadRejection};
