//! Record store for video metadata
//!
//! [`VideoRepository`] is the seam the API layer depends on. [`PgVideoRepository`]
//! backs it with the `videos` table; the `test-helpers` feature adds an in-memory
//! implementation for tests that run without PostgreSQL.

pub mod video;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use video::{PgVideoRepository, VideoRepository};

/// Embedded migrations from the workspace `migrations/` directory.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");
