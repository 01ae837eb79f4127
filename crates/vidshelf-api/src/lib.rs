//! Vidshelf API Library
//!
//! HTTP handlers, upload pipeline and application setup for the video upload
//! service.

mod api_doc;
mod handlers;
mod services;
mod telemetry;
mod utils;

pub mod constants;
pub mod error;
pub mod setup;
pub mod state;

pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
