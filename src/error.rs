//! Error types for the cache
//!
//! The cache operations themselves cannot fail; these cover the HTTP surface
//! and reaper lifecycle.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tokio::task::JoinError;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for the cache crate.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key not present (never added, removed, or expired)
    #[error("Key not found: {0}")]
    NotFound(String),

    /// The reaper task panicked or was cancelled while being joined
    #[error("Reaper task failed: {0}")]
    Reaper(#[from] JoinError),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::Reaper(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache crate.
pub type Result<T> = std::result::Result<T, CacheError>;
