//! API Handlers
//!
//! HTTP request handlers for each cache endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use tracing::debug;

use crate::cache::TtlCache;
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::models::{DeleteResponse, HealthResponse, SetResponse, StatsResponse};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Shared cache; the reaper lives as long as the last clone
    pub cache: Arc<TtlCache>,
}

impl AppState {
    /// Wraps an already constructed cache.
    pub fn new(cache: TtlCache) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }

    /// Builds a cache from `config` and starts its reaper.
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(TtlCache::with_config(*config))
    }
}

/// Handler for PUT /cache/*key
///
/// Stores the raw request body under `key`, replacing any previous value.
pub async fn set_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    body: Bytes,
) -> Json<SetResponse> {
    let size = body.len();
    state.cache.add(key.clone(), body);
    debug!(key = %key, size, "stored payload");

    Json(SetResponse::new(key, size))
}

/// Handler for GET /cache/*key
///
/// Returns the cached payload as `application/octet-stream`.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<impl IntoResponse> {
    let value = state.cache.get(&key).ok_or(CacheError::NotFound(key))?;

    Ok(([(header::CONTENT_TYPE, "application/octet-stream")], value))
}

/// Handler for DELETE /cache/*key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    match state.cache.remove(&key) {
        Some(_) => Ok(Json(DeleteResponse::new(key))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.stats();
    let config = state.cache.config();

    Json(StatsResponse::new(
        &stats,
        duration_millis(config.ttl),
        duration_millis(config.sweep_interval),
    ))
}

/// Whole milliseconds in `d`, saturating at `u64::MAX`.
fn duration_millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
